use std::path::PathBuf;

use thiserror::Error;

/// Failure reasons for [`crate::load_obj`] and [`crate::load_obj_str`].
///
/// Every variant here is a "hard parse failure": callers must discard
/// whatever `Scene` was being built. Silent skips (unknown directives,
/// malformed texture flags, sub-triangle faces, materials with no filename)
/// never produce a `LoadError`; they are only observable through the `log`
/// crate, per the original loader's documented behavior.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The path did not end in `.obj`. The check is case-sensitive.
    #[error("path {0:?} does not end in .obj")]
    NotAnObjFile(PathBuf),

    /// The OBJ file (or a referenced MTL file) could not be opened or read.
    #[error("I/O error reading model data: {0}")]
    Io(#[from] std::io::Error),

    /// A face-vertex index token used `0`, which OBJ's 1-based indexing
    /// never produces legitimately.
    #[error("malformed face-vertex index")]
    MalformedIndex,

    /// After the whole file was read, some face referenced a position,
    /// texcoord, or normal index that was never defined.
    #[error("face referenced a vertex, texcoord, or normal past the end of the file")]
    DanglingIndexReference,
}

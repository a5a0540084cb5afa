//! A loader for Wavefront OBJ geometry and the MTL material libraries it
//! references.
//!
//! ```no_run
//! let scene = wfobj::load_obj("model.obj", wfobj::ParseOptions::empty())?;
//! for mesh in &scene.meshes {
//!     println!("{}: {} indices", mesh.name, mesh.indices.len());
//! }
//! # Ok::<(), wfobj::LoadError>(())
//! ```
//!
//! Positions, texcoords, and normals are pooled once per [`Scene`] and
//! referenced by index from each [`Mesh`], rather than duplicated per
//! vertex; see `SPEC_FULL.md` for the full data model and the parsing
//! rules this loader follows.

mod error;
mod index;
mod line_reader;
mod mtl;
mod obj;
mod tokenizer;
mod types;

use std::path::Path;

pub use error::LoadError;
pub use types::{
    Material, Mesh, ParseOptions, Scene, TexType, Texture, TextureFaceType, TextureOption, Vec2,
    Vec3, Vec4, VertexIndex,
};

/// Loads an OBJ file from disk, along with any MTL libraries it references
/// via `mtllib`.
///
/// `path` must have a (case-sensitive) `.obj` extension. MTL libraries are
/// resolved relative to `path`'s directory.
pub fn load_obj(path: impl AsRef<Path>, options: ParseOptions) -> Result<Scene, LoadError> {
    obj::load(path.as_ref(), options)
}

/// Loads OBJ text that has already been read into memory, without touching
/// the filesystem for the OBJ data itself. `mtllib` directives are still
/// resolved against the filesystem, relative to `path_hint`'s directory.
///
/// `path_hint` is used only to check the `.obj` extension and to compute
/// the base directory for `mtllib` resolution; it need not exist on disk.
pub fn load_obj_str(
    path_hint: &str,
    obj_text: &str,
    options: ParseOptions,
) -> Result<Scene, LoadError> {
    obj::load_str(path_hint, obj_text, options)
}

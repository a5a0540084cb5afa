//! Plain value types that make up a loaded [`Scene`].
//!
//! Nothing in this module does any parsing; it is just the data model the
//! rest of the crate fills in.

use std::collections::HashMap;

use bitflags::bitflags;

/// A 2-component float tuple, used for texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A 3-component float tuple, used for normals and most material colors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A 4-component float tuple, used for vertex positions (`w` defaults to 1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

bitflags! {
    /// Behavior flags accepted by [`crate::load_obj`] and [`crate::load_obj_str`].
    ///
    /// Only [`ParseOptions::FLIP_UV`] has any observable effect in this loader.
    /// [`ParseOptions::TRIANGULATE`] is accepted for source compatibility and
    /// is a documented no-op: setting it causes faces to be dropped rather
    /// than triangulated, matching the original loader this crate is modeled
    /// on. See `SPEC_FULL.md` §9(c) for why that behavior is preserved rather
    /// than "fixed".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ParseOptions: u32 {
        const TRIANGULATE = 1 << 0;
        const FLIP_UV = 1 << 1;
    }
}

/// One face-vertex reference: a triple of zero-based pool indices.
///
/// A component is `-1` when that attribute is absent from the face token
/// (e.g. the `vt` slot in a `v//vn` face).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexIndex {
    pub v_idx: i32,
    pub vt_idx: i32,
    pub vn_idx: i32,
}

impl VertexIndex {
    /// Sentinel stored in `vt_idx`/`vn_idx` when that attribute is absent.
    pub const ABSENT: i32 = -1;
}

/// One polygon, as a run of face-vertex corners.
#[derive(Debug, Clone, Default)]
pub(crate) struct Face {
    pub vertex_indices: Vec<VertexIndex>,
}

/// The transient bucket of faces accumulated since the last flush.
#[derive(Debug, Clone, Default)]
pub(crate) struct Primitive {
    pub faces: Vec<Face>,
}

impl Primitive {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// A named, flushed run of faces sharing an object name and material history.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    /// Flattened face-vertex corners, `num_face_vertices` corners at a time.
    pub indices: Vec<VertexIndex>,
    /// Corner count per face (3 for a triangle, 4 for a quad, ...).
    pub num_face_vertices: Vec<u8>,
    /// Material id per face, or `-1` if no material was active.
    pub material_ids: Vec<i32>,
}

/// Texture slots a [`Material`] can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexType {
    Ambient,
    Diffuse,
    Specular,
    SpecularHighlight,
    Bump,
    Displacement,
    Alpha,
    Reflection,
}

impl TexType {
    pub(crate) const COUNT: usize = 8;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// `-type` argument of a texture map directive; specular maps only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFaceType {
    #[default]
    Tex2D,
    Tex3DSphere,
    Tex3DCubeTop,
    Tex3DCubeBottom,
    Tex3DCubeFront,
    Tex3DCubeBack,
    Tex3DCubeLeft,
    Tex3DCubeRight,
}

/// Modifier flags that can precede a texture map's filename.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureOption {
    pub clamp: bool,
    pub blendu: bool,
    pub blendv: bool,
    pub bump_multiplier: f32,
    pub sharpness: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub origin_offset: Vec3,
    pub scale: Vec3,
    pub turbulence: Vec3,
    /// Image channel to pull the map from: one of `r|g|b|m|l|z`.
    pub imfchan: char,
    pub face_type: TextureFaceType,
}

impl Default for TextureOption {
    fn default() -> Self {
        TextureOption {
            clamp: false,
            blendu: true,
            blendv: true,
            bump_multiplier: 1.0,
            sharpness: 1.0,
            brightness: 0.0,
            contrast: 1.0,
            origin_offset: Vec3::default(),
            scale: Vec3 { x: 1.0, y: 1.0, z: 1.0 },
            turbulence: Vec3::default(),
            imfchan: 'm',
            face_type: TextureFaceType::default(),
        }
    }
}

/// A material's reference to an image asset; the image itself is never
/// loaded or decoded here.
#[derive(Debug, Clone, Default)]
pub struct Texture {
    pub path: String,
    pub option: TextureOption,
}

/// A shaded surface specification parsed from an MTL library.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub transmittance: Vec3,
    pub emission: Vec3,
    pub shininess: f32,
    /// Index of refraction.
    pub ior: f32,
    /// 1.0 = opaque, 0.0 = fully transparent.
    pub dissolve: f32,
    pub illum: i32,
    texture_map: [Option<Texture>; TexType::COUNT],
}

impl Default for Material {
    fn default() -> Self {
        Material {
            name: String::new(),
            ambient: Vec3::default(),
            diffuse: Vec3::default(),
            specular: Vec3::default(),
            transmittance: Vec3::default(),
            emission: Vec3::default(),
            shininess: 1.0,
            ior: 1.0,
            dissolve: 1.0,
            illum: 0,
            texture_map: [None, None, None, None, None, None, None, None],
        }
    }
}

impl Material {
    pub fn texture(&self, ty: TexType) -> Option<&Texture> {
        self.texture_map[ty.index()].as_ref()
    }

    pub(crate) fn set_texture(&mut self, ty: TexType, tex: Texture) {
        self.texture_map[ty.index()] = Some(tex);
    }
}

/// The full result of one [`crate::load_obj`] call: shared attribute pools,
/// the meshes built from them, and any materials loaded from referenced
/// MTL libraries.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub positions: Vec<Vec4>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    /// Maps a material's name to its index in `materials`. Duplicate names
    /// overwrite earlier entries, matching `newmtl`'s flush-on-redefinition
    /// behavior.
    pub material_map: HashMap<String, usize>,
    /// Directory the OBJ file was loaded from (including trailing slash),
    /// used to resolve `mtllib` references. Empty if the path had no
    /// directory component.
    pub base_dir: String,
}

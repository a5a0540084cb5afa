//! OBJ parser and scene builder: the top-level state machine.
//!
//! Maintains pools of positions/texcoords/normals, a current primitive
//! (faces awaiting flush), a current mesh, the current object name, and
//! the current material id. Dispatches on line prefix and flushes the
//! current mesh into the scene at each group/object boundary.

use std::fs::File;
use std::io::{BufReader, Cursor as IoCursor, Read};
use std::path::Path;

use log::{debug, trace, warn};

use crate::error::LoadError;
use crate::index::parse_vertex_index;
use crate::line_reader::LineReader;
use crate::mtl;
use crate::tokenizer::Cursor;
use crate::types::{Face, Mesh, ParseOptions, Primitive, Scene};

pub(crate) fn load(path: &Path, options: ParseOptions) -> Result<Scene, LoadError> {
    let path_str = path.to_string_lossy();
    if !path_str.ends_with(".obj") {
        return Err(LoadError::NotAnObjFile(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut scene = Scene { base_dir: base_dir_of(&path_str), ..Default::default() };
    debug!("loading obj file {:?} (base dir {:?})", path, scene.base_dir);
    parse_obj(BufReader::new(file), &mut scene, options)?;
    Ok(scene)
}

pub(crate) fn load_str(path_hint: &str, obj_text: &str, options: ParseOptions) -> Result<Scene, LoadError> {
    if !path_hint.ends_with(".obj") {
        return Err(LoadError::NotAnObjFile(path_hint.into()));
    }

    let mut scene = Scene { base_dir: base_dir_of(path_hint), ..Default::default() };
    parse_obj(IoCursor::new(obj_text.as_bytes()), &mut scene, options)?;
    Ok(scene)
}

fn base_dir_of(path: &str) -> String {
    match path.rfind(['/', '\\']) {
        Some(i) => path[..=i].to_string(),
        None => String::new(),
    }
}

fn parse_obj<R: Read>(reader: R, scene: &mut Scene, options: ParseOptions) -> Result<(), LoadError> {
    let mut lines = LineReader::new(reader);
    let mut primitive = Primitive::default();
    let mut current_mesh = Mesh::default();
    let mut current_object_name = String::new();
    let mut current_material_id: i32 = -1;

    let mut max_v: i32 = -1;
    let mut max_vt: i32 = -1;
    let mut max_vn: i32 = -1;

    while let Some(raw) = lines.read_line()? {
        let mut cur = Cursor::new(&raw);
        cur.skip_space();
        if cur.is_at_end() || cur.peek() == b'#' {
            continue;
        }

        if let Some(mut rest) = cur.strip_prefix_with_space(b"vn") {
            let vn = rest.parse_vec3(0.0, 0.0, 0.0);
            scene.normals.push(vn);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"vt") {
            let mut vt = rest.parse_vec2(0.0, 0.0);
            if options.contains(ParseOptions::FLIP_UV) {
                vt.y = 1.0 - vt.y;
            }
            scene.texcoords.push(vt);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"v") {
            let v = rest.parse_vec4(0.0, 0.0, 0.0, 1.0);
            scene.positions.push(v);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"f") {
            let mut face = Face::default();
            rest.skip_space();
            while !rest.is_at_end() {
                let vi = parse_vertex_index(
                    &mut rest,
                    scene.positions.len(),
                    scene.texcoords.len(),
                    scene.normals.len(),
                )?;
                max_v = max_v.max(vi.v_idx);
                max_vt = max_vt.max(vi.vt_idx);
                max_vn = max_vn.max(vi.vn_idx);
                face.vertex_indices.push(vi);
                rest.skip_space_tab_cr();
            }
            primitive.faces.push(face);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"usemtl") {
            let name = rest.read_word();
            let new_material_id = scene.material_map.get(name).map(|&i| i as i32).unwrap_or(-1);
            if new_material_id != current_material_id {
                flush_primitive_into_mesh(
                    &mut current_mesh,
                    &mut primitive,
                    options,
                    current_material_id,
                    &current_object_name,
                );
                current_material_id = new_material_id;
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"mtllib") {
            let candidates = rest.read_rest_split(b" ");
            for name in candidates {
                let full_path = format!("{}{}", scene.base_dir, name);
                match File::open(&full_path) {
                    Ok(f) => {
                        trace!("loading material library {:?}", full_path);
                        mtl::load_mtl(BufReader::new(f), &mut scene.materials, &mut scene.material_map)?;
                        break;
                    }
                    Err(_) => {
                        trace!("mtllib candidate {:?} not available, trying next", full_path);
                        continue;
                    }
                }
            }
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"g") {
            flush_primitive_into_mesh(
                &mut current_mesh,
                &mut primitive,
                options,
                current_material_id,
                &current_object_name,
            );
            flush_mesh_to_scene(scene, &mut current_mesh);
            primitive = Primitive::default();

            let mut names = Vec::new();
            rest.skip_space();
            while !rest.is_at_end() {
                names.push(rest.read_word().to_string());
                rest.skip_space_tab_cr();
            }
            if !names.is_empty() {
                current_object_name = names.join(" ");
            }
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"o") {
            flush_primitive_into_mesh(
                &mut current_mesh,
                &mut primitive,
                options,
                current_material_id,
                &current_object_name,
            );
            flush_mesh_to_scene(scene, &mut current_mesh);
            primitive = Primitive::default();

            current_object_name = rest.read_word().to_string();
        } else {
            trace!("skipping unrecognized directive {:?}", String::from_utf8_lossy(cur.as_bytes()));
        }
    }

    // Final flush.
    flush_primitive_into_mesh(
        &mut current_mesh,
        &mut primitive,
        options,
        current_material_id,
        &current_object_name,
    );
    flush_mesh_to_scene(scene, &mut current_mesh);

    if max_v >= scene.positions.len() as i32 {
        warn!("face referenced a vertex position past the end of the file");
        return Err(LoadError::DanglingIndexReference);
    }
    if max_vt >= scene.texcoords.len() as i32 {
        warn!("face referenced a texcoord past the end of the file");
        return Err(LoadError::DanglingIndexReference);
    }
    if max_vn >= scene.normals.len() as i32 {
        warn!("face referenced a normal past the end of the file");
        return Err(LoadError::DanglingIndexReference);
    }

    Ok(())
}

/// Translates the accumulated faces in `primitive` into `mesh`'s flattened
/// index streams, tagging each with `material_id`, then clears `primitive`.
///
/// Faces with fewer than 3 corners are dropped silently. If
/// [`ParseOptions::TRIANGULATE`] is set, faces are dropped unconditionally:
/// this mirrors the original loader, where triangulation was never
/// implemented and the non-triangulated emission path is skipped instead
/// of engaged. See `SPEC_FULL.md` §9(c).
fn flush_primitive_into_mesh(
    mesh: &mut Mesh,
    primitive: &mut Primitive,
    options: ParseOptions,
    material_id: i32,
    name: &str,
) {
    if primitive.is_empty() {
        return;
    }
    mesh.name = name.to_string();

    for face in &primitive.faces {
        let corners = face.vertex_indices.len();
        if corners < 3 {
            trace!("skipping face with {corners} corner(s), need at least 3");
            continue;
        }
        if options.contains(ParseOptions::TRIANGULATE) {
            continue;
        }
        mesh.indices.extend_from_slice(&face.vertex_indices);
        mesh.num_face_vertices.push(corners as u8);
        mesh.material_ids.push(material_id);
    }

    primitive.faces.clear();
}

/// If `mesh` ended up with any indices, appends a copy to the scene and
/// resets `mesh` to empty.
fn flush_mesh_to_scene(scene: &mut Scene, mesh: &mut Mesh) {
    let flushed = std::mem::take(mesh);
    if !flushed.indices.is_empty() {
        scene.meshes.push(flushed);
    }
}

//! MTL material library parser.
//!
//! A line-dispatched state machine: accumulates a current [`Material`],
//! flushes it into the output list on `newmtl` (and unconditionally at
//! EOF, even if it ended up nameless — see `SPEC_FULL.md` §9(a)), and
//! parses scalar/vector material properties plus texture map directives.

use std::collections::HashMap;
use std::io::{self, Read};

use log::trace;

use crate::line_reader::LineReader;
use crate::tokenizer::Cursor;
use crate::types::{Material, TexType, Texture, TextureFaceType};

pub(crate) fn load_mtl<R: Read>(
    reader: R,
    materials: &mut Vec<Material>,
    material_map: &mut HashMap<String, usize>,
) -> io::Result<()> {
    let mut lines = LineReader::new(reader);
    let mut current = Material::default();
    let mut has_d = false;

    while let Some(raw) = lines.read_line()? {
        let mut cur = Cursor::new(&raw);
        cur.skip_space();
        if cur.is_at_end() || cur.peek() == b'#' {
            continue;
        }
        let line = cur.as_bytes();

        if let Some(rest) = cur.strip_prefix_with_space(b"newmtl") {
            if !current.name.is_empty() {
                material_map.insert(current.name.clone(), materials.len());
                materials.push(std::mem::take(&mut current));
            }
            current = Material::default();
            has_d = false;
            let mut rest = rest;
            current.name = rest.read_word().to_string();
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Ka") {
            current.ambient = rest.parse_vec3(0.0, 0.0, 0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Kd") {
            current.diffuse = rest.parse_vec3(0.0, 0.0, 0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Ks") {
            current.specular = rest.parse_vec3(0.0, 0.0, 0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Ke") {
            current.emission = rest.parse_vec3(0.0, 0.0, 0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Kt") {
            current.transmittance = rest.parse_vec3(0.0, 0.0, 0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Tf") {
            current.transmittance = rest.parse_vec3(0.0, 0.0, 0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Ni") {
            current.ior = rest.parse_real(0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Ns") {
            current.shininess = rest.parse_real(0.0);
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"illum") {
            current.illum = rest.parse_int();
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"d") {
            current.dissolve = rest.parse_real(1.0);
            has_d = true;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"Tr") {
            if !has_d {
                current.dissolve = 1.0 - rest.parse_real(0.0);
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"map_Ka") {
            if let Some(tex) = parse_texture(rest.as_bytes()) {
                current.set_texture(TexType::Ambient, tex);
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"map_Kd") {
            if let Some(tex) = parse_texture(rest.as_bytes()) {
                current.set_texture(TexType::Diffuse, tex);
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"map_Ks") {
            if let Some(tex) = parse_texture(rest.as_bytes()) {
                current.set_texture(TexType::Specular, tex);
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"map_Ns") {
            if let Some(tex) = parse_texture(rest.as_bytes()) {
                current.set_texture(TexType::SpecularHighlight, tex);
            }
        } else if let Some(rest) = cur
            .strip_prefix_with_space(b"map_bump")
            .or_else(|| cur.strip_prefix_with_space(b"map_Bump"))
            .or_else(|| cur.strip_prefix_with_space(b"bump"))
        {
            if let Some(mut tex) = parse_texture(rest.as_bytes()) {
                tex.option.imfchan = 'l';
                current.set_texture(TexType::Bump, tex);
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"map_d") {
            if let Some(tex) = parse_texture(rest.as_bytes()) {
                current.set_texture(TexType::Alpha, tex);
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"disp") {
            if let Some(tex) = parse_texture(rest.as_bytes()) {
                current.set_texture(TexType::Displacement, tex);
            }
        } else if let Some(rest) = cur.strip_prefix_with_space(b"refl") {
            if let Some(tex) = parse_texture(rest.as_bytes()) {
                current.set_texture(TexType::Reflection, tex);
            }
        } else {
            trace!("mtl: skipping unrecognized directive {:?}", String::from_utf8_lossy(line));
        }
    }

    // Flush unconditionally, even when nameless: see SPEC_FULL.md §9(a).
    material_map.insert(current.name.clone(), materials.len());
    materials.push(current);

    Ok(())
}

/// Parses a texture map directive: a run of `-flag value` option pairs
/// terminated by the map's filename.
fn parse_texture(line: &[u8]) -> Option<Texture> {
    let mut tex = Texture::default();
    let mut cur = Cursor::new(line);

    while !cur.is_at_end() {
        cur.skip_space();
        if cur.is_at_end() {
            break;
        }

        if let Some(mut rest) = cur.strip_prefix_with_space(b"-clamp") {
            tex.option.clamp = rest.parse_on_off(true);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-blendu") {
            tex.option.blendu = rest.parse_on_off(true);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-blendv") {
            tex.option.blendv = rest.parse_on_off(true);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-bm") {
            tex.option.bump_multiplier = rest.parse_real(1.0);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-boost") {
            tex.option.sharpness = rest.parse_real(1.0);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-mm") {
            tex.option.brightness = rest.parse_real(0.0);
            tex.option.contrast = rest.parse_real(1.0);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-o") {
            tex.option.origin_offset = rest.parse_vec3(0.0, 0.0, 0.0);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-s") {
            tex.option.scale = rest.parse_vec3(1.0, 1.0, 1.0);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-t") {
            tex.option.turbulence = rest.parse_vec3(0.0, 0.0, 0.0);
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-imfchan") {
            rest.skip_space();
            let word = rest.read_word();
            if word.len() == 1 {
                tex.option.imfchan = word.as_bytes()[0] as char;
            }
            cur = rest;
        } else if let Some(mut rest) = cur.strip_prefix_with_space(b"-type") {
            tex.option.face_type = parse_texture_face_type(&mut rest);
            cur = rest;
        } else {
            // Not a recognized flag: interpret the next word as the path
            // and we're done, matching the original's fallthrough.
            tex.path = cur.read_word().to_string();
            break;
        }
    }

    if tex.path.is_empty() {
        None
    } else {
        Some(tex)
    }
}

fn parse_texture_face_type(cur: &mut Cursor) -> TextureFaceType {
    let word = cur.read_word();
    match word {
        "cube_top" => TextureFaceType::Tex3DCubeTop,
        "cube_bottom" => TextureFaceType::Tex3DCubeBottom,
        "cube_left" => TextureFaceType::Tex3DCubeLeft,
        "cube_right" => TextureFaceType::Tex3DCubeRight,
        "cube_front" => TextureFaceType::Tex3DCubeFront,
        "cube_back" => TextureFaceType::Tex3DCubeBack,
        "sphere" => TextureFaceType::Tex3DSphere,
        _ => TextureFaceType::Tex2D,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> (Vec<Material>, HashMap<String, usize>) {
        let mut materials = Vec::new();
        let mut material_map = HashMap::new();
        load_mtl(text.as_bytes(), &mut materials, &mut material_map).unwrap();
        (materials, material_map)
    }

    #[test]
    fn parses_scalar_and_vector_properties() {
        let (mats, map) = load(
            "newmtl red\nKa 0.1 0.1 0.1\nKd 1 0 0\nKs 0.5 0.5 0.5\nNs 96\nNi 1.2\nillum 2\nd 0.8\n",
        );
        assert_eq!(mats.len(), 1);
        let m = &mats[map["red"]];
        assert_eq!(m.name, "red");
        assert_eq!(m.diffuse, crate::types::Vec3 { x: 1.0, y: 0.0, z: 0.0 });
        assert_eq!(m.shininess, 96.0);
        assert_eq!(m.ior, 1.2);
        assert_eq!(m.illum, 2);
        assert_eq!(m.dissolve, 0.8);
    }

    #[test]
    fn tr_is_ignored_once_d_seen() {
        let (mats, map) = load("newmtl m\nd 0.8\nTr 0.5\n");
        assert_eq!(mats[map["m"]].dissolve, 0.8);
    }

    #[test]
    fn tr_applies_when_d_absent() {
        let (mats, map) = load("newmtl m\nTr 0.3\n");
        assert_eq!(mats[map["m"]].dissolve, 1.0 - 0.3);
    }

    #[test]
    fn eof_flushes_trailing_nameless_material() {
        let (mats, _map) = load("Ka 1 1 1\n");
        assert_eq!(mats.len(), 1);
        assert_eq!(mats[0].name, "");
    }

    #[test]
    fn bump_map_forces_imfchan_l() {
        let (mats, map) = load("newmtl m\nbump -bm 2.0 rock.png\n");
        let tex = mats[map["m"]].texture(TexType::Bump).unwrap();
        assert_eq!(tex.path, "rock.png");
        assert_eq!(tex.option.imfchan, 'l');
        assert_eq!(tex.option.bump_multiplier, 2.0);
    }

    #[test]
    fn texture_directive_with_empty_path_is_dropped() {
        let (mats, map) = load("newmtl m\nmap_Kd -clamp on\n");
        assert!(mats[map["m"]].texture(TexType::Diffuse).is_none());
    }

    #[test]
    fn multiple_materials_overwrite_map_on_duplicate_name() {
        let (mats, map) = load("newmtl m\nKd 1 0 0\nnewmtl m\nKd 0 1 0\n");
        assert_eq!(mats.len(), 2);
        assert_eq!(mats[map["m"]].diffuse, crate::types::Vec3 { x: 0.0, y: 1.0, z: 0.0 });
    }
}

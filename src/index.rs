//! Decodes one OBJ face-vertex token (`v`, `v/vt`, `v//vn`, or `v/vt/vn`)
//! into a [`VertexIndex`] triple of zero-based indices.

use crate::error::LoadError;
use crate::tokenizer::Cursor;
use crate::types::VertexIndex;

/// Bytes that terminate an index's digit run when scanning ahead, matching
/// the original tokenizer's `strcspn(token, "/ \t\r")`.
const INDEX_DELIMS: &[u8] = b"/ \t\r";

/// Parses and 1-based-to-0-based-normalizes one `/`-separated index,
/// advancing `cur` to the next delimiter regardless of how many digits
/// were actually valid (bug-compatible with the original's `strcspn` scan).
fn parse_and_normalize(cur: &mut Cursor, pool_size: usize) -> Result<i32, LoadError> {
    let value = cur.peek_int();
    if value == 0 {
        return Err(LoadError::MalformedIndex);
    }
    cur.skip_to_any(INDEX_DELIMS);
    Ok(if value > 0 { value - 1 } else { pool_size as i32 + value })
}

/// Parses one face-vertex token at `cur`'s current position.
///
/// `pos_size`/`tex_size`/`norm_size` are the pool sizes *at the time this
/// face is parsed*, used to resolve negative (relative-to-end) indices.
pub(crate) fn parse_vertex_index(
    cur: &mut Cursor,
    pos_size: usize,
    tex_size: usize,
    norm_size: usize,
) -> Result<VertexIndex, LoadError> {
    let v_idx = parse_and_normalize(cur, pos_size)?;

    if cur.peek() != b'/' {
        return Ok(VertexIndex { v_idx, vt_idx: -1, vn_idx: -1 });
    }
    cur.advance(1);

    // v//vn
    if cur.peek() == b'/' {
        cur.advance(1);
        let vn_idx = parse_and_normalize(cur, norm_size)?;
        return Ok(VertexIndex { v_idx, vt_idx: -1, vn_idx });
    }

    let vt_idx = parse_and_normalize(cur, tex_size)?;
    if cur.peek() != b'/' {
        return Ok(VertexIndex { v_idx, vt_idx, vn_idx: -1 });
    }
    cur.advance(1);

    let vn_idx = parse_and_normalize(cur, norm_size)?;
    Ok(VertexIndex { v_idx, vt_idx, vn_idx })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str, pos: usize, tex: usize, norm: usize) -> Result<VertexIndex, LoadError> {
        let mut cur = Cursor::new(s.as_bytes());
        parse_vertex_index(&mut cur, pos, tex, norm)
    }

    #[test]
    fn v_only() {
        let vi = parse("3", 5, 5, 5).unwrap();
        assert_eq!(vi, VertexIndex { v_idx: 2, vt_idx: -1, vn_idx: -1 });
    }

    #[test]
    fn v_vt() {
        let vi = parse("3/2", 5, 5, 5).unwrap();
        assert_eq!(vi, VertexIndex { v_idx: 2, vt_idx: 1, vn_idx: -1 });
    }

    #[test]
    fn v_vn_only() {
        let vi = parse("3//4", 5, 5, 5).unwrap();
        assert_eq!(vi, VertexIndex { v_idx: 2, vt_idx: -1, vn_idx: 3 });
    }

    #[test]
    fn v_vt_vn() {
        let vi = parse("3/2/4", 5, 5, 5).unwrap();
        assert_eq!(vi, VertexIndex { v_idx: 2, vt_idx: 1, vn_idx: 3 });
    }

    #[test]
    fn negative_indices_resolve_relative_to_pool_size() {
        let vi = parse("-1/-2/-3", 5, 5, 5).unwrap();
        assert_eq!(vi, VertexIndex { v_idx: 4, vt_idx: 3, vn_idx: 2 });
    }

    #[test]
    fn zero_index_is_an_error() {
        assert!(matches!(parse("0", 5, 5, 5), Err(LoadError::MalformedIndex)));
    }
}

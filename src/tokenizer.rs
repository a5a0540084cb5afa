//! Tokenizer primitives: a moving cursor over one line's bytes.
//!
//! The cursor treats end-of-input the same as a NUL byte, mirroring the
//! null-terminated-buffer tokenizer this crate is modeled on, so callers
//! never need to special-case running off the end of a short line.

use crate::types::{Vec2, Vec3, Vec4};

/// A read cursor into one line's bytes. Cheap to copy; advancing just
/// reslices the remainder.
#[derive(Clone, Copy)]
pub(crate) struct Cursor<'a> {
    rest: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Cursor { rest: line }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.rest
    }

    fn byte_at(&self, i: usize) -> u8 {
        self.rest.get(i).copied().unwrap_or(0)
    }

    pub fn peek(&self) -> u8 {
        self.byte_at(0)
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.peek(), b'\r' | b'\n' | 0)
    }

    pub fn advance(&mut self, n: usize) {
        let n = n.min(self.rest.len());
        self.rest = &self.rest[n..];
    }

    /// Advance while the next byte is a space or tab.
    pub fn skip_space(&mut self) {
        let n = self.rest.iter().take_while(|&&b| b == b' ' || b == b'\t').count();
        self.advance(n);
    }

    /// Advance while the next byte is a space, tab, or `\r`. Used between
    /// whitespace-separated tokens on a line that may still carry a
    /// trailing `\r` (e.g. if a caller fed in un-normalized text).
    pub fn skip_space_tab_cr(&mut self) {
        let n = self.rest.iter().take_while(|&&b| matches!(b, b' ' | b'\t' | b'\r')).count();
        self.advance(n);
    }

    /// Advance past leading space, then consume until space/tab/`\r`/NUL.
    /// Returns the consumed range as a string (empty if nothing was there).
    pub fn read_word(&mut self) -> &'a str {
        self.skip_space();
        let n = self.rest.iter().take_while(|&&b| !matches!(b, b' ' | b'\t' | b'\r' | 0)).count();
        let word = &self.rest[..n];
        self.advance(n);
        std::str::from_utf8(word).unwrap_or("")
    }

    /// `read_word` and decode as a float, `atof`-style: as much of a leading
    /// numeric prefix as can be parsed, falling back to `default` for an
    /// empty word or one with no numeric prefix at all.
    pub fn parse_real(&mut self, default: f32) -> f32 {
        let word = self.read_word();
        if word.is_empty() {
            return default;
        }
        parse_float_prefix(word).unwrap_or(default)
    }

    pub fn parse_vec2(&mut self, dx: f32, dy: f32) -> Vec2 {
        Vec2 { x: self.parse_real(dx), y: self.parse_real(dy) }
    }

    pub fn parse_vec3(&mut self, dx: f32, dy: f32, dz: f32) -> Vec3 {
        Vec3 { x: self.parse_real(dx), y: self.parse_real(dy), z: self.parse_real(dz) }
    }

    pub fn parse_vec4(&mut self, dx: f32, dy: f32, dz: f32, dw: f32) -> Vec4 {
        Vec4 {
            x: self.parse_real(dx),
            y: self.parse_real(dy),
            z: self.parse_real(dz),
            w: self.parse_real(dw),
        }
    }

    /// Skip space, parse a leading signed integer, and advance past it.
    /// Yields `0` if nothing numeric is there, matching `atoi`.
    pub fn parse_int(&mut self) -> i32 {
        self.skip_space();
        let (value, consumed) = atoi_prefix(self.rest);
        self.advance(consumed);
        value
    }

    /// Like [`Cursor::parse_int`] but only computes the value; the cursor
    /// is left untouched. Used by the index parser, which advances by a
    /// different rule (to the next delimiter, not just past the digits).
    pub fn peek_int(&self) -> i32 {
        atoi_prefix(self.rest).0
    }

    /// Advance until the next byte is NUL or one of `delims`.
    pub fn skip_to_any(&mut self, delims: &[u8]) {
        let n = self.rest.iter().take_while(|&&b| b != 0 && !delims.contains(&b)).count();
        self.advance(n);
    }

    /// `"on"` -> true, `"off"` -> false, anything else -> `default`. The
    /// word is consumed either way.
    pub fn parse_on_off(&mut self, default: bool) -> bool {
        self.skip_space();
        let n = self.rest.iter().take_while(|&&b| !matches!(b, b' ' | b'\t' | b'\r' | 0)).count();
        let ret = if self.rest.starts_with(b"on") {
            true
        } else if self.rest.starts_with(b"off") {
            false
        } else {
            default
        };
        self.advance(n);
        ret
    }

    /// If the remainder starts with `prefix` followed by a space or tab,
    /// returns a cursor positioned right after `prefix` (the separating
    /// space is left for the caller's next `skip_space`/`read_word`).
    pub fn strip_prefix_with_space(&self, prefix: &[u8]) -> Option<Cursor<'a>> {
        if self.rest.len() > prefix.len()
            && &self.rest[..prefix.len()] == prefix
            && matches!(self.rest[prefix.len()], b' ' | b'\t')
        {
            Some(Cursor { rest: &self.rest[prefix.len()..] })
        } else {
            None
        }
    }

    /// Take the remainder up to (not including) any newline, split on any
    /// byte in `delims`, and drop empty tokens. Each surviving token is
    /// further reduced to its basename (everything after the final `/` or
    /// `\`).
    pub fn read_rest_split(&self, delims: &[u8]) -> Vec<String> {
        let end = self.rest.iter().take_while(|&&b| b != b'\r' && b != b'\n' && b != 0).count();
        let text = std::str::from_utf8(&self.rest[..end]).unwrap_or("");
        text.split(|c: char| delims.contains(&(c as u8)))
            .filter(|tok| !tok.is_empty())
            .map(basename)
            .collect()
    }
}

fn basename(s: &str) -> String {
    match s.rfind(['\\', '/']) {
        Some(i) => s[i + 1..].to_string(),
        None => s.to_string(),
    }
}

/// Parses a signed integer from a leading prefix of `bytes`, `atoi`-style:
/// an optional sign, then as many digits as are there. Non-numeric input
/// parses as `0` with zero bytes consumed.
fn atoi_prefix(bytes: &[u8]) -> (i32, usize) {
    let mut i = 0;
    let mut neg = false;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        neg = bytes[i] == b'-';
        i += 1;
    }
    let digits_start = i;
    let mut value: i64 = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        value = value * 10 + (bytes[i] - b'0') as i64;
        i += 1;
    }
    if i == digits_start {
        // No digits at all: atoi's "no number here" case, nothing consumed.
        return (0, 0);
    }
    let value = if neg { -value } else { value };
    (value.clamp(i32::MIN as i64, i32::MAX as i64) as i32, i)
}

/// Parses as much of a leading decimal float (optional sign, digits,
/// optional fraction, optional exponent) as is valid, `atof`-style.
/// Returns `None` if no numeric prefix exists at all.
fn parse_float_prefix(s: &str) -> Option<f32> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mut saw_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        saw_digit = true;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return None;
    }
    let mantissa_end = i;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits_start {
            i = j;
        } else {
            i = mantissa_end;
        }
    }
    s[..i].parse::<f32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_word_skips_leading_space() {
        let mut c = Cursor::new(b"   hello world");
        assert_eq!(c.read_word(), "hello");
        assert_eq!(c.read_word(), "world");
    }

    #[test]
    fn parse_real_uses_default_when_empty() {
        let mut c = Cursor::new(b"");
        assert_eq!(c.parse_real(5.0), 5.0);
    }

    #[test]
    fn parse_real_parses_malformed_prefix() {
        let mut c = Cursor::new(b"1.5abc 2.0");
        assert_eq!(c.parse_real(0.0), 1.5);
        assert_eq!(c.parse_real(0.0), 2.0);
    }

    #[test]
    fn parse_real_reads_each_word_independently() {
        let mut c = Cursor::new(b"1.5 2.0 3.0");
        assert_eq!(c.parse_real(0.0), 1.5);
        assert_eq!(c.parse_real(0.0), 2.0);
        assert_eq!(c.parse_real(0.0), 3.0);
    }

    #[test]
    fn parse_int_basic() {
        let mut c = Cursor::new(b"  -42 rest");
        assert_eq!(c.parse_int(), -42);
        assert_eq!(c.read_word(), "rest");
    }

    #[test]
    fn parse_on_off_prefix_match() {
        let mut c = Cursor::new(b"on");
        assert!(c.parse_on_off(false));
        let mut c = Cursor::new(b"off");
        assert!(!c.parse_on_off(true));
        let mut c = Cursor::new(b"whatever");
        assert!(c.parse_on_off(true));
    }

    #[test]
    fn strip_prefix_with_space_requires_boundary() {
        let c = Cursor::new(b"Kaa 1 2 3");
        assert!(c.strip_prefix_with_space(b"Ka").is_none());
        let c = Cursor::new(b"Ka 1 2 3");
        assert!(c.strip_prefix_with_space(b"Ka").is_some());
    }

    #[test]
    fn read_rest_split_strips_basename() {
        let c = Cursor::new(b"a.mtl dir/b.mtl win\\c.mtl");
        assert_eq!(c.read_rest_split(b" "), vec!["a.mtl", "b.mtl", "c.mtl"]);
    }
}

//! Line-at-a-time reader over a byte stream.
//!
//! Normalizes `\n`, `\r`, and `\r\n` line endings; the terminator is never
//! part of the returned line. Does not interpret line content.

use std::io::{self, Read};

const BUF_SIZE: usize = 8 * 1024;

pub(crate) struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    pos: usize,
    len: usize,
    eof: bool,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        LineReader { reader, buf: vec![0u8; BUF_SIZE], pos: 0, len: 0, eof: false }
    }

    fn fill(&mut self) -> io::Result<bool> {
        if self.pos < self.len {
            return Ok(true);
        }
        if self.eof {
            return Ok(false);
        }
        self.len = self.reader.read(&mut self.buf)?;
        self.pos = 0;
        if self.len == 0 {
            self.eof = true;
            return Ok(false);
        }
        Ok(true)
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if !self.fill()? {
            return Ok(None);
        }
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(b))
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(Some(self.buf[self.pos]))
    }

    /// Reads one logical line, consuming its terminator.
    ///
    /// Returns `Ok(None)` once no bytes remain. If the stream ends without a
    /// trailing terminator, whatever was accumulated is returned as one
    /// final line before the next call signals EOF.
    pub fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut saw_any = false;
        loop {
            match self.next_byte()? {
                None => return if saw_any { Ok(Some(line)) } else { Ok(None) },
                Some(b'\n') => return Ok(Some(line)),
                Some(b'\r') => {
                    if self.peek_byte()? == Some(b'\n') {
                        self.next_byte()?;
                    }
                    return Ok(Some(line));
                }
                Some(b) => {
                    saw_any = true;
                    line.push(b);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(input: &[u8]) -> Vec<Vec<u8>> {
        let mut reader = LineReader::new(input);
        let mut out = Vec::new();
        while let Some(line) = reader.read_line().unwrap() {
            out.push(line);
        }
        out
    }

    #[test]
    fn handles_lf() {
        assert_eq!(lines_of(b"a\nb\nc"), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(lines_of(b"a\r\nb\r\n"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn handles_lone_cr() {
        assert_eq!(lines_of(b"a\rb\rc"), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn handles_trailing_line_without_terminator() {
        assert_eq!(lines_of(b"a\nb"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(lines_of(b"").is_empty());
    }

    #[test]
    fn trailing_terminator_yields_no_extra_empty_line() {
        assert_eq!(lines_of(b"a\n"), vec![b"a".to_vec()]);
    }
}

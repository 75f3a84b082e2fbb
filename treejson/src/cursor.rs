// SPDX-License-Identifier: Apache-2.0

/// A cursor over the input document bytes.
///
/// Bundles the data slice and the current position, which are always used
/// together. The cursor only ever moves forward; the parser never backtracks
/// past a successfully consumed token.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    /// Current byte offset into the input.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The whole input slice, for error-position reporting and token slicing.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Look at the current byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consume and return the current byte.
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Consume the current byte if it equals `expected`.
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor forward by `n` bytes, clamped to the end of input.
    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Skip JSON insignificant whitespace: space, tab, CR, LF.
    pub fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// True once every input byte has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_and_offset() {
        let mut cursor = Cursor::new(b"ab");
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.bump(), Some(b'a'));
        assert_eq!(cursor.bump(), Some(b'b'));
        assert_eq!(cursor.offset(), 2);
        assert!(cursor.at_end());
        assert_eq!(cursor.bump(), None);
        // Offset stays at the end; bump past the end does not move it.
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_eat_only_consumes_on_match() {
        let mut cursor = Cursor::new(b"[1]");
        assert!(cursor.eat(b'['));
        assert!(!cursor.eat(b']'));
        assert_eq!(cursor.peek(), Some(b'1'));
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(b" \t\r\n null");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some(b'n'));

        let mut empty = Cursor::new(b"   ");
        empty.skip_whitespace();
        assert!(empty.at_end());
    }

    #[test]
    fn test_advance_clamps_to_end() {
        let mut cursor = Cursor::new(b"abc");
        cursor.advance(100);
        assert_eq!(cursor.offset(), 3);
        assert!(cursor.at_end());
    }
}

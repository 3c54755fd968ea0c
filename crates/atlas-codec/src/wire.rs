// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Little-endian word writer and reader.
use crate::error::DecodeError;

/// Size of one stream word in bytes.
pub const WORD_SIZE: usize = 4;

/// Deterministic writer for little-endian `i32` words.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Create a writer with room for `words` words.
    #[must_use]
    pub fn with_capacity(words: usize) -> Self {
        Self {
            buf: Vec::with_capacity(words.saturating_mul(WORD_SIZE)),
        }
    }

    /// Write a little-endian i32.
    pub fn write_i32_le(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Reader for little-endian `i32` words.
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a whole-word byte slice.
    ///
    /// # Errors
    /// [`DecodeError::Truncated`] when the slice ends inside a word.
    pub fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        if bytes.len() % WORD_SIZE != 0 {
            return Err(DecodeError::Truncated { len: bytes.len() });
        }
        Ok(Self { bytes, offset: 0 })
    }

    /// Byte offset of the next word.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read the next word, or `None` at the end of the stream.
    pub fn read_i32_le(&mut self) -> Option<i32> {
        let chunk = self.bytes.get(self.offset..self.offset + WORD_SIZE)?;
        let raw: [u8; WORD_SIZE] = chunk.try_into().ok()?;
        self.offset += WORD_SIZE;
        Some(i32::from_le_bytes(raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn words_are_little_endian() {
        let mut w = Writer::with_capacity(2);
        w.write_i32_le(-1);
        w.write_i32_le(258);
        assert_eq!(w.len(), 8);
        let bytes = w.into_vec();
        assert_eq!(bytes, [0xff, 0xff, 0xff, 0xff, 0x02, 0x01, 0x00, 0x00]);

        let mut r = Reader::new(&bytes).unwrap();
        assert_eq!(r.read_i32_le(), Some(-1));
        assert_eq!(r.offset(), 4);
        assert_eq!(r.read_i32_le(), Some(258));
        assert_eq!(r.read_i32_le(), None);
    }

    #[test]
    fn partial_word_is_rejected() {
        assert_eq!(
            Reader::new(&[1, 2, 3]).unwrap_err(),
            DecodeError::Truncated { len: 3 }
        );
    }
}

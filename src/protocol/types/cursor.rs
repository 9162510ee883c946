use std::borrow::Cow;

use bytes::{BufMut, Bytes, BytesMut};

use super::varint;
use crate::protocol::message::DecodeError;

/// How string bytes are turned into a `String` on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StringMode {
    /// Invalid UTF-8 is an error.
    #[default]
    Strict,
    /// Invalid sequences become U+FFFD.
    Lossy,
    /// Lossy, and control characters other than tab, newline and carriage
    /// return are replaced with a space.
    Sanitized,
}

/// Bounds-checked sequential reader over a borrowed byte slice.
///
/// The position only moves forward. A failed read leaves it where the
/// failure was detected; callers must abandon the buffer rather than retry
/// at another offset.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    mode: StringMode,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_mode(data, StringMode::Strict)
    }

    pub fn with_mode(data: &'a [u8], mode: StringMode) -> Self {
        Self { data, pos: 0, mode }
    }

    pub fn string_mode(&self) -> StringMode {
        self.mode
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn has_remaining(&self) -> bool {
        self.pos < self.data.len()
    }

    /// The unread tail, without consuming it.
    pub fn peek_rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let b = self.peek_u8().ok_or(DecodeError::UnexpectedEof)?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_varint(&mut self) -> Result<i32, DecodeError> {
        varint::decode(self)
    }

    /// Reads exactly `len` bytes. On failure nothing is consumed.
    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof);
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_raw(N)?);
        Ok(out)
    }

    /// Fails with `TrailingBytes` unless every byte was consumed.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if self.has_remaining() {
            return Err(DecodeError::TrailingBytes {
                offset: self.pos,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Consumes everything left.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos..];
        self.pos = self.data.len();
        out
    }

    /// Reads a NUL-terminated string using the cursor's [`StringMode`].
    ///
    /// An unterminated run consumes the rest of the buffer before failing.
    /// Invalid UTF-8 in strict mode fails after the terminator was consumed.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        let raw = self.read_until_nul()?;
        match self.mode {
            StringMode::Strict => std::str::from_utf8(raw)
                .map(str::to_owned)
                .map_err(|_| DecodeError::InvalidUtf8 { offset: start }),
            StringMode::Lossy => Ok(String::from_utf8_lossy(raw).into_owned()),
            StringMode::Sanitized => Ok(sanitize_cc(String::from_utf8_lossy(raw))),
        }
    }

    fn read_until_nul(&mut self) -> Result<&'a [u8], DecodeError> {
        let rest = &self.data[self.pos..];
        match rest.iter().position(|&b| b == 0) {
            Some(nul) => {
                self.pos += nul + 1;
                Ok(&rest[..nul])
            }
            None => {
                self.pos = self.data.len();
                Err(DecodeError::UnterminatedString)
            }
        }
    }
}

fn sanitize_cc(s: Cow<'_, str>) -> String {
    s.chars()
        .map(|c| {
            if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Growable output buffer with the inverse of every [`ByteCursor`] read.
/// Writes never fail.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: BytesMut,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn write_varint(&mut self, v: i32) {
        varint::encode(v, &mut self.buf);
    }

    pub fn write_string(&mut self, s: &str) {
        put_string(&mut self.buf, s);
    }

    pub fn write_raw(&mut self, raw: &[u8]) {
        self.buf.put_slice(raw);
    }

    pub fn as_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

/// Writes `s` up to its first embedded NUL, then the terminator.
pub fn put_string(dst: &mut impl BufMut, s: &str) {
    let bytes = s.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    dst.put_slice(&bytes[..end]);
    dst.put_u8(0);
}

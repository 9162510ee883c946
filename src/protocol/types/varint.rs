//! Signed variable-length integers.
//!
//! ```text
//! first byte:  E S M M M M M M   (E = extension, S = sign, 6 magnitude bits)
//! next bytes:  E M M M M M M M   (7 magnitude bits each, least significant first)
//! ```
//!
//! Negative values store the bitwise complement of the value as magnitude,
//! so every `i32` has exactly one encoding of at most five bytes.

use bytes::BufMut;

use super::ByteCursor;
use crate::protocol::{constants::MAX_VARINT_BYTES, message::DecodeError};

const EXTEND: u8 = 0x80;
const SIGN: u8 = 0x40;

/// Number of bytes `v` packs to.
pub fn encoded_len(v: i32) -> usize {
    let mut m = (v ^ (v >> 31)) as u32 >> 6;
    let mut len = 1;
    while m != 0 {
        m >>= 7;
        len += 1;
    }
    len
}

pub fn encode(v: i32, dst: &mut impl BufMut) {
    let mut m = (v ^ (v >> 31)) as u32;
    let sign = if v < 0 { SIGN } else { 0 };
    let mut b = sign | (m & 0x3f) as u8;
    m >>= 6;
    while m != 0 {
        dst.put_u8(b | EXTEND);
        b = (m & 0x7f) as u8;
        m >>= 7;
    }
    dst.put_u8(b);
}

pub fn decode(src: &mut ByteCursor<'_>) -> Result<i32, DecodeError> {
    let first = src.read_u8()?;
    let negative = first & SIGN != 0;
    let mut m = (first & 0x3f) as u32;
    let mut last = first;
    let mut shift = 6;

    for i in 1..MAX_VARINT_BYTES {
        if last & EXTEND == 0 {
            break;
        }
        let b = src.read_u8()?;
        // Only four magnitude bits fit in the fifth byte.
        if i == MAX_VARINT_BYTES - 1 && b & !0x0f != 0 {
            return Err(DecodeError::MalformedVarint);
        }
        if b == 0 {
            return Err(DecodeError::MalformedVarint);
        }
        m |= ((b & 0x7f) as u32) << shift;
        shift += 7;
        last = b;
    }

    let v = m as i32;
    Ok(if negative { !v } else { v })
}

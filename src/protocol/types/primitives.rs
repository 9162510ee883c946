use bytes::BufMut;

use super::{ByteCursor, Sha256Digest, Token, cursor::put_string, varint};
use crate::protocol::message::{DecodeError, TwEncodable};

impl TwEncodable for i32 {
    fn encode_tw(&self, dst: &mut impl BufMut) {
        varint::encode(*self, dst);
    }

    fn decode_tw(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        src.read_varint()
    }
}

// Booleans travel as packed ints restricted to 0 and 1.
impl TwEncodable for bool {
    fn encode_tw(&self, dst: &mut impl BufMut) {
        varint::encode(*self as i32, dst);
    }

    fn decode_tw(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        match src.read_varint()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::UnknownEnumValue {
                kind: "bool",
                value,
            }),
        }
    }
}

impl TwEncodable for String {
    fn encode_tw(&self, dst: &mut impl BufMut) {
        put_string(dst, self);
    }

    fn decode_tw(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        src.read_string()
    }
}

impl TwEncodable for Token {
    fn encode_tw(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.0);
    }

    fn decode_tw(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Token(src.read_array()?))
    }
}

impl TwEncodable for Sha256Digest {
    fn encode_tw(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.0);
    }

    fn decode_tw(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Sha256Digest(src.read_array()?))
    }
}

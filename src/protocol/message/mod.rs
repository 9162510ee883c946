//! Control, system and game messages.
//!
//! Concrete message types implement a body trait ([`ControlBody`] or
//! [`MessageBody`]) that only knows its own fields. The registry turns
//! those into the public capabilities ([`CtrlMessage`], [`NetMessage`])
//! and into the [`ControlMessage`] / [`GameMessage`] sum types used for
//! dispatch.

pub mod control;
pub mod game;
pub mod system;
mod error;
mod macros;
mod registry;

pub use control::*;
pub use error::{DecodeError, EncodeError};
pub use game::*;
pub use registry::{ControlMessage, GameMessage};
pub use system::*;

use bytes::BufMut;

use crate::protocol::types::{ByteCursor, varint};

/// Trait for types that know how to encode/decode themselves using the
/// packed-int and NUL-string wire format.
pub trait TwEncodable: Sized {
    /// Encode this value into the destination buffer.
    fn encode_tw(&self, dst: &mut impl BufMut);

    /// Decode a value of this type from the cursor.
    fn decode_tw(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError>;
}

/// Capability of every connection-control message.
///
/// `we_are_a_client` selects the client-side wire layout, on both `pack`
/// and `unpack`. Messages only one side ever sends reject the other
/// side's layout on `unpack`.
pub trait CtrlMessage {
    const MESSAGE_TYPE: &'static str = "control";

    fn message_type(&self) -> &'static str {
        Self::MESSAGE_TYPE
    }

    /// Human-readable tag, diagnostics only.
    fn message_name(&self) -> &str;

    /// Id byte that prefixes the body on the wire.
    fn message_id(&self) -> u8;

    /// Serializes the message, id byte first.
    fn pack(&self, we_are_a_client: bool) -> Vec<u8>;

    /// Replaces `self` with the message decoded from `data`, which must be
    /// a complete body as produced by `pack`. Returns `false` and leaves
    /// `self` untouched when `data` is malformed for this variant.
    fn unpack(&mut self, data: &[u8], we_are_a_client: bool) -> bool;
}

/// Capability of every system and game message.
pub trait NetMessage {
    /// `"system"` or `"game"`.
    fn message_type(&self) -> &'static str;

    fn message_name(&self) -> &str;

    fn message_id(&self) -> i32;

    fn is_system(&self) -> bool;

    /// Serializes the message, `(id << 1) | system` header first.
    fn pack(&self) -> Vec<u8>;

    /// Same contract as [`CtrlMessage::unpack`].
    fn unpack(&mut self, data: &[u8]) -> bool;
}

/// Implemented by all concrete control message body types.
pub trait ControlBody: Sized {
    /// The id byte used to identify this message on the wire.
    const ID: u8;

    const NAME: &'static str;

    /// Encode the fields following the id byte.
    fn encode_body(&self, dst: &mut impl BufMut, we_are_a_client: bool);

    /// Decode the fields following the id byte.
    fn decode_body(src: &mut ByteCursor<'_>, we_are_a_client: bool) -> Result<Self, DecodeError>;

    fn encode(&self, dst: &mut impl BufMut, we_are_a_client: bool) {
        dst.put_u8(Self::ID);
        self.encode_body(dst, we_are_a_client);
    }

    /// Decodes a whole body: id byte, fields, and nothing after them.
    fn decode(src: &mut ByteCursor<'_>, we_are_a_client: bool) -> Result<Self, DecodeError> {
        let found = src.read_u8()?;
        if found != Self::ID {
            return Err(DecodeError::IdMismatch {
                expected: Self::ID,
                found,
            });
        }
        let msg = Self::decode_body(src, we_are_a_client)?;
        src.finish()?;
        Ok(msg)
    }
}

/// Implemented by all concrete system and game message body types.
pub trait MessageBody: Sized {
    const ID: i32;

    const NAME: &'static str;

    /// Set for system messages, clear for game messages.
    const SYSTEM: bool;

    fn encode_body(&self, dst: &mut impl BufMut);

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError>;

    fn encode(&self, dst: &mut impl BufMut) {
        varint::encode(message_header(Self::ID, Self::SYSTEM), dst);
        self.encode_body(dst);
    }

    /// Decodes a whole body: header, fields, and nothing after them.
    fn decode(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let (id, system) = read_message_header(src)?;
        if id != Self::ID || system != Self::SYSTEM {
            return Err(DecodeError::HeaderMismatch {
                expected: message_header(Self::ID, Self::SYSTEM),
                found: message_header(id, system),
            });
        }
        let msg = Self::decode_body(src)?;
        src.finish()?;
        Ok(msg)
    }
}

/// Packs a message id and the system flag into the leading packed int.
pub fn message_header(id: i32, system: bool) -> i32 {
    (id << 1) | system as i32
}

/// Reads the leading packed int of a system or game message.
pub fn read_message_header(src: &mut ByteCursor<'_>) -> Result<(i32, bool), DecodeError> {
    let raw = src.read_varint()?;
    if raw < 0 {
        return Err(DecodeError::InvalidMessageHeader(raw));
    }
    Ok((raw >> 1, raw & 1 == 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_splits_id_and_system_flag() {
        assert_eq!(message_header(1, true), 3);
        assert_eq!(message_header(24, false), 48);

        let mut cur = ByteCursor::new(&[0x03]);
        assert_eq!(read_message_header(&mut cur).unwrap(), (1, true));
    }

    #[test]
    fn negative_header_rejected() {
        let mut cur = ByteCursor::new(&[0x40]);
        assert_eq!(
            read_message_header(&mut cur),
            Err(DecodeError::InvalidMessageHeader(-1))
        );
    }
}

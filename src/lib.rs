//! Wire codec for Teeworlds-family UDP game protocols.
//!
//! Control messages ([`protocol::message::CtrlMessage`]), system and game
//! messages ([`protocol::message::NetMessage`]) and the chunk framing that
//! packs several messages into one datagram ([`transport::PacketCodec`]).
//!
//! Everything here is synchronous and allocation-light: `pack` returns an
//! owned buffer and `unpack` only borrows its input for the duration of
//! the call.
//!
//! ```
//! use twnet_codec::protocol::message::{CtrlConnect, CtrlMessage};
//!
//! let body = CtrlConnect::default().pack(true);
//! assert_eq!(body[0], 0x01);
//!
//! let mut msg = CtrlConnect::default();
//! assert!(msg.unpack(&body, true));
//! assert!(!msg.unpack(&body, false));
//! ```

pub mod protocol;
pub mod transport;

pub use protocol::message::{
    ControlMessage, CtrlMessage, DecodeError, EncodeError, GameMessage, NetMessage,
};
pub use transport::{Chunk, ChunkHeader, CodecConfig, Dispatcher, PacketCodec, ProtocolVersion};

//! Chunk framing and dispatch on top of the message codecs.
//!
//! This module exposes:
//! - `ChunkHeader` / `Chunk` for framing a single message.
//! - `PacketCodec` for the chunk region of a whole UDP payload.
//! - `Dispatcher` for turning received bytes into typed messages while
//!   skipping the ones that are malformed.
//!
//! Sockets, the connection-layer packet header, acks and resends belong
//! to the caller.

mod chunk;
mod config;
pub mod dispatch;
pub mod packet;

pub use chunk::{Chunk, ChunkHeader};
pub use config::{CodecConfig, ProtocolVersion};
pub use dispatch::{DispatchStats, Dispatcher, Received};
pub use packet::{PacketCodec, pack_packet, unpack_packet};

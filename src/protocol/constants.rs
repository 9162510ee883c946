use bitflags::bitflags;

/// Version string sent in the `Info` system message by 0.7 clients.
pub const NET_VERSION_07: &str = "0.7 802f1be60a05665f";

/// Version string used by 0.6 clients.
pub const NET_VERSION_06: &str = "0.6 626fce9a778df4d4";

/// Largest UDP payload either protocol generation will send or accept.
pub const MAX_PACKET_SIZE: usize = 1400;

/// Size of the connection-layer packet header (flags, ack, chunk count, token).
pub const PACKET_HEADER_SIZE_07: usize = 7;

/// Size of the 0.6 connection-layer packet header (flags, ack, chunk count).
pub const PACKET_HEADER_SIZE_06: usize = 3;

/// Bytes left for chunks once the 0.7 packet header is written.
pub const MAX_PAYLOAD_07: usize = MAX_PACKET_SIZE - PACKET_HEADER_SIZE_07;

/// Bytes left for chunks once the 0.6 packet header is written.
pub const MAX_PAYLOAD_06: usize = MAX_PACKET_SIZE - PACKET_HEADER_SIZE_06;

/// The chunk counter in the packet header is a single byte.
pub const MAX_CHUNKS_PER_PACKET: usize = u8::MAX as usize;

/// Header size of an unreliable chunk.
pub const CHUNK_HEADER_SIZE: usize = 2;

/// Header size of a vital chunk (adds the low sequence byte).
pub const CHUNK_HEADER_SIZE_VITAL: usize = 3;

/// Largest chunk body the 0.7 12-bit size field can describe.
pub const MAX_CHUNK_SIZE_07: usize = (1 << 12) - 1;

/// Largest chunk body the 0.6 10-bit size field can describe.
pub const MAX_CHUNK_SIZE_06: usize = (1 << 10) - 1;

/// Chunk sequence numbers wrap at 10 bits.
pub const MAX_SEQUENCE: u16 = 1 << 10;

/// A packed `i32` never takes more than this many bytes.
pub const MAX_VARINT_BYTES: usize = 5;

/// Connection tokens are four opaque bytes.
pub const TOKEN_SIZE: usize = 4;

/// Zero padding appended after the token in `Connect`, so a spoofed
/// request cannot be amplified by the reply.
pub const CONNECT_PADDING: usize = 508;

/// Zero padding appended after the token in a client-side `Challenge`.
pub const TOKEN_REQUEST_PADDING: usize = 512;

/// Token value used before the peer has handed one out.
pub const TOKEN_UNKNOWN: [u8; TOKEN_SIZE] = [0xff; TOKEN_SIZE];

bitflags! {
    /// Flags carried in the top two bits of a chunk header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct ChunkFlags: u8 {
        /// Reliable, ordered delivery; the header carries a sequence number.
        const VITAL  = 0b01;
        /// This chunk is a retransmission of an earlier vital chunk.
        const RESEND = 0b10;
    }
}

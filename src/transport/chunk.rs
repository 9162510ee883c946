use bytes::{BufMut, Bytes};

use crate::{
    protocol::{
        constants::{CHUNK_HEADER_SIZE, CHUNK_HEADER_SIZE_VITAL, ChunkFlags},
        message::{DecodeError, EncodeError, NetMessage},
        types::{ByteCursor, Sequence},
    },
    transport::ProtocolVersion,
};

/// Frames one message inside a packet.
///
/// # Wire Format (0.7)
///
/// ```text
///  byte 0           byte 1           byte 2 (vital only)
/// +-+-+-----------+---+-----------+-----------------+
/// |R|V| size 11..6|seq| size 5..0 | sequence 7..0   |
/// +-+-+-----------+---+-----------+-----------------+
/// ```
///
/// 0.6 uses a 10-bit size: six high bits in byte 0, four low bits in the
/// low nibble of byte 1 and sequence bits 9..6 in its high nibble.
///
/// The vital flag is not stored separately: a header is vital exactly
/// when it carries a sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    size: usize,
    resend: bool,
    sequence: Option<Sequence>,
}

impl ChunkHeader {
    pub fn new(size: usize, sequence: Option<Sequence>) -> Self {
        Self {
            size,
            resend: false,
            sequence,
        }
    }

    pub fn vital(size: usize, sequence: Sequence) -> Self {
        Self::new(size, Some(sequence))
    }

    pub fn unreliable(size: usize) -> Self {
        Self::new(size, None)
    }

    pub fn with_resend(mut self, resend: bool) -> Self {
        self.resend = resend;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sequence(&self) -> Option<Sequence> {
        self.sequence
    }

    pub fn is_vital(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn is_resend(&self) -> bool {
        self.resend
    }

    pub fn flags(&self) -> ChunkFlags {
        let mut flags = ChunkFlags::empty();
        flags.set(ChunkFlags::VITAL, self.is_vital());
        flags.set(ChunkFlags::RESEND, self.resend);
        flags
    }

    pub fn encoded_len(&self) -> usize {
        if self.is_vital() {
            CHUNK_HEADER_SIZE_VITAL
        } else {
            CHUNK_HEADER_SIZE
        }
    }

    pub fn encode(
        &self,
        dst: &mut impl BufMut,
        version: ProtocolVersion,
    ) -> Result<(), EncodeError> {
        let max = version.max_chunk_size();
        if self.size > max {
            return Err(EncodeError::ChunkTooLarge {
                size: self.size,
                max,
            });
        }
        let size = self.size as u16;
        let seq = self.sequence.map(|s| s.value()).unwrap_or(0);
        let flags = self.flags().bits() << 6;

        let (b0, mut b1) = match version {
            ProtocolVersion::V06 => (flags | ((size >> 4) & 0x3f) as u8, (size & 0x0f) as u8),
            ProtocolVersion::V07 => (flags | ((size >> 6) & 0x3f) as u8, (size & 0x3f) as u8),
        };
        if self.is_vital() {
            b1 |= match version {
                ProtocolVersion::V06 => ((seq >> 2) & 0xf0) as u8,
                ProtocolVersion::V07 => ((seq >> 2) & 0xc0) as u8,
            };
        }

        dst.put_u8(b0);
        dst.put_u8(b1);
        if self.is_vital() {
            dst.put_u8((seq & 0xff) as u8);
        }
        Ok(())
    }

    /// Fails with `TruncatedHeader` without consuming anything when the
    /// cursor holds fewer bytes than the header needs.
    pub fn decode(src: &mut ByteCursor<'_>, version: ProtocolVersion) -> Result<Self, DecodeError> {
        let available = src.remaining();
        let Some(b0) = src.peek_u8() else {
            return Err(DecodeError::TruncatedHeader {
                needed: CHUNK_HEADER_SIZE,
                available,
            });
        };
        let flags = ChunkFlags::from_bits_truncate(b0 >> 6);
        let vital = flags.contains(ChunkFlags::VITAL);
        let needed = if vital {
            CHUNK_HEADER_SIZE_VITAL
        } else {
            CHUNK_HEADER_SIZE
        };
        if available < needed {
            return Err(DecodeError::TruncatedHeader { needed, available });
        }

        let raw = src.read_raw(needed)?;
        let (b0, b1) = (raw[0] as u16, raw[1] as u16);
        let (size, seq_high) = match version {
            ProtocolVersion::V06 => (((b0 & 0x3f) << 4) | (b1 & 0x0f), (b1 & 0xf0) << 2),
            ProtocolVersion::V07 => (((b0 & 0x3f) << 6) | (b1 & 0x3f), (b1 & 0xc0) << 2),
        };
        let sequence = vital.then(|| Sequence::new(seq_high | raw[2] as u16));

        Ok(Self {
            size: size as usize,
            resend: flags.contains(ChunkFlags::RESEND),
            sequence,
        })
    }

    /// Packs with the 0.7 layout.
    pub fn pack(&self) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf, ProtocolVersion::V07)?;
        Ok(buf)
    }

    /// Unpacks with the 0.7 layout.
    pub fn unpack(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Self::decode(src, ProtocolVersion::V07)
    }
}

/// One framed message: header fields plus the raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Present exactly when the chunk is vital.
    pub sequence: Option<Sequence>,
    pub resend: bool,
    pub payload: Bytes,
}

impl Chunk {
    pub fn vital(sequence: Sequence, payload: impl Into<Bytes>) -> Self {
        Self {
            sequence: Some(sequence),
            resend: false,
            payload: payload.into(),
        }
    }

    pub fn unreliable(payload: impl Into<Bytes>) -> Self {
        Self {
            sequence: None,
            resend: false,
            payload: payload.into(),
        }
    }

    /// Packs `msg` into a chunk body; vital when a sequence is given.
    pub fn from_message(msg: &impl NetMessage, sequence: Option<Sequence>) -> Self {
        Self {
            sequence,
            resend: false,
            payload: Bytes::from(msg.pack()),
        }
    }

    pub fn header(&self) -> ChunkHeader {
        ChunkHeader::new(self.payload.len(), self.sequence).with_resend(self.resend)
    }

    pub fn encoded_len(&self) -> usize {
        self.header().encoded_len() + self.payload.len()
    }
}

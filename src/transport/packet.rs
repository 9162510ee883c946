use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    protocol::{
        message::{DecodeError, EncodeError},
        types::ByteCursor,
    },
    transport::{Chunk, ChunkHeader, CodecConfig},
};

/// Composes and decomposes the chunk region of a packet.
///
/// The connection-layer header in front of the chunks (flags, ack,
/// chunk count, token) is not handled here.
#[derive(Debug, Clone, Default)]
pub struct PacketCodec {
    config: CodecConfig,
}

impl PacketCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Bytes `chunks` occupy once framed.
    pub fn encoded_len(chunks: &[Chunk]) -> usize {
        chunks.iter().map(Chunk::encoded_len).sum()
    }

    pub fn pack_packet(&self, chunks: &[Chunk]) -> Result<Bytes, EncodeError> {
        let mut buf = BytesMut::with_capacity(Self::encoded_len(chunks));
        self.pack_packet_into(chunks, &mut buf)?;
        Ok(buf.freeze())
    }

    /// Appends the framed chunks to `dst`. Limits are checked before
    /// anything is written.
    pub fn pack_packet_into(
        &self,
        chunks: &[Chunk],
        dst: &mut impl BufMut,
    ) -> Result<(), EncodeError> {
        if chunks.len() > self.config.max_chunks {
            return Err(EncodeError::TooManyChunks {
                count: chunks.len(),
                max: self.config.max_chunks,
            });
        }
        let size = Self::encoded_len(chunks);
        if size > self.config.max_payload {
            return Err(EncodeError::PacketTooLarge {
                size,
                max: self.config.max_payload,
            });
        }
        let max_chunk = self.config.version.max_chunk_size();
        if let Some(chunk) = chunks.iter().find(|c| c.payload.len() > max_chunk) {
            return Err(EncodeError::ChunkTooLarge {
                size: chunk.payload.len(),
                max: max_chunk,
            });
        }

        for chunk in chunks {
            chunk.header().encode(dst, self.config.version)?;
            dst.put_slice(&chunk.payload);
        }
        Ok(())
    }

    /// Splits a chunk region into chunks. The last chunk must end exactly
    /// at the end of `data`.
    pub fn unpack_packet(&self, data: &[u8]) -> Result<Vec<Chunk>, DecodeError> {
        let mut src = ByteCursor::new(data);
        let mut chunks = Vec::new();
        while src.has_remaining() {
            let offset = src.position();
            let chunk = self.read_chunk(&mut src).map_err(|e| match e {
                DecodeError::TruncatedHeader { available, .. } => DecodeError::TrailingGarbage {
                    offset,
                    remaining: available,
                },
                other => other,
            })?;
            chunks.push(chunk);
        }
        Ok(chunks)
    }

    /// Reads exactly `num_chunks` chunks, as announced by the packet header.
    pub fn unpack_packet_counted(
        &self,
        data: &[u8],
        num_chunks: usize,
    ) -> Result<Vec<Chunk>, DecodeError> {
        let mut src = ByteCursor::new(data);
        let mut chunks = Vec::with_capacity(num_chunks.min(self.config.max_chunks));
        for _ in 0..num_chunks {
            chunks.push(self.read_chunk(&mut src)?);
        }
        if src.has_remaining() {
            return Err(DecodeError::TrailingGarbage {
                offset: src.position(),
                remaining: src.remaining(),
            });
        }
        Ok(chunks)
    }

    fn read_chunk(&self, src: &mut ByteCursor<'_>) -> Result<Chunk, DecodeError> {
        let offset = src.position();
        let header = ChunkHeader::decode(src, self.config.version)?;
        if header.size() > src.remaining() {
            return Err(DecodeError::TrailingGarbage {
                offset,
                remaining: header.encoded_len() + src.remaining(),
            });
        }
        let payload = Bytes::copy_from_slice(src.read_raw(header.size())?);
        Ok(Chunk {
            sequence: header.sequence(),
            resend: header.is_resend(),
            payload,
        })
    }
}

/// [`PacketCodec::pack_packet`] with the default configuration.
pub fn pack_packet(chunks: &[Chunk]) -> Result<Bytes, EncodeError> {
    PacketCodec::default().pack_packet(chunks)
}

/// [`PacketCodec::unpack_packet`] with the default configuration.
pub fn unpack_packet(data: &[u8]) -> Result<Vec<Chunk>, DecodeError> {
    PacketCodec::default().unpack_packet(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{constants::MAX_PAYLOAD_07, types::Sequence};
    use proptest::prelude::*;

    fn sample() -> Vec<Chunk> {
        vec![
            Chunk::vital(Sequence::new(1), &b"\x03hello\0"[..]),
            Chunk::unreliable(&b"\x05"[..]),
            Chunk {
                sequence: Some(Sequence::new(2)),
                resend: true,
                payload: Bytes::new(),
            },
        ]
    }

    #[test]
    fn packet_roundtrip() {
        let chunks = sample();
        let data = pack_packet(&chunks).unwrap();
        assert_eq!(data.len(), PacketCodec::encoded_len(&chunks));
        assert_eq!(unpack_packet(&data).unwrap(), chunks);
    }

    #[test]
    fn empty_packet() {
        assert!(pack_packet(&[]).unwrap().is_empty());
        assert!(unpack_packet(&[]).unwrap().is_empty());
    }

    #[test]
    fn body_overrun_is_trailing_garbage() {
        // Header announces 4 bytes, only 2 follow.
        let data = [0x00, 0x04, 0xaa, 0xbb];
        assert_eq!(
            unpack_packet(&data),
            Err(DecodeError::TrailingGarbage {
                offset: 0,
                remaining: 4
            })
        );
    }

    #[test]
    fn partial_header_after_last_chunk_is_trailing_garbage() {
        let mut data = pack_packet(&sample()).unwrap().to_vec();
        let end = data.len();
        data.push(0x40);
        assert_eq!(
            unpack_packet(&data),
            Err(DecodeError::TrailingGarbage {
                offset: end,
                remaining: 1
            })
        );
    }

    #[test]
    fn counted_unpack() {
        let chunks = sample();
        let data = pack_packet(&chunks).unwrap();
        let codec = PacketCodec::default();
        assert_eq!(codec.unpack_packet_counted(&data, 3).unwrap(), chunks);

        let first_len = chunks[0].encoded_len();
        assert_eq!(
            codec.unpack_packet_counted(&data, 1),
            Err(DecodeError::TrailingGarbage {
                offset: first_len,
                remaining: data.len() - first_len
            })
        );
        assert!(matches!(
            codec.unpack_packet_counted(&data, 4),
            Err(DecodeError::TruncatedHeader { .. })
        ));
    }

    #[test]
    fn limits_enforced() {
        let big = vec![Chunk::unreliable(vec![0u8; MAX_PAYLOAD_07])];
        assert!(matches!(
            pack_packet(&big),
            Err(EncodeError::PacketTooLarge { .. })
        ));

        let codec = PacketCodec::new(CodecConfig::new().max_chunks(2));
        assert_eq!(
            codec.pack_packet(&sample()),
            Err(EncodeError::TooManyChunks { count: 3, max: 2 })
        );
    }

    fn chunk_strategy() -> impl Strategy<Value = Chunk> {
        (
            prop::option::of(0u16..1024),
            any::<bool>(),
            prop::collection::vec(any::<u8>(), 0..64),
        )
            .prop_map(|(seq, resend, payload)| Chunk {
                sequence: seq.map(Sequence::new),
                resend,
                payload: Bytes::from(payload),
            })
    }

    proptest! {
        #[test]
        fn prop_framing_roundtrip(chunks in prop::collection::vec(chunk_strategy(), 1..20)) {
            let data = pack_packet(&chunks).unwrap();
            prop_assert_eq!(unpack_packet(&data).unwrap(), chunks);
        }

        #[test]
        fn prop_prefixes_never_panic(
            chunks in prop::collection::vec(chunk_strategy(), 1..8),
            cut in any::<prop::sample::Index>(),
        ) {
            let data = pack_packet(&chunks).unwrap();
            let len = cut.index(data.len());
            let _ = unpack_packet(&data[..len]);
        }
    }
}

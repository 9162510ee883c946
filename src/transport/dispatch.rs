use tracing::debug;

use crate::{
    protocol::{
        message::{ControlMessage, DecodeError, GameMessage},
        types::ByteCursor,
    },
    transport::{Chunk, ChunkHeader, CodecConfig, PacketCodec},
};

/// Running totals kept by a [`Dispatcher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Messages decoded into a known variant.
    pub decoded: u64,
    /// Well-formed messages with an id this crate does not model.
    pub unknown: u64,
    /// Chunks or control bodies discarded as malformed.
    pub dropped: u64,
    /// Packets whose chunk framing could not be parsed.
    pub malformed_packets: u64,
}

/// A decoded message together with the header of the chunk it came in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    pub header: ChunkHeader,
    pub message: GameMessage,
}

/// Turns received bytes into typed messages.
///
/// A malformed chunk is logged, counted and skipped; its siblings in the
/// same packet are still delivered.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    codec: PacketCodec,
    stats: DispatchStats,
}

impl Dispatcher {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            codec: PacketCodec::new(config),
            stats: DispatchStats::default(),
        }
    }

    pub fn codec(&self) -> &PacketCodec {
        &self.codec
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Decodes the body of a control packet, `None` if it must be dropped.
    pub fn decode_control(&mut self, body: &[u8], we_are_a_client: bool) -> Option<ControlMessage> {
        let mut src = ByteCursor::with_mode(body, self.codec.config().string_mode);
        match ControlMessage::decode(&mut src, we_are_a_client) {
            Ok(msg) => {
                self.stats.decoded += 1;
                Some(msg)
            }
            Err(error) => {
                self.stats.dropped += 1;
                debug!(%error, len = body.len(), we_are_a_client, "dropping control message");
                None
            }
        }
    }

    /// Decodes one chunk body, `None` if it must be dropped.
    pub fn decode_chunk(&mut self, index: usize, chunk: &Chunk) -> Option<GameMessage> {
        let mut src = ByteCursor::with_mode(&chunk.payload, self.codec.config().string_mode);
        match GameMessage::decode(&mut src) {
            Ok(msg) => {
                if msg.is_unknown() {
                    self.stats.unknown += 1;
                } else {
                    self.stats.decoded += 1;
                }
                Some(msg)
            }
            Err(error) => {
                self.stats.dropped += 1;
                debug!(
                    index,
                    sequence = ?chunk.sequence,
                    len = chunk.payload.len(),
                    %error,
                    "dropping malformed chunk"
                );
                None
            }
        }
    }

    pub fn decode_chunks(&mut self, chunks: &[Chunk]) -> Vec<Received> {
        chunks
            .iter()
            .enumerate()
            .filter_map(|(index, chunk)| {
                self.decode_chunk(index, chunk).map(|message| Received {
                    header: chunk.header(),
                    message,
                })
            })
            .collect()
    }

    /// Splits a chunk region and decodes every chunk in it. Framing errors
    /// reject the whole packet, since chunk boundaries can no longer be
    /// trusted.
    pub fn decode_packet(&mut self, data: &[u8]) -> Result<Vec<Received>, DecodeError> {
        let chunks = self.codec.unpack_packet(data).inspect_err(|error| {
            self.stats.malformed_packets += 1;
            debug!(%error, len = data.len(), "dropping packet");
        })?;
        Ok(self.decode_chunks(&chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        message::{CtrlConnect, CtrlMessage, MsgClKill, MsgSvMotd},
        types::{Sequence, StringMode},
    };
    use bytes::Bytes;

    #[test]
    fn bad_chunk_does_not_drop_siblings() {
        let chunks = vec![
            Chunk::from_message(
                &MsgSvMotd {
                    message: "welcome".into(),
                },
                Some(Sequence::new(1)),
            ),
            // sv_motd with an unterminated string
            Chunk::vital(Sequence::new(2), &b"\x02oops"[..]),
            Chunk::unreliable(&b"\x80\x01raw"[..]),
            Chunk::from_message(&MsgClKill, None),
        ];
        let data = PacketCodec::default().pack_packet(&chunks).unwrap();

        let mut dispatcher = Dispatcher::default();
        let received = dispatcher.decode_packet(&data).unwrap();
        assert_eq!(received.len(), 3);
        assert_eq!(received[0].header.sequence(), Some(Sequence::new(1)));
        assert_eq!(
            received[0].message,
            GameMessage::from(MsgSvMotd {
                message: "welcome".into()
            })
        );
        assert!(received[1].message.is_unknown());
        assert_eq!(received[2].message, GameMessage::from(MsgClKill));
        assert_eq!(
            dispatcher.stats(),
            DispatchStats {
                decoded: 2,
                unknown: 1,
                dropped: 1,
                malformed_packets: 0,
            }
        );
    }

    #[test]
    fn framing_error_counts_packet() {
        let mut dispatcher = Dispatcher::default();
        assert!(dispatcher.decode_packet(&[0x00, 0x09, 0x01]).is_err());
        assert_eq!(dispatcher.stats().malformed_packets, 1);
    }

    #[test]
    fn string_mode_applies_to_chunks() {
        let chunk = Chunk::unreliable(Bytes::from_static(b"\x02bad\xff\0"));
        let mut strict = Dispatcher::default();
        assert!(strict.decode_chunk(0, &chunk).is_none());

        let mut lossy = Dispatcher::new(CodecConfig::new().string_mode(StringMode::Lossy));
        let msg = lossy.decode_chunk(0, &chunk).unwrap();
        assert_eq!(
            msg,
            GameMessage::from(MsgSvMotd {
                message: "bad\u{fffd}".into()
            })
        );
    }

    #[test]
    fn control_bodies() {
        let body = CtrlConnect::default().pack(true);
        let mut dispatcher = Dispatcher::default();
        assert!(matches!(
            dispatcher.decode_control(&body, true),
            Some(ControlMessage::CtrlConnect(_))
        ));
        assert!(dispatcher.decode_control(&body, false).is_none());
        assert!(dispatcher.decode_control(&[0x2a], true).is_none());
        assert_eq!(dispatcher.stats().decoded, 1);
        assert_eq!(dispatcher.stats().dropped, 2);
    }
}

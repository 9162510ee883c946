//! Connection-control messages exchanged outside the chunk layer.
//!
//! Handshake: the client sends [`CtrlChallenge`] with its own token, the
//! server answers with its token, the client sends [`CtrlConnect`], the
//! server replies [`CtrlConnectAccept`] and the client confirms with
//! [`CtrlAccept`]. [`CtrlKeepAlive`] and [`CtrlClose`] may come from
//! either side at any time.

use bytes::BufMut;

use crate::protocol::{
    constants::{CONNECT_PADDING, TOKEN_REQUEST_PADDING},
    message::{ControlBody, DecodeError, TwEncodable},
    types::{ByteCursor, Token},
};

fn only_from_client(message: &'static str, we_are_a_client: bool) -> Result<(), DecodeError> {
    if we_are_a_client {
        Ok(())
    } else {
        Err(DecodeError::RoleMismatch {
            message,
            we_are_a_client,
        })
    }
}

fn only_from_server(message: &'static str, we_are_a_client: bool) -> Result<(), DecodeError> {
    if we_are_a_client {
        Err(DecodeError::RoleMismatch {
            message,
            we_are_a_client,
        })
    } else {
        Ok(())
    }
}

/// Padding content is ignored, only its length matters.
fn skip_padding(src: &mut ByteCursor<'_>, expected: usize) -> Result<(), DecodeError> {
    let found = src.read_rest().len();
    if found < expected {
        return Err(DecodeError::InvalidPadding { expected, found });
    }
    Ok(())
}

/// Keeps an idle connection from timing out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtrlKeepAlive;

impl ControlBody for CtrlKeepAlive {
    const ID: u8 = 0x00;
    const NAME: &'static str = "keepalive";

    fn encode_body(&self, _dst: &mut impl BufMut, _we_are_a_client: bool) {}

    fn decode_body(_src: &mut ByteCursor<'_>, _we_are_a_client: bool) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

/// Connection request. Only clients send it; packing ignores the role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtrlConnect {
    /// Token the server must echo in every packet it sends back.
    pub response_token: Token,
}

impl ControlBody for CtrlConnect {
    const ID: u8 = 0x01;
    const NAME: &'static str = "connect";

    fn encode_body(&self, dst: &mut impl BufMut, _we_are_a_client: bool) {
        self.response_token.encode_tw(dst);
        dst.put_bytes(0, CONNECT_PADDING);
    }

    fn decode_body(src: &mut ByteCursor<'_>, we_are_a_client: bool) -> Result<Self, DecodeError> {
        only_from_client(Self::NAME, we_are_a_client)?;
        let response_token = Token::decode_tw(src)?;
        skip_padding(src, CONNECT_PADDING)?;
        Ok(Self { response_token })
    }
}

/// Server's acceptance of a [`CtrlConnect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtrlConnectAccept;

impl ControlBody for CtrlConnectAccept {
    const ID: u8 = 0x02;
    const NAME: &'static str = "connect_accept";

    fn encode_body(&self, _dst: &mut impl BufMut, _we_are_a_client: bool) {}

    fn decode_body(_src: &mut ByteCursor<'_>, we_are_a_client: bool) -> Result<Self, DecodeError> {
        only_from_server(Self::NAME, we_are_a_client)?;
        Ok(Self)
    }
}

/// Client's confirmation that completes the handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtrlAccept;

impl ControlBody for CtrlAccept {
    const ID: u8 = 0x03;
    const NAME: &'static str = "accept";

    fn encode_body(&self, _dst: &mut impl BufMut, _we_are_a_client: bool) {}

    fn decode_body(_src: &mut ByteCursor<'_>, we_are_a_client: bool) -> Result<Self, DecodeError> {
        only_from_client(Self::NAME, we_are_a_client)?;
        Ok(Self)
    }
}

/// Tears the connection down with a reason for the peer's UI.
///
/// The reason is always sent, NUL-terminated; empty means none was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtrlClose {
    pub reason: String,
}

impl ControlBody for CtrlClose {
    const ID: u8 = 0x04;
    const NAME: &'static str = "close";

    fn encode_body(&self, dst: &mut impl BufMut, _we_are_a_client: bool) {
        self.reason.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>, _we_are_a_client: bool) -> Result<Self, DecodeError> {
        Ok(Self {
            reason: String::decode_tw(src)?,
        })
    }
}

/// Token exchange that precedes [`CtrlConnect`].
///
/// The client's request is padded so that the server's short answer can
/// not be used to amplify spoofed traffic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CtrlChallenge {
    pub token: Token,
}

impl ControlBody for CtrlChallenge {
    const ID: u8 = 0x05;
    const NAME: &'static str = "challenge";

    fn encode_body(&self, dst: &mut impl BufMut, we_are_a_client: bool) {
        self.token.encode_tw(dst);
        if we_are_a_client {
            dst.put_bytes(0, TOKEN_REQUEST_PADDING);
        }
    }

    fn decode_body(src: &mut ByteCursor<'_>, we_are_a_client: bool) -> Result<Self, DecodeError> {
        let token = Token::decode_tw(src)?;
        if we_are_a_client {
            skip_padding(src, TOKEN_REQUEST_PADDING)?;
        }
        Ok(Self { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::message::{ControlMessage, CtrlMessage};

    #[test]
    fn connect_as_client() {
        let msg = CtrlConnect {
            response_token: Token::from_u32(0x1234_5678),
        };
        let body = msg.pack(true);
        assert_eq!(body[0], 0x01);
        assert_eq!(&body[1..5], &[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(body.len(), 1 + 4 + CONNECT_PADDING);

        let mut decoded = CtrlConnect::default();
        assert!(decoded.unpack(&body, true));
        assert_eq!(decoded, msg);

        let mut as_server = CtrlConnect::default();
        assert!(!as_server.unpack(&body, false));
        assert_eq!(as_server, CtrlConnect::default());
    }

    #[test]
    fn connect_without_padding_rejected() {
        let body = [0x01, 0xaa, 0xbb, 0xcc, 0xdd];
        let mut cur = ByteCursor::new(&body);
        assert_eq!(
            CtrlConnect::decode(&mut cur, true),
            Err(DecodeError::InvalidPadding {
                expected: CONNECT_PADDING,
                found: 0
            })
        );
    }

    #[test]
    fn challenge_layout_depends_on_role() {
        let msg = CtrlChallenge {
            token: Token::from_u32(7),
        };
        let client = msg.pack(true);
        let server = msg.pack(false);
        assert_eq!(client.len(), 1 + 4 + TOKEN_REQUEST_PADDING);
        assert_eq!(server, [0x05, 0, 0, 0, 7]);

        for (body, role) in [(&client, true), (&server, false)] {
            let mut decoded = CtrlChallenge::default();
            assert!(decoded.unpack(body, role));
            assert_eq!(decoded, msg);
        }

        // A short request must not be answered.
        let mut decoded = CtrlChallenge::default();
        assert!(!decoded.unpack(&server, true));
    }

    #[test]
    fn bytes_after_last_field_rejected() {
        let cases: [(ControlMessage, bool); 6] = [
            (CtrlKeepAlive.into(), true),
            (CtrlKeepAlive.into(), false),
            (CtrlConnectAccept.into(), false),
            (CtrlAccept.into(), true),
            (
                CtrlClose {
                    reason: "bye".into(),
                }
                .into(),
                false,
            ),
            (
                CtrlChallenge {
                    token: Token::from_u32(0x0102_0304),
                }
                .into(),
                false,
            ),
        ];
        for (msg, role) in cases {
            let mut body = msg.pack(role);
            let end = body.len();
            body.extend_from_slice(&[0xde, 0xad, 0xbe]);

            let mut decoded = ControlMessage::from(CtrlKeepAlive);
            assert!(!decoded.unpack(&body, role), "{} role={role}", msg.name());
            assert_eq!(
                ControlMessage::decode(&mut ByteCursor::new(&body), role),
                Err(DecodeError::TrailingBytes {
                    offset: end,
                    remaining: 3
                })
            );
        }

        assert!(!CtrlKeepAlive.unpack(&[0x00, 0xde, 0xad, 0xbe], true));
        assert!(!CtrlConnectAccept.unpack(&[0x02, 0xff], false));
        assert!(!CtrlChallenge::default().unpack(&[0x05, 1, 2, 3, 4, 9, 9, 9], false));
    }

    #[test]
    fn one_sided_messages() {
        assert!(CtrlConnectAccept.unpack(&[0x02], false));
        assert!(!CtrlConnectAccept.unpack(&[0x02], true));
        assert!(CtrlAccept.unpack(&[0x03], true));
        assert!(!CtrlAccept.unpack(&[0x03], false));
    }

    #[test]
    fn close_reason_roundtrip() {
        for reason in ["", "kicked by vote"] {
            let msg = CtrlClose {
                reason: reason.into(),
            };
            for role in [true, false] {
                let body = msg.pack(role);
                let mut decoded = CtrlClose::default();
                assert!(decoded.unpack(&body, role));
                assert_eq!(decoded, msg);
            }
        }
        assert_eq!(CtrlClose::default().pack(true), [0x04, 0x00]);
    }

    #[test]
    fn close_without_reason_terminator_rejected() {
        let mut msg = CtrlClose::default();
        assert!(!msg.unpack(&[0x04], false));
    }

    #[test]
    fn close_with_unterminated_reason_rejected() {
        let mut msg = CtrlClose::default();
        assert!(!msg.unpack(b"\x04timeout", false));
    }

    #[test]
    fn wrong_id_rejected() {
        let mut msg = CtrlKeepAlive;
        assert!(!msg.unpack(&[0x04], true));
        assert!(!msg.unpack(&[], true));
    }

    #[test]
    fn enum_dispatch_by_id() {
        let body = CtrlChallenge {
            token: Token::from_u32(9),
        }
        .pack(false);
        let mut cur = ByteCursor::new(&body);
        let msg = ControlMessage::decode(&mut cur, false).unwrap();
        assert_eq!(msg.name(), "challenge");
        assert_eq!(msg.message_type(), "control");
        assert_eq!(msg.pack(false), body);

        let mut cur = ByteCursor::new(&[0x06]);
        assert_eq!(
            ControlMessage::decode(&mut cur, true),
            Err(DecodeError::UnknownControlId(6))
        );
    }

    #[test]
    fn proper_prefixes_rejected() {
        let all: [(ControlMessage, bool); 7] = [
            (CtrlKeepAlive.into(), true),
            (CtrlConnect::default().into(), true),
            (CtrlConnectAccept.into(), false),
            (CtrlAccept.into(), true),
            (
                CtrlClose {
                    reason: "bye".into(),
                }
                .into(),
                false,
            ),
            (CtrlChallenge::default().into(), true),
            (CtrlChallenge::default().into(), false),
        ];
        for (msg, role) in all {
            let body = msg.pack(role);
            for len in 0..body.len() {
                let mut decoded = ControlMessage::from(CtrlKeepAlive);
                assert!(
                    !decoded.unpack(&body[..len], role),
                    "{} prefix {len}",
                    msg.name()
                );
                assert_eq!(decoded, ControlMessage::from(CtrlKeepAlive));
            }
            let mut decoded = ControlMessage::from(CtrlKeepAlive);
            assert!(decoded.unpack(&body, role));
            assert_eq!(decoded, msg);
        }
    }
}

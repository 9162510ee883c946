//! Game messages: chat, teams, emoticons and other gameplay events.
//! `Sv*` messages are sent by the server, `Cl*` by the client.

use bytes::BufMut;

use crate::protocol::{
    enums::{ChatMode, Emoticon, Team, Weapon},
    message::{DecodeError, MessageBody, TwEncodable},
    types::ByteCursor,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvMotd {
    pub message: String,
}

impl MessageBody for MsgSvMotd {
    const ID: i32 = 1;
    const NAME: &'static str = "sv_motd";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.message.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            message: String::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvBroadcast {
    pub message: String,
}

impl MessageBody for MsgSvBroadcast {
    const ID: i32 = 2;
    const NAME: &'static str = "sv_broadcast";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.message.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            message: String::decode_tw(src)?,
        })
    }
}

/// A chat line. `client_id` is `-1` for server messages; `target_id` is
/// only meaningful for whispers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvChat {
    pub mode: ChatMode,
    pub client_id: i32,
    pub target_id: i32,
    pub message: String,
}

impl MessageBody for MsgSvChat {
    const ID: i32 = 3;
    const NAME: &'static str = "sv_chat";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.mode.encode_tw(dst);
        self.client_id.encode_tw(dst);
        self.target_id.encode_tw(dst);
        self.message.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mode: ChatMode::decode_tw(src)?,
            client_id: i32::decode_tw(src)?,
            target_id: i32::decode_tw(src)?,
            message: String::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvTeam {
    pub client_id: i32,
    pub team: Team,
    pub silent: bool,
    pub cooldown_tick: i32,
}

impl MessageBody for MsgSvTeam {
    const ID: i32 = 4;
    const NAME: &'static str = "sv_team";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.client_id.encode_tw(dst);
        self.team.encode_tw(dst);
        self.silent.encode_tw(dst);
        self.cooldown_tick.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            client_id: i32::decode_tw(src)?,
            team: Team::decode_tw(src)?,
            silent: bool::decode_tw(src)?,
            cooldown_tick: i32::decode_tw(src)?,
        })
    }
}

/// `weapon` is a plain int: negative values mark world kills and suicides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvKillMsg {
    pub killer: i32,
    pub victim: i32,
    pub weapon: i32,
    pub mode_special: i32,
}

impl MessageBody for MsgSvKillMsg {
    const ID: i32 = 5;
    const NAME: &'static str = "sv_kill_msg";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.killer.encode_tw(dst);
        self.victim.encode_tw(dst);
        self.weapon.encode_tw(dst);
        self.mode_special.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            killer: i32::decode_tw(src)?,
            victim: i32::decode_tw(src)?,
            weapon: i32::decode_tw(src)?,
            mode_special: i32::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvReadyToEnter;

impl MessageBody for MsgSvReadyToEnter {
    const ID: i32 = 8;
    const NAME: &'static str = "sv_ready_to_enter";
    const SYSTEM: bool = false;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvWeaponPickup {
    pub weapon: Weapon,
}

impl MessageBody for MsgSvWeaponPickup {
    const ID: i32 = 9;
    const NAME: &'static str = "sv_weapon_pickup";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.weapon.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            weapon: Weapon::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvEmoticon {
    pub client_id: i32,
    pub emoticon: Emoticon,
}

impl MessageBody for MsgSvEmoticon {
    const ID: i32 = 10;
    const NAME: &'static str = "sv_emoticon";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.client_id.encode_tw(dst);
        self.emoticon.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            client_id: i32::decode_tw(src)?,
            emoticon: Emoticon::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgSvClientDrop {
    pub client_id: i32,
    pub reason: String,
    pub silent: bool,
}

impl MessageBody for MsgSvClientDrop {
    const ID: i32 = 20;
    const NAME: &'static str = "sv_client_drop";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.client_id.encode_tw(dst);
        self.reason.encode_tw(dst);
        self.silent.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            client_id: i32::decode_tw(src)?,
            reason: String::decode_tw(src)?,
            silent: bool::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgClSay {
    pub mode: ChatMode,
    pub target: i32,
    pub message: String,
}

impl MessageBody for MsgClSay {
    const ID: i32 = 24;
    const NAME: &'static str = "cl_say";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.mode.encode_tw(dst);
        self.target.encode_tw(dst);
        self.message.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            mode: ChatMode::decode_tw(src)?,
            target: i32::decode_tw(src)?,
            message: String::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgClSetTeam {
    pub team: Team,
}

impl MessageBody for MsgClSetTeam {
    const ID: i32 = 25;
    const NAME: &'static str = "cl_set_team";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.team.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            team: Team::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgClKill;

impl MessageBody for MsgClKill {
    const ID: i32 = 28;
    const NAME: &'static str = "cl_kill";
    const SYSTEM: bool = false;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgClEmoticon {
    pub emoticon: Emoticon,
}

impl MessageBody for MsgClEmoticon {
    const ID: i32 = 30;
    const NAME: &'static str = "cl_emoticon";
    const SYSTEM: bool = false;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.emoticon.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            emoticon: Emoticon::decode_tw(src)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::message::{GameMessage, NetMessage};

    #[test]
    fn chat_wire_layout() {
        let msg = MsgSvChat {
            mode: ChatMode::All,
            client_id: -1,
            target_id: -1,
            message: "hello".into(),
        };
        assert_eq!(msg.pack(), b"\x06\x01\x40\x40hello\0");
        assert_eq!(msg.message_type(), "game");
        assert_eq!(msg.message_id(), 3);
    }

    #[test]
    fn enum_dispatch_by_header() {
        let msgs: Vec<GameMessage> = vec![
            MsgClSay {
                mode: ChatMode::Whisper,
                target: 3,
                message: "gg".into(),
            }
            .into(),
            MsgSvTeam {
                client_id: 2,
                team: Team::Blue,
                silent: true,
                cooldown_tick: 150,
            }
            .into(),
            MsgSvKillMsg {
                killer: 0,
                victim: 1,
                weapon: -3,
                mode_special: 0,
            }
            .into(),
            MsgClKill.into(),
            MsgSvEmoticon {
                client_id: 5,
                emoticon: Emoticon::Question,
            }
            .into(),
        ];
        for msg in msgs {
            let body = msg.pack();
            let mut cur = ByteCursor::new(&body);
            assert_eq!(GameMessage::decode(&mut cur).unwrap(), msg);
        }
    }

    #[test]
    fn unknown_id_kept_as_raw_payload() {
        let body = b"\x80\x01abc";
        let mut cur = ByteCursor::new(body);
        let msg = GameMessage::decode(&mut cur).unwrap();
        assert_eq!(
            msg,
            GameMessage::Unknown {
                id: 32,
                system: false,
                payload: bytes::Bytes::from_static(b"abc"),
            }
        );
        assert!(msg.is_unknown());
        assert_eq!(msg.pack(), body);
    }

    #[test]
    fn bad_enum_value_rejected() {
        // cl_set_team with team 7
        let mut msg = MsgClSetTeam::default();
        assert!(!msg.unpack(&[0x32, 0x07]));
    }

    #[test]
    fn junk_after_fields_rejected() {
        let mut body = MsgClKill.pack();
        body.extend_from_slice(b"junk");
        let mut msg = GameMessage::from(MsgClKill);
        assert!(!msg.unpack(&body));
        assert!(!MsgClKill.unpack(&body));

        let mut cur = ByteCursor::new(&body);
        assert_eq!(
            GameMessage::decode(&mut cur),
            Err(DecodeError::TrailingBytes {
                offset: 1,
                remaining: 4
            })
        );
    }
}

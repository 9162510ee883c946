//! System messages: connection setup, map download, rcon and ping
//! messages. Sent inside chunks with the system flag set.

use bytes::BufMut;

use crate::protocol::{
    constants::NET_VERSION_07,
    message::{DecodeError, MessageBody, TwEncodable},
    types::{ByteCursor, Sha256Digest},
};

/// First message of a client after the handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgInfo {
    pub version: String,
    pub password: String,
    pub client_version: i32,
}

impl Default for MsgInfo {
    fn default() -> Self {
        Self {
            version: NET_VERSION_07.to_owned(),
            password: String::new(),
            client_version: 0x0705,
        }
    }
}

impl MessageBody for MsgInfo {
    const ID: i32 = 1;
    const NAME: &'static str = "info";
    const SYSTEM: bool = true;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.version.encode_tw(dst);
        self.password.encode_tw(dst);
        self.client_version.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            version: String::decode_tw(src)?,
            password: String::decode_tw(src)?,
            client_version: i32::decode_tw(src)?,
        })
    }
}

/// Tells the client which map to load and how it will be transferred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgMapChange {
    pub name: String,
    pub crc: i32,
    pub size: i32,
    pub chunk_num: i32,
    pub chunk_size: i32,
    pub sha256: Sha256Digest,
}

impl MessageBody for MsgMapChange {
    const ID: i32 = 2;
    const NAME: &'static str = "map_change";
    const SYSTEM: bool = true;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.name.encode_tw(dst);
        self.crc.encode_tw(dst);
        self.size.encode_tw(dst);
        self.chunk_num.encode_tw(dst);
        self.chunk_size.encode_tw(dst);
        self.sha256.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            name: String::decode_tw(src)?,
            crc: i32::decode_tw(src)?,
            size: i32::decode_tw(src)?,
            chunk_num: i32::decode_tw(src)?,
            chunk_size: i32::decode_tw(src)?,
            sha256: Sha256Digest::decode_tw(src)?,
        })
    }
}

/// One slice of the map file, answering a [`MsgRequestMapData`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgMapData {
    /// Set on the final slice.
    pub last: bool,
    pub crc: i32,
    pub chunk: i32,
    pub data: Vec<u8>,
}

impl MessageBody for MsgMapData {
    const ID: i32 = 3;
    const NAME: &'static str = "map_data";
    const SYSTEM: bool = true;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.last.encode_tw(dst);
        self.crc.encode_tw(dst);
        self.chunk.encode_tw(dst);
        (self.data.len() as i32).encode_tw(dst);
        dst.put_slice(&self.data);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        let last = bool::decode_tw(src)?;
        let crc = i32::decode_tw(src)?;
        let chunk = i32::decode_tw(src)?;
        let size = i32::decode_tw(src)?;
        let size = usize::try_from(size).map_err(|_| DecodeError::InvalidLength(size))?;
        Ok(Self {
            last,
            crc,
            chunk,
            data: src.read_raw(size)?.to_vec(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgConReady;

impl MessageBody for MsgConReady {
    const ID: i32 = 5;
    const NAME: &'static str = "con_ready";
    const SYSTEM: bool = true;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

/// Server feedback on how early the client's inputs arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgInputTiming {
    pub intended_tick: i32,
    pub time_left: i32,
}

impl MessageBody for MsgInputTiming {
    const ID: i32 = 10;
    const NAME: &'static str = "input_timing";
    const SYSTEM: bool = true;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.intended_tick.encode_tw(dst);
        self.time_left.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            intended_tick: i32::decode_tw(src)?,
            time_left: i32::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgRconLine {
    pub line: String,
}

impl MessageBody for MsgRconLine {
    const ID: i32 = 13;
    const NAME: &'static str = "rcon_line";
    const SYSTEM: bool = true;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.line.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            line: String::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgReady;

impl MessageBody for MsgReady {
    const ID: i32 = 18;
    const NAME: &'static str = "ready";
    const SYSTEM: bool = true;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgEnterGame;

impl MessageBody for MsgEnterGame {
    const ID: i32 = 19;
    const NAME: &'static str = "enter_game";
    const SYSTEM: bool = true;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgRconCmd {
    pub command: String,
}

impl MessageBody for MsgRconCmd {
    const ID: i32 = 21;
    const NAME: &'static str = "rcon_cmd";
    const SYSTEM: bool = true;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.command.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            command: String::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgRconAuth {
    pub password: String,
}

impl MessageBody for MsgRconAuth {
    const ID: i32 = 22;
    const NAME: &'static str = "rcon_auth";
    const SYSTEM: bool = true;

    fn encode_body(&self, dst: &mut impl BufMut) {
        self.password.encode_tw(dst);
    }

    fn decode_body(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            password: String::decode_tw(src)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgRequestMapData;

impl MessageBody for MsgRequestMapData {
    const ID: i32 = 23;
    const NAME: &'static str = "request_map_data";
    const SYSTEM: bool = true;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgPing;

impl MessageBody for MsgPing {
    const ID: i32 = 26;
    const NAME: &'static str = "ping";
    const SYSTEM: bool = true;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgPingReply;

impl MessageBody for MsgPingReply {
    const ID: i32 = 27;
    const NAME: &'static str = "ping_reply";
    const SYSTEM: bool = true;

    fn encode_body(&self, _dst: &mut impl BufMut) {}

    fn decode_body(_src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
        Ok(Self)
    }
}

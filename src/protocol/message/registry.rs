use bytes::{BufMut, Bytes, BytesMut};

use super::{
    ControlBody, CtrlMessage, DecodeError, MessageBody, NetMessage,
    macros::{define_control_messages, define_game_messages},
    message_header, read_message_header,
};
use crate::protocol::{
    message::{control::*, game::*, system::*},
    types::{ByteCursor, varint},
};

define_control_messages! {
    CtrlKeepAlive,
    CtrlConnect,
    CtrlConnectAccept,
    CtrlAccept,
    CtrlClose,
    CtrlChallenge,
}

define_game_messages! {
    MsgInfo,
    MsgMapChange,
    MsgMapData,
    MsgConReady,
    MsgInputTiming,
    MsgRconLine,
    MsgReady,
    MsgEnterGame,
    MsgRconCmd,
    MsgRconAuth,
    MsgRequestMapData,
    MsgPing,
    MsgPingReply,
    MsgSvMotd,
    MsgSvBroadcast,
    MsgSvChat,
    MsgSvTeam,
    MsgSvKillMsg,
    MsgSvReadyToEnter,
    MsgSvWeaponPickup,
    MsgSvEmoticon,
    MsgSvClientDrop,
    MsgClSay,
    MsgClSetTeam,
    MsgClKill,
    MsgClEmoticon,
}

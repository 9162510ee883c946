//! Integer-backed enums carried inside game messages.

use bytes::BufMut;

use crate::protocol::{
    message::{DecodeError, TwEncodable},
    types::{ByteCursor, varint},
};

/// INTERNAL
/// Declares an `i32`-backed enum that travels as a packed int and
/// rejects values outside the declared set.
macro_rules! varint_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl TryFrom<i32> for $name {
            type Error = DecodeError;

            fn try_from(value: i32) -> Result<Self, DecodeError> {
                match value {
                    $( $value => Ok($name::$variant), )+
                    value => Err(DecodeError::UnknownEnumValue { kind: $kind, value }),
                }
            }
        }

        impl TwEncodable for $name {
            fn encode_tw(&self, dst: &mut impl BufMut) {
                varint::encode(*self as i32, dst);
            }

            fn decode_tw(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
                $name::try_from(src.read_varint()?)
            }
        }
    };
}

varint_enum! {
    /// Audience of a chat line.
    ChatMode as "chat mode" {
        None = 0,
        #[default]
        All = 1,
        Team = 2,
        Whisper = 3,
    }
}

varint_enum! {
    Team as "team" {
        #[default]
        Spectators = -1,
        Red = 0,
        Blue = 1,
    }
}

varint_enum! {
    Emoticon as "emoticon" {
        #[default]
        Oop = 0,
        Exclamation = 1,
        Hearts = 2,
        Drop = 3,
        DotDot = 4,
        Music = 5,
        Sorry = 6,
        Ghost = 7,
        Sushi = 8,
        SplatTee = 9,
        DevilTee = 10,
        Zomg = 11,
        Zzz = 12,
        Wtf = 13,
        Eyes = 14,
        Question = 15,
    }
}

varint_enum! {
    /// Weapon slots. Kill messages use `-1` for world kills, so the
    /// killer weapon is sent as a plain int rather than this enum.
    Weapon as "weapon" {
        #[default]
        Hammer = 0,
        Gun = 1,
        Shotgun = 2,
        Grenade = 3,
        Laser = 4,
        Ninja = 5,
    }
}

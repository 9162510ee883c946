use std::fmt;

use crate::protocol::constants::{TOKEN_SIZE, TOKEN_UNKNOWN};

/// Opaque connection token exchanged during the handshake.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(pub [u8; TOKEN_SIZE]);

impl Token {
    pub const UNKNOWN: Token = Token(TOKEN_UNKNOWN);

    pub fn from_u32(v: u32) -> Token {
        Token(v.to_be_bytes())
    }

    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::UNKNOWN
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:08x})", self.as_u32())
    }
}

/// SHA-256 digest of a map file, sent raw.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sha256Digest(pub [u8; 32]);

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sha256(")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        f.write_str(")")
    }
}

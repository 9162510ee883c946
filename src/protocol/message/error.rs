use thiserror::Error;

/// Errors that may occur while decoding wire values, messages or chunks.
///
/// Every variant is recoverable: the caller drops the offending chunk or
/// packet and carries on with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer did not contain enough bytes to decode the requested value.
    #[error("Unexpected EoF, not enough bytes to read requested type.")]
    UnexpectedEof,

    /// A packed integer kept its extension bit set past the maximum width,
    /// overflowed 32 bits, or was not minimally encoded.
    #[error("Malformed varint.")]
    MalformedVarint,

    /// No NUL terminator before the end of the buffer.
    #[error("String is not NUL-terminated.")]
    UnterminatedString,

    /// String bytes starting at `offset` are not valid UTF-8.
    #[error("String at offset {offset} is not valid UTF-8.")]
    InvalidUtf8 { offset: usize },

    /// Fewer bytes left than the chunk header needs.
    #[error("Truncated chunk header: need {needed} bytes, {available} available.")]
    TruncatedHeader { needed: usize, available: usize },

    /// The last chunk did not end exactly at the end of the packet.
    #[error("Trailing garbage at offset {offset}: {remaining} bytes do not form a chunk.")]
    TrailingGarbage { offset: usize, remaining: usize },

    /// A message body continued past its last field.
    #[error("Trailing bytes at offset {offset}: {remaining} bytes after the last field.")]
    TrailingBytes { offset: usize, remaining: usize },

    /// A length prefix that is negative.
    #[error("Invalid length prefix: {0}")]
    InvalidLength(i32),

    /// A control message id was not recognised by the registry.
    #[error("Unknown control message, ID: {0}")]
    UnknownControlId(u8),

    /// A body was handed to the wrong variant.
    #[error("Message ID mismatch: expected {expected}, found {found}.")]
    IdMismatch { expected: u8, found: u8 },

    /// A system/game body was handed to the wrong variant. Values are the
    /// packed `(id << 1) | system` headers.
    #[error("Message header mismatch: expected {expected}, found {found}.")]
    HeaderMismatch { expected: i32, found: i32 },

    /// The message is never sent by the side whose layout was requested.
    #[error("`{message}` has no layout for we_are_a_client = {we_are_a_client}.")]
    RoleMismatch {
        message: &'static str,
        we_are_a_client: bool,
    },

    /// Anti-reflection padding shorter than the protocol requires.
    #[error("Padding too short: expected at least {expected} bytes, found {found}.")]
    InvalidPadding { expected: usize, found: usize },

    /// The leading `(id << 1) | system` varint of a game message is negative.
    #[error("Invalid message header value: {0}")]
    InvalidMessageHeader(i32),

    /// An integer field that does not map to any known enum variant.
    #[error("Unknown {kind} value: {value}")]
    UnknownEnumValue { kind: &'static str, value: i32 },
}

/// Errors raised while framing chunks into a packet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Chunk of {size} bytes exceeds the size field maximum of {max}.")]
    ChunkTooLarge { size: usize, max: usize },

    #[error("Packet of {size} bytes exceeds the payload limit of {max}.")]
    PacketTooLarge { size: usize, max: usize },

    #[error("{count} chunks exceed the per-packet limit of {max}.")]
    TooManyChunks { count: usize, max: usize },
}

use crate::protocol::{
    constants::{
        MAX_CHUNK_SIZE_06, MAX_CHUNK_SIZE_07, MAX_CHUNKS_PER_PACKET, MAX_PAYLOAD_06,
        MAX_PAYLOAD_07,
    },
    types::StringMode,
};

/// Protocol generation; selects the chunk header bit layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProtocolVersion {
    /// 10-bit chunk size field.
    V06,
    /// 12-bit chunk size field.
    #[default]
    V07,
}

impl ProtocolVersion {
    pub fn max_chunk_size(self) -> usize {
        match self {
            ProtocolVersion::V06 => MAX_CHUNK_SIZE_06,
            ProtocolVersion::V07 => MAX_CHUNK_SIZE_07,
        }
    }

    pub fn max_payload(self) -> usize {
        match self {
            ProtocolVersion::V06 => MAX_PAYLOAD_06,
            ProtocolVersion::V07 => MAX_PAYLOAD_07,
        }
    }
}

/// Limits and decoding options shared by the packet codec and dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub version: ProtocolVersion,
    /// Largest chunk region `pack_packet` will produce.
    pub max_payload: usize,
    pub max_chunks: usize,
    pub string_mode: StringMode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self {
            version: ProtocolVersion::V07,
            max_payload: MAX_PAYLOAD_07,
            max_chunks: MAX_CHUNKS_PER_PACKET,
            string_mode: StringMode::Strict,
        }
    }

    /// Also resets `max_payload` to the version's default.
    pub fn version(mut self, version: ProtocolVersion) -> Self {
        self.version = version;
        self.max_payload = version.max_payload();
        self
    }

    pub fn max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }

    pub fn max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    pub fn string_mode(mut self, string_mode: StringMode) -> Self {
        self.string_mode = string_mode;
        self
    }
}

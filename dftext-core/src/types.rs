//! Core types for DF compressed text containers

use crate::constants::{DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL, ZLIB_DEFAULT_LEVEL};
use crate::error::CodecError;
use flate2::Compression;
use serde::{Deserialize, Serialize};

/// zlib compression level, validated to `-1..=9`
///
/// `-1` selects the zlib default, `0` stores without compression and `9`
/// compresses hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct CompressionLevel(i32);

impl CompressionLevel {
    /// The zlib default level
    pub const DEFAULT: Self = Self(DEFAULT_COMPRESSION_LEVEL);

    /// Create a level, rejecting values outside `-1..=9`
    pub fn new(level: i32) -> Result<Self, CodecError> {
        if (DEFAULT_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(CodecError::InvalidLevel(level))
        }
    }

    /// Get the raw level
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Check if this is the default sentinel
    pub const fn is_default(&self) -> bool {
        self.0 == DEFAULT_COMPRESSION_LEVEL
    }

    /// Convert to a flate2 compression setting
    pub fn to_compression(self) -> Compression {
        if self.is_default() {
            Compression::new(ZLIB_DEFAULT_LEVEL)
        } else {
            Compression::new(self.0 as u32)
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i32> for CompressionLevel {
    type Error = CodecError;

    fn try_from(level: i32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<CompressionLevel> for i32 {
    fn from(level: CompressionLevel) -> Self {
        level.0
    }
}

/// What the scrambler does when `key - byte` would go below zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScramblePolicy {
    /// Fail with [`CodecError::ScrambleRange`]
    #[default]
    Reject,
    /// Wrap modulo 256
    Wrap,
}

/// Options shared by `decode` and `encode`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecOptions {
    /// Apply the index-mode scrambler to record contents
    pub index: bool,

    /// Compression level used on encode (ignored on decode)
    pub level: CompressionLevel,

    /// Scrambler underflow handling
    pub scramble: ScramblePolicy,
}

impl CodecOptions {
    /// Options with index mode off, default level and rejecting underflow
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable index mode
    pub fn index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    /// Set the compression level
    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the scrambler underflow policy
    pub fn scramble(mut self, policy: ScramblePolicy) -> Self {
        self.scramble = policy;
        self
    }
}

/// One length-prefixed compressed unit of a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Declared byte count of the compressed payload
    pub length: u32,

    /// The zlib stream, exactly `length` bytes, borrowed from the container
    pub payload: &'a [u8],
}

impl Chunk<'_> {
    /// Total encoded size including the length prefix
    pub fn encoded_len(&self) -> usize {
        crate::constants::CHUNK_LENGTH_SIZE + self.payload.len()
    }
}

/// The redundant length pair in front of every record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Full 32-bit length
    pub length: u32,

    /// 16-bit copy of the length
    pub length_short: u16,
}

impl RecordHeader {
    /// Header for a record of `length` bytes; the short field is truncated
    pub fn for_length(length: u32) -> Self {
        Self {
            length,
            length_short: length as u16,
        }
    }

    /// Check that both lengths agree
    pub fn is_consistent(&self) -> bool {
        u32::from(self.length_short) == self.length
    }
}

/// Per-chunk sizes reported by [`crate::decoder::inspect`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSummary {
    /// Byte offset of the length prefix in the container
    pub offset: usize,

    /// Compressed size
    pub compressed_len: usize,

    /// Decompressed size
    pub decompressed_len: usize,
}

/// Structure of a container, without unscrambling any content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    /// Chunks in container order
    pub chunks: Vec<ChunkSummary>,

    /// Declared record count
    pub record_count: u32,

    /// Sum of all record content lengths
    pub content_bytes: usize,

    /// Longest record content
    pub longest_record: usize,

    /// Payload bytes after the last record
    pub trailing_bytes: usize,
}

impl ContainerSummary {
    /// Total size of the decompressed payload
    pub fn payload_len(&self) -> usize {
        self.chunks.iter().map(|c| c.decompressed_len).sum()
    }
}

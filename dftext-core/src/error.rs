//! Error types for DF compressed text operations

use thiserror::Error;

/// Errors that can occur while decoding or encoding a container
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Fewer than four bytes remain where a chunk length prefix is expected
    #[error("Could not determine length of chunk {chunk}: {remaining} byte(s) left")]
    ChunkLength {
        /// 1-based index of the chunk whose prefix is missing.
        chunk: usize,
        /// Bytes left in the input.
        remaining: usize,
    },

    /// A chunk body is shorter than declared or is not a valid zlib stream
    #[error("Could not decompress chunk {chunk}: {reason}")]
    ChunkDecompression {
        /// 1-based index of the failing chunk.
        chunk: usize,
        /// Description of the failure.
        reason: String,
    },

    /// Fewer than four bytes remain for the record count, or fewer than six
    /// for a record's length pair
    #[error(
        "Could not determine record count: {remaining} byte(s) left{}",
        .record.map(|r| format!(" for the header of record {}", r)).unwrap_or_default()
    )]
    RecordCount {
        /// 0-based index of the record whose header is cut off; `None` for the count itself.
        record: Option<usize>,
        /// Bytes left in the decompressed payload.
        remaining: usize,
    },

    /// The payload ends inside a record's content
    #[error("Record {record} truncated: expected {expected} bytes, got {actual}")]
    RecordTruncated {
        /// 0-based index of the truncated record.
        record: usize,
        /// Bytes required to continue.
        expected: usize,
        /// Bytes actually left.
        actual: usize,
    },

    /// The 32-bit and 16-bit lengths of a record disagree
    #[error("Record lengths do not match for record {record}: {length} != {length_short}")]
    RecordLengthMismatch {
        /// 0-based index of the malformed record.
        record: usize,
        /// Declared 32-bit length.
        length: u32,
        /// Declared 16-bit length.
        length_short: u16,
    },

    /// The scramble subtraction went below zero
    #[error("Byte {byte:#04x} at position {position} cannot be scrambled with key {key}")]
    ScrambleRange {
        /// 0-based position within the record.
        position: usize,
        /// The input byte.
        byte: u8,
        /// The key at that position.
        key: u8,
    },

    /// Compression level outside `-1..=9`
    #[error("Invalid compression level {0}: expected -1 (default) or 0-9")]
    InvalidLevel(i32),

    /// Text contains a character with no single-byte representation
    #[error("Character {character:?} at offset {offset} has no CP437 encoding")]
    Unencodable {
        /// The offending character.
        character: char,
        /// Character offset in the input text.
        offset: usize,
    },

    /// A count or length does not fit the 32-bit fields of the format
    #[error("{what} of {size} exceeds the 32-bit limit of the format")]
    PayloadTooLarge {
        /// Which quantity overflowed.
        what: &'static str,
        /// The actual value.
        size: usize,
    },

    /// The zlib writer failed
    #[error("Compression failed: {0}")]
    Compression(String),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Compression(err.to_string())
    }
}

//! Constants for the DF compressed text container format

/// Size of the little-endian `u32` length prefix in front of every chunk
pub const CHUNK_LENGTH_SIZE: usize = 4;

/// Size of the little-endian `u32` record count at the start of the payload
pub const RECORD_COUNT_SIZE: usize = 4;

/// Size of a record header: `length: u32` followed by `length_short: u16`
pub const RECORD_HEADER_SIZE: usize = 6;

/// Byte separating records in the text form
pub const RECORD_SEPARATOR: u8 = b'\n';

/// Upper bound of the scramble key; the key at position `i` is `SCRAMBLE_BASE - (i % SCRAMBLE_PERIOD)`
pub const SCRAMBLE_BASE: u8 = 255;

/// Number of positions after which the scramble key repeats
pub const SCRAMBLE_PERIOD: usize = 5;

/// Bytes stripped from both ends of every record before encoding
pub const RECORD_WHITESPACE: &[u8] = b" \t\n\r\x0b\x0c";

/// Lowest accepted compression level; selects the zlib default
pub const DEFAULT_COMPRESSION_LEVEL: i32 = -1;

/// Highest accepted compression level
pub const MAX_COMPRESSION_LEVEL: i32 = 9;

/// Level used by zlib when the default is requested
pub const ZLIB_DEFAULT_LEVEL: u32 = 6;

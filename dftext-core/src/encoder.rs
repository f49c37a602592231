//! Container encoding
//!
//! Encoding always produces exactly one chunk, however large the payload.

use crate::chunk::encode_chunk;
use crate::constants::{RECORD_SEPARATOR, RECORD_WHITESPACE};
use crate::cp437;
use crate::error::CodecError;
use crate::record::encode_records;
use crate::scramble::scramble_record;
use crate::types::CodecOptions;
use bytes::Bytes;

#[cfg(feature = "logging")]
use tracing::debug;

fn is_record_whitespace(byte: &u8) -> bool {
    RECORD_WHITESPACE.contains(byte)
}

/// Strip record whitespace from both ends of `bytes`
fn trim_record(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !is_record_whitespace(b))
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !is_record_whitespace(b))
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Split CP437 text into trimmed records
///
/// Leading and trailing newlines are dropped first, so empty input yields a
/// single empty record.
pub fn split_records(text: &[u8]) -> Vec<&[u8]> {
    let start = text
        .iter()
        .position(|&b| b != RECORD_SEPARATOR)
        .unwrap_or(text.len());
    let end = text
        .iter()
        .rposition(|&b| b != RECORD_SEPARATOR)
        .map_or(start, |i| i + 1);

    text[start..end]
        .split(|&b| b == RECORD_SEPARATOR)
        .map(trim_record)
        .collect()
}

/// Encode CP437 text bytes into a single-chunk container
pub fn encode_bytes(text: &[u8], options: &CodecOptions) -> Result<Bytes, CodecError> {
    let records = split_records(text);

    let payload = if options.index {
        let scrambled = records
            .iter()
            .map(|record| scramble_record(record, options.scramble))
            .collect::<Result<Vec<_>, _>>()?;
        encode_records(&scrambled)?
    } else {
        encode_records(&records)?
    };

    #[cfg(feature = "logging")]
    debug!(
        "Framed {} records into {} payload bytes (index: {})",
        records.len(),
        payload.len(),
        options.index
    );

    encode_chunk(&payload, options.level)
}

/// Encode text into a single-chunk container
///
/// Fails with [`CodecError::Unencodable`] if the text holds a character
/// outside code page 437.
pub fn encode(text: &str, options: &CodecOptions) -> Result<Bytes, CodecError> {
    let bytes = cp437::encode(text)?;
    encode_bytes(&bytes, options)
}

//! Container decoding
//!
//! Decoding runs the layers bottom-up: every chunk is inflated and the
//! results are concatenated, the concatenation is parsed as one record
//! payload, and records are optionally unscrambled. Records may straddle
//! chunk boundaries.

use crate::chunk::{decode_chunks, inflate_chunk, split_chunks};
use crate::constants::RECORD_SEPARATOR;
use crate::cp437;
use crate::error::CodecError;
use crate::record::decode_records as parse_records;
use crate::scramble::scramble_record;
use crate::types::{ChunkSummary, CodecOptions, ContainerSummary};
use bytes::{BufMut, Bytes, BytesMut};

#[cfg(feature = "logging")]
use tracing::debug;

/// Decode a container into its records
///
/// In index mode every record is unscrambled with `options.scramble`.
pub fn decode_records(raw: &[u8], options: &CodecOptions) -> Result<Vec<Bytes>, CodecError> {
    let payload = decode_chunks(raw)?;
    let block = parse_records(&payload)?;

    #[cfg(feature = "logging")]
    debug!(
        "Decoded {} records from {} payload bytes (index: {})",
        block.len(),
        payload.len(),
        options.index
    );

    if !options.index {
        return Ok(block.records);
    }

    block
        .records
        .iter()
        .map(|record| scramble_record(record, options.scramble))
        .collect()
}

/// Decode a container into CP437 bytes: records joined by `\n`, plus a trailing `\n`
pub fn decode_bytes(raw: &[u8], options: &CodecOptions) -> Result<Bytes, CodecError> {
    let records = decode_records(raw, options)?;

    let total: usize = records.iter().map(|r| r.len() + 1).sum();
    let mut out = BytesMut::with_capacity(total.max(1));
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.put_u8(RECORD_SEPARATOR);
        }
        out.put_slice(record);
    }
    out.put_u8(RECORD_SEPARATOR);

    Ok(out.freeze())
}

/// Decode a container into text
pub fn decode(raw: &[u8], options: &CodecOptions) -> Result<String, CodecError> {
    decode_bytes(raw, options).map(|bytes| cp437::decode(&bytes))
}

/// Describe the structure of a container without unscrambling it
///
/// Fails exactly where [`decode`] would, except for scrambler errors.
pub fn inspect(raw: &[u8]) -> Result<ContainerSummary, CodecError> {
    let chunks = split_chunks(raw)?;

    let mut payload = BytesMut::new();
    let mut summaries = Vec::with_capacity(chunks.len());
    let mut offset = 0;

    for (i, chunk) in chunks.iter().enumerate() {
        let inflated = inflate_chunk(chunk.payload, i + 1)?;
        summaries.push(ChunkSummary {
            offset,
            compressed_len: chunk.payload.len(),
            decompressed_len: inflated.len(),
        });
        offset += chunk.encoded_len();
        payload.put_slice(&inflated);
    }

    let block = parse_records(&payload.freeze())?;

    Ok(ContainerSummary {
        chunks: summaries,
        record_count: block.len() as u32,
        content_bytes: block.records.iter().map(Bytes::len).sum(),
        longest_record: block.records.iter().map(Bytes::len).max().unwrap_or(0),
        trailing_bytes: block.trailing_bytes,
    })
}

//! Record layer: count-prefixed sequence of length-framed byte strings
//!
//! Layout of a decompressed payload (all integers little-endian):
//!
//! ```text
//! Payload := record_count:u32 Record*
//! Record  := length:u32 length_short:u16 content[length]
//! ```

use crate::constants::{RECORD_COUNT_SIZE, RECORD_HEADER_SIZE};
use crate::error::CodecError;
use crate::types::RecordHeader;
use bytes::{Buf, BufMut, Bytes, BytesMut};

#[cfg(feature = "logging")]
use tracing::{trace, warn};

/// Records parsed out of one decompressed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBlock {
    /// Record contents in payload order
    pub records: Vec<Bytes>,

    /// Bytes left over after the last declared record
    pub trailing_bytes: usize,
}

impl RecordBlock {
    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the block holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse the record count and every record from a decompressed payload
///
/// Record contents are zero-copy slices of `payload`.
pub fn decode_records(payload: &Bytes) -> Result<RecordBlock, CodecError> {
    let mut rest = payload.clone();

    if rest.len() < RECORD_COUNT_SIZE {
        return Err(CodecError::RecordCount {
            record: None,
            remaining: rest.len(),
        });
    }
    let record_count = rest.get_u32_le() as usize;

    // The count is untrusted; every record needs at least a header
    let mut records = Vec::with_capacity(record_count.min(rest.len() / RECORD_HEADER_SIZE));

    for record in 0..record_count {
        if rest.len() < RECORD_HEADER_SIZE {
            return Err(CodecError::RecordCount {
                record: Some(record),
                remaining: rest.len(),
            });
        }

        let header = RecordHeader {
            length: rest.get_u32_le(),
            length_short: rest.get_u16_le(),
        };
        if !header.is_consistent() {
            return Err(CodecError::RecordLengthMismatch {
                record,
                length: header.length,
                length_short: header.length_short,
            });
        }

        let length = header.length as usize;
        if rest.len() < length {
            return Err(CodecError::RecordTruncated {
                record,
                expected: length,
                actual: rest.len(),
            });
        }

        #[cfg(feature = "logging")]
        trace!("Record {}: {} bytes", record, length);

        records.push(rest.split_to(length));
    }

    if !rest.is_empty() {
        #[cfg(feature = "logging")]
        warn!(
            "Ignoring {} trailing payload bytes after {} records",
            rest.len(),
            record_count
        );
    }

    Ok(RecordBlock {
        records,
        trailing_bytes: rest.len(),
    })
}

/// Frame records into a payload
///
/// The 16-bit length copy is truncated silently, so a record longer than
/// 65535 bytes encodes fine but will not decode.
pub fn encode_records<R: AsRef<[u8]>>(records: &[R]) -> Result<Bytes, CodecError> {
    let record_count = u32::try_from(records.len()).map_err(|_| CodecError::PayloadTooLarge {
        what: "record count",
        size: records.len(),
    })?;

    let content_len: usize = records.iter().map(|r| r.as_ref().len()).sum();
    let mut buf =
        BytesMut::with_capacity(RECORD_COUNT_SIZE + records.len() * RECORD_HEADER_SIZE + content_len);

    buf.put_u32_le(record_count);

    for record in records {
        let content = record.as_ref();
        let length = u32::try_from(content.len()).map_err(|_| CodecError::PayloadTooLarge {
            what: "record length",
            size: content.len(),
        })?;
        let header = RecordHeader::for_length(length);

        buf.put_u32_le(header.length);
        buf.put_u16_le(header.length_short);
        buf.put_slice(content);
    }

    Ok(buf.freeze())
}

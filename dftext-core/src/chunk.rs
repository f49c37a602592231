//! Chunk layer: length-prefixed, independently compressed zlib blocks

use crate::constants::CHUNK_LENGTH_SIZE;
use crate::error::CodecError;
use crate::types::{Chunk, CompressionLevel};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use flate2::{Decompress, FlushDecompress, Status};
use std::io::Write;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Initial output reservation per compressed byte when inflating
const INFLATE_RATIO: usize = 4;

/// Minimum growth step of the inflate buffer
const INFLATE_STEP: usize = 4096;

/// Split a container into its chunks without decompressing them
///
/// Consumes chunks until the input is exhausted. An empty input yields no
/// chunks. Chunk bodies borrow from `data`.
pub fn split_chunks(data: &[u8]) -> Result<Vec<Chunk<'_>>, CodecError> {
    let mut chunks = Vec::new();
    let mut rest = data;

    while !rest.is_empty() {
        let index = chunks.len() + 1;

        if rest.len() < CHUNK_LENGTH_SIZE {
            return Err(CodecError::ChunkLength {
                chunk: index,
                remaining: rest.len(),
            });
        }

        let length = rest.get_u32_le();
        if rest.len() < length as usize {
            return Err(CodecError::ChunkDecompression {
                chunk: index,
                reason: format!(
                    "declared {} bytes but only {} remain",
                    length,
                    rest.len()
                ),
            });
        }

        let (payload, tail) = rest.split_at(length as usize);
        rest = tail;

        #[cfg(feature = "logging")]
        trace!("Chunk {} spans {} compressed bytes", index, length);

        chunks.push(Chunk { length, payload });
    }

    Ok(chunks)
}

/// Decompress one chunk body; `index` is the 1-based chunk number
pub fn inflate_chunk(payload: &[u8], index: usize) -> Result<Vec<u8>, CodecError> {
    let fail = |reason: String| CodecError::ChunkDecompression {
        chunk: index,
        reason,
    };

    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(payload.len().saturating_mul(INFLATE_RATIO));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(INFLATE_STEP));
        }

        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let consumed = before_in as usize;

        let status = inflater
            .decompress_vec(&payload[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| fail(e.to_string()))?;

        if status == Status::StreamEnd {
            return Ok(out);
        }

        // Spare output room and no progress means the input ran out mid-stream
        let stalled = inflater.total_in() == before_in && inflater.total_out() == before_out;
        if stalled && out.len() < out.capacity() {
            return Err(fail("unexpected end of zlib stream".into()));
        }
    }
}

/// Decode every chunk of a container and concatenate the results
pub fn decode_chunks(data: &[u8]) -> Result<Bytes, CodecError> {
    let chunks = split_chunks(data)?;
    let mut payload = BytesMut::new();

    for (i, chunk) in chunks.iter().enumerate() {
        let inflated = inflate_chunk(chunk.payload, i + 1)?;

        #[cfg(feature = "logging")]
        debug!(
            "Chunk {}: {} -> {} bytes",
            i + 1,
            chunk.length,
            inflated.len()
        );

        payload.put_slice(&inflated);
    }

    Ok(payload.freeze())
}

/// Compress `payload` as a single zlib stream and wrap it in one chunk
pub fn encode_chunk(payload: &[u8], level: CompressionLevel) -> Result<Bytes, CodecError> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), level.to_compression());
    encoder.write_all(payload)?;
    let compressed = encoder.finish()?;

    let length = u32::try_from(compressed.len()).map_err(|_| CodecError::PayloadTooLarge {
        what: "compressed chunk",
        size: compressed.len(),
    })?;

    let mut buf = BytesMut::with_capacity(CHUNK_LENGTH_SIZE + compressed.len());
    buf.put_u32_le(length);
    buf.put_slice(&compressed);

    #[cfg(feature = "logging")]
    debug!(
        "Encoded chunk: {} -> {} bytes at level {}",
        payload.len(),
        length,
        level.get()
    );

    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_encode_chunk_prefix() {
        let encoded = encode_chunk(b"hello chunk", CompressionLevel::DEFAULT).unwrap();
        let declared = u32::from_le_bytes([encoded[0], encoded[1], encoded[2], encoded[3]]);

        assert_eq!(declared as usize, encoded.len() - CHUNK_LENGTH_SIZE);
        // zlib header with default compression
        assert_eq!(encoded[4], 0x78);
    }

    #[test]
    fn test_empty_input_has_no_chunks() {
        assert!(split_chunks(&Bytes::new()).unwrap().is_empty());
        assert!(decode_chunks(&Bytes::new()).unwrap().is_empty());
    }

    #[test]
    fn test_short_length_prefix() {
        let input = Bytes::from_static(&[1, 0, 0]);
        let result = split_chunks(&input);
        assert_eq!(
            result,
            Err(CodecError::ChunkLength {
                chunk: 1,
                remaining: 3
            })
        );
    }

    #[test]
    fn test_declared_length_exceeds_input() {
        let mut data = vec![100, 0, 0, 0];
        data.extend_from_slice(&zlib(b"abc"));

        let result = decode_chunks(&Bytes::from(data));
        assert!(matches!(
            result,
            Err(CodecError::ChunkDecompression { chunk: 1, .. })
        ));
    }

    #[test]
    fn test_two_chunks_concatenate() {
        let first = zlib(b"first-");
        let second = zlib(b"second");
        let mut data = Vec::new();
        data.extend_from_slice(&(first.len() as u32).to_le_bytes());
        data.extend_from_slice(&first);
        data.extend_from_slice(&(second.len() as u32).to_le_bytes());
        data.extend_from_slice(&second);

        let data = Bytes::from(data);
        assert_eq!(split_chunks(&data).unwrap().len(), 2);
        assert_eq!(decode_chunks(&data).unwrap().as_ref(), b"first-second");
    }

    #[test]
    fn test_second_chunk_index_reported() {
        let good = zlib(b"ok");
        let mut data = Vec::new();
        data.extend_from_slice(&(good.len() as u32).to_le_bytes());
        data.extend_from_slice(&good);
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(b"junk");

        let result = decode_chunks(&Bytes::from(data));
        assert!(matches!(
            result,
            Err(CodecError::ChunkDecompression { chunk: 2, .. })
        ));
    }

    #[test]
    fn test_truncated_zlib_stream() {
        let full = zlib(&[7u8; 2048]);
        let cut = &full[..full.len() - 6];

        assert!(matches!(
            inflate_chunk(cut, 3),
            Err(CodecError::ChunkDecompression { chunk: 3, .. })
        ));
    }

    #[test]
    fn test_inflate_large_output() {
        let data = vec![0x41u8; 200_000];
        let compressed = zlib(&data);
        assert_eq!(inflate_chunk(&compressed, 1).unwrap(), data);
    }

    #[test]
    fn test_incompressible_payload_round_trip() {
        use rand::{RngCore, SeedableRng};

        let mut rng = rand::rngs::StdRng::seed_from_u64(437);
        let mut data = vec![0u8; 50_000];
        rng.fill_bytes(&mut data);

        for level in [0, 1, 9] {
            let encoded = encode_chunk(&data, CompressionLevel::new(level).unwrap()).unwrap();
            assert_eq!(decode_chunks(&encoded).unwrap().as_ref(), data.as_slice());
        }
    }

    #[test]
    fn test_chunks_borrow_input() {
        let encoded = encode_chunk(b"borrowed", CompressionLevel::DEFAULT).unwrap();
        let chunks = split_chunks(&encoded).unwrap();

        assert_eq!(chunks[0].payload.as_ptr(), encoded[CHUNK_LENGTH_SIZE..].as_ptr());
        assert_eq!(chunks[0].encoded_len(), encoded.len());
    }

    #[test]
    fn test_zero_length_chunk_fails() {
        let result = decode_chunks(&Bytes::from_static(&[0, 0, 0, 0]));
        assert!(matches!(
            result,
            Err(CodecError::ChunkDecompression { chunk: 1, .. })
        ));
    }
}

//! Property-based tests using proptest

use dftext_core::{
    decode, decode_bytes, decode_records, encode, encode_bytes,
    record::{decode_records as parse_records, encode_records},
    scramble::{key_at, scramble_record},
    CodecOptions, CompressionLevel, ScramblePolicy,
};
use proptest::prelude::*;

/// A record that survives encoding unchanged: non-empty, no newline, no
/// surrounding whitespace
fn record() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..64).prop_filter("trimmed record", |r| {
        let ws = |b: &u8| b" \t\n\r\x0b\x0c".contains(b);
        !r.contains(&b'\n') && !ws(&r[0]) && !ws(&r[r.len() - 1])
    })
}

/// A record whose bytes never underflow the scrambler
fn scramble_safe_record() -> impl Strategy<Value = Vec<u8>> {
    record().prop_filter("no scramble underflow", |r| {
        r.iter().enumerate().all(|(i, &b)| b <= key_at(i))
    })
}

fn join(records: &[Vec<u8>]) -> Vec<u8> {
    let mut text = records.join(&b'\n');
    text.push(b'\n');
    text
}

proptest! {
    #[test]
    fn prop_round_trip_plain(
        records in prop::collection::vec(record(), 1..16),
        level in -1i32..=9
    ) {
        let options = CodecOptions::new().level(CompressionLevel::new(level).unwrap());
        let text = records.join(&b'\n');

        let encoded = encode_bytes(&text, &options).unwrap();
        let decoded = decode_bytes(&encoded, &options).unwrap();

        prop_assert_eq!(decoded.to_vec(), join(&records));
    }

    #[test]
    fn prop_round_trip_index(
        records in prop::collection::vec(scramble_safe_record(), 1..16)
    ) {
        let options = CodecOptions::new().index(true);
        let text = records.join(&b'\n');

        let encoded = encode_bytes(&text, &options).unwrap();
        let decoded = decode_records(&encoded, &options).unwrap();

        prop_assert_eq!(decoded.len(), records.len());
        for (got, want) in decoded.iter().zip(&records) {
            prop_assert_eq!(got.as_ref(), want.as_slice());
        }
    }

    #[test]
    fn prop_round_trip_index_wrap(
        records in prop::collection::vec(record(), 1..16)
    ) {
        let options = CodecOptions::new().index(true).scramble(ScramblePolicy::Wrap);
        let text = records.join(&b'\n');

        let encoded = encode_bytes(&text, &options).unwrap();
        let decoded = decode_bytes(&encoded, &options).unwrap();

        prop_assert_eq!(decoded.to_vec(), join(&records));
    }

    #[test]
    fn prop_double_scramble_is_identity(
        bytes in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(once) = scramble_record(&bytes, ScramblePolicy::Reject) {
            if let Ok(twice) = scramble_record(&once, ScramblePolicy::Reject) {
                prop_assert_eq!(twice.to_vec(), bytes.clone());
            }
        }

        let once = scramble_record(&bytes, ScramblePolicy::Wrap).unwrap();
        let twice = scramble_record(&once, ScramblePolicy::Wrap).unwrap();
        prop_assert_eq!(twice.to_vec(), bytes);
    }

    #[test]
    fn prop_record_framing_round_trip(
        records in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 0..32)
    ) {
        let payload = encode_records(&records).unwrap();
        let block = parse_records(&payload).unwrap();

        prop_assert_eq!(block.trailing_bytes, 0);
        prop_assert_eq!(block.records.len(), records.len());
        for (got, want) in block.records.iter().zip(&records) {
            prop_assert_eq!(got.as_ref(), want.as_slice());
        }
    }

    #[test]
    fn prop_text_round_trip(
        lines in prop::collection::vec("[A-Za-z0-9:\\[\\]_]{1,40}", 1..10)
    ) {
        let text = lines.join("\n");
        let encoded = encode(&text, &CodecOptions::new()).unwrap();
        prop_assert_eq!(decode(&encoded, &CodecOptions::new()).unwrap(), format!("{}\n", text));
    }

    #[test]
    fn prop_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..4096)
    ) {
        // Should never panic, even on random data
        let result = decode(&data, &CodecOptions::new());
        prop_assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn prop_decode_never_panics_on_damaged_container(
        records in prop::collection::vec(record(), 1..8),
        flip in any::<prop::sample::Index>(),
        mask in 1u8..=255
    ) {
        let mut encoded = encode_bytes(&records.join(&b'\n'), &CodecOptions::new())
            .unwrap()
            .to_vec();
        let at = flip.index(encoded.len());
        encoded[at] ^= mask;

        let _ = decode(&encoded, &CodecOptions::new().index(true));
    }
}

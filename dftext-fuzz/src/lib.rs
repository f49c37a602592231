//! Fuzzing entry points for dftext-core
//!
//! Each function takes arbitrary bytes and must not panic, except
//! `fuzz_round_trip`, which asserts encode/decode stability. Drive them from
//! any byte-oriented fuzz harness; the tests below pin known edge inputs.

use dftext_core::{CodecOptions, ScramblePolicy};

pub fn fuzz_decode(data: &[u8]) {
    // Try to decode - should never panic
    let _ = dftext_core::decode(data, &CodecOptions::new());
    let _ = dftext_core::decode(data, &CodecOptions::new().index(true));
}

pub fn fuzz_inspect(data: &[u8]) {
    let _ = dftext_core::inspect(data);
}

fn normalize(text: &[u8], options: &CodecOptions) -> Vec<u8> {
    let encoded = dftext_core::encode_bytes(text, options).expect("text encodes");
    dftext_core::decode_bytes(&encoded, options)
        .expect("own output decodes")
        .to_vec()
}

/// Encode/decode in wrap mode reaches a fixed point after two passes
pub fn fuzz_round_trip(data: &[u8]) {
    // Lines past the 16-bit length limit do not decode
    if data.split(|&b| b == b'\n').any(|line| line.len() > usize::from(u16::MAX)) {
        return;
    }

    let options = CodecOptions::new()
        .index(true)
        .scramble(ScramblePolicy::Wrap);

    let twice = normalize(&normalize(data, &options), &options);
    assert_eq!(normalize(&twice, &options), twice);
}

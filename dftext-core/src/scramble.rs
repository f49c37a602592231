//! Index-mode scrambler
//!
//! Every byte of a record is replaced by `key(i) - byte`, where
//! `key(i) = 255 - (i % 5)` and `i` restarts at zero for each record. The
//! transform is its own inverse: applying it twice at the same position
//! returns the original byte.
//!
//! For `byte > key(i)` the subtraction has no value in `0..=255`. Under
//! [`ScramblePolicy::Reject`] this is an error; under
//! [`ScramblePolicy::Wrap`] the result is taken modulo 256, which keeps the
//! transform an involution over every byte value.

use crate::constants::{SCRAMBLE_BASE, SCRAMBLE_PERIOD};
use crate::error::CodecError;
use crate::types::ScramblePolicy;
use bytes::Bytes;

/// Scramble key at position `position`
pub const fn key_at(position: usize) -> u8 {
    SCRAMBLE_BASE - (position % SCRAMBLE_PERIOD) as u8
}

/// Transform a single byte at `position`
pub fn scramble_byte(byte: u8, position: usize, policy: ScramblePolicy) -> Result<u8, CodecError> {
    let key = key_at(position);
    match policy {
        ScramblePolicy::Wrap => Ok(key.wrapping_sub(byte)),
        ScramblePolicy::Reject => key
            .checked_sub(byte)
            .ok_or(CodecError::ScrambleRange {
                position,
                byte,
                key,
            }),
    }
}

/// Transform every byte of one record, positions starting at zero
pub fn scramble_record(record: &[u8], policy: ScramblePolicy) -> Result<Bytes, CodecError> {
    record
        .iter()
        .enumerate()
        .map(|(position, &byte)| scramble_byte(byte, position, policy))
        .collect::<Result<Vec<u8>, _>>()
        .map(Bytes::from)
}

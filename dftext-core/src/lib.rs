//! # dftext Core
//!
//! Reader and writer for the DF compressed text container: an ordered list
//! of text records, framed and zlib-compressed in one or more chunks.
//!
//! ## Modules
//!
//! - `constants`: Format constants
//! - `types`: Options and container types (CodecOptions, Chunk, RecordHeader)
//! - `chunk`: Length-prefixed zlib chunk layer
//! - `record`: Record framing inside the decompressed payload
//! - `scramble`: Index-mode byte transform
//! - `cp437`: Single-byte text boundary
//! - `encoder`: Text to container
//! - `decoder`: Container to text, plus structural inspection

#![warn(missing_docs)]

pub mod chunk;
pub mod constants;
pub mod cp437;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod record;
pub mod scramble;
pub mod types;

// Re-export commonly used types
pub use decoder::{decode, decode_bytes, decode_records, inspect};
pub use encoder::{encode, encode_bytes};
pub use error::CodecError;
pub use types::{CodecOptions, CompressionLevel, ContainerSummary, ScramblePolicy};

/// Result type alias for dftext operations
pub type Result<T> = core::result::Result<T, CodecError>;

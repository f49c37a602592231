//! Subcommand implementations

pub mod decode;
pub mod encode;
pub mod inspect;

use anyhow::{Context, Result};
use dftext_core::{CodecOptions, CompressionLevel, ScramblePolicy};
use std::fs;
use std::io::{self, Read, Write};

/// Read the whole input: stdin when `input` is `None` or `-`, otherwise the named file
pub fn read_input(input: Option<&str>) -> Result<Vec<u8>> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read standard input")?;
            Ok(buf)
        }
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read input file: {}", path))
        }
    }
}

/// Write `data` to the named file, or stdout when `output` is `None` or `-`
pub fn write_output(output: Option<&str>, data: &[u8]) -> Result<()> {
    match output {
        None | Some("-") => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|_| stdout.flush())
                .context("Failed to write standard output")
        }
        Some(path) => {
            fs::write(path, data).with_context(|| format!("Failed to write output file: {}", path))
        }
    }
}

/// Log filter for the CLI: quiet apart from warnings unless `--debug` is given
pub fn log_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

/// Build codec options from command-line flags
pub fn codec_options(index: bool, wrap_scramble: bool, level: i32) -> Result<CodecOptions> {
    let level = CompressionLevel::new(level)?;
    let scramble = if wrap_scramble {
        ScramblePolicy::Wrap
    } else {
        ScramblePolicy::Reject
    };

    Ok(CodecOptions::new()
        .index(index)
        .level(level)
        .scramble(scramble))
}

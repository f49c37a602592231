use super::{read_input, write_output};
use anyhow::{Context, Result};
use dftext_core::CodecOptions;
use tracing::{debug, info};

/// Decode a container from `input` and write the text to `output`
///
/// Text is written as UTF-8 unless `raw` is set, in which case the CP437
/// bytes are written unchanged.
pub fn execute(
    input: Option<&str>,
    output: Option<&str>,
    options: &CodecOptions,
    raw: bool,
) -> Result<()> {
    let data = read_input(input)?;
    info!(
        "Decoding {} bytes from {}",
        data.len(),
        input.unwrap_or("stdin")
    );
    debug!("Options: {:?}", options);

    let decoded = if raw {
        dftext_core::decode_bytes(&data, options)
            .context("Failed to decode container")?
            .to_vec()
    } else {
        dftext_core::decode(&data, options)
            .context("Failed to decode container")?
            .into_bytes()
    };

    write_output(output, &decoded)?;
    info!("Wrote {} bytes of text", decoded.len());

    Ok(())
}

use super::{read_input, write_output};
use anyhow::{Context, Result};
use dftext_core::CodecOptions;
use tracing::{debug, info};

/// Encode text from `input` into a single-chunk container written to `output`
///
/// Input is read as UTF-8 and mapped to CP437 unless `raw` is set, in which
/// case it is taken to be CP437 bytes already.
pub fn execute(
    input: Option<&str>,
    output: Option<&str>,
    options: &CodecOptions,
    raw: bool,
) -> Result<()> {
    let data = read_input(input)?;
    info!(
        "Encoding {} bytes from {} at level {}",
        data.len(),
        input.unwrap_or("stdin"),
        options.level.get()
    );
    debug!("Options: {:?}", options);

    let encoded = if raw {
        dftext_core::encode_bytes(&data, options).context("Failed to encode text")?
    } else {
        let text = String::from_utf8(data).context("Input is not valid UTF-8 (try --raw)")?;
        dftext_core::encode(&text, options).context("Failed to encode text")?
    };

    write_output(output, &encoded)?;
    info!("Wrote {} byte container", encoded.len());

    Ok(())
}

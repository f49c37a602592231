use super::read_input;
use anyhow::{Context, Result};
use colored::*;
use dftext_core::ContainerSummary;
use tracing::info;

/// Parse the container in `input` and return its structure
pub fn summarize(input: Option<&str>) -> Result<ContainerSummary> {
    let data = read_input(input)?;
    info!("Inspecting {} bytes from {}", data.len(), input.unwrap_or("stdin"));

    dftext_core::inspect(&data).context("Failed to parse container")
}

pub fn execute(input: Option<&str>, json: bool) -> Result<()> {
    let summary = summarize(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\n=== Chunks ===");
    for (i, chunk) in summary.chunks.iter().enumerate() {
        println!(
            "Chunk {:<4} offset {:<10} {:>10} -> {:>10} bytes",
            i + 1,
            chunk.offset,
            chunk.compressed_len,
            chunk.decompressed_len
        );
    }

    println!("\n=== Records ===");
    println!("Record count:       {}", summary.record_count);
    println!("Content bytes:      {}", summary.content_bytes);
    println!("Longest record:     {}", summary.longest_record);
    println!("Payload bytes:      {}", summary.payload_len());

    if summary.trailing_bytes > 0 {
        println!(
            "Trailing bytes:     {}",
            summary.trailing_bytes.to_string().yellow()
        );
    }

    println!("\n=== Summary ===");
    if summary.chunks.len() > 1 {
        println!(
            "{} Valid container ({} chunks)",
            "✓".green(),
            summary.chunks.len()
        );
    } else {
        println!("{} Valid container", "✓".green());
    }

    Ok(())
}

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dftext_cli::commands;
use dftext_core::constants::DEFAULT_COMPRESSION_LEVEL;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dftext")]
#[command(about = "dftext - Read and write DF compressed text files", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by decode and encode
#[derive(Args)]
struct CodecArgs {
    /// File to read from (defaults to stdin)
    filename: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Use data/index-style scrambling
    #[arg(long)]
    index: bool,

    /// Wrap scramble underflow modulo 256 instead of failing
    #[arg(long, requires = "index")]
    wrap_scramble: bool,

    /// Treat text as raw CP437 bytes instead of UTF-8
    #[arg(long)]
    raw: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a compressed file to text
    Decode {
        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Encode text into a compressed file
    Encode {
        #[command(flatten)]
        codec: CodecArgs,

        /// Compression level (0-9, with 0 being the lowest; -1 for the zlib default)
        #[arg(long, default_value_t = DEFAULT_COMPRESSION_LEVEL, allow_negative_numbers = true)]
        level: i32,
    },

    /// Show the chunk and record structure of a compressed file
    Inspect {
        /// File to read from (defaults to stdin)
        filename: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout carries codec output
    let filter = EnvFilter::new(commands::log_directive(cli.debug));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Decode { codec } => {
            let options =
                commands::codec_options(codec.index, codec.wrap_scramble, DEFAULT_COMPRESSION_LEVEL)?;
            commands::decode::execute(
                codec.filename.as_deref(),
                codec.output.as_deref(),
                &options,
                codec.raw,
            )
        }

        Commands::Encode { codec, level } => {
            let options = commands::codec_options(codec.index, codec.wrap_scramble, level)?;
            commands::encode::execute(
                codec.filename.as_deref(),
                codec.output.as_deref(),
                &options,
                codec.raw,
            )
        }

        Commands::Inspect { filename, json } => {
            commands::inspect::execute(filename.as_deref(), json)
        }
    }
}

//! Command-line front end for the `orphen_lz` decoder.
//!
//! Reads a whole compressed file, then either decodes it (to a file or stdout)
//! or, with `--calc-size-only`, prints the decompressed size.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use orphen_lz::{
    DEFAULT_MAX_DISPLACEMENT, DecodeConfig, EndOfStream, decompress_with, decompressed_size,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orphen-lz", version, about = "Decode headerless Orphen LZ streams")]
struct Args {
    /// Compressed input file.
    input: PathBuf,

    /// Output file; decoded bytes go to stdout when omitted.
    output: Option<PathBuf>,

    /// Stop after this many output bytes (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_number)]
    size: Option<usize>,

    /// Treat the input as terminator-separated independent streams.
    #[arg(long)]
    multi: bool,

    /// Only scan the input and print the decompressed size.
    #[arg(long)]
    calc_size_only: bool,

    /// Keep partial output instead of failing on a truncated input.
    #[arg(long)]
    lenient: bool,

    /// Largest back-reference displacement; the window holds one byte more.
    #[arg(long, value_parser = parse_number, default_value_t = DEFAULT_MAX_DISPLACEMENT)]
    max_displacement: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_number(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid number `{s}`: {e}"))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let config = DecodeConfig::new()
        .with_max_displacement(args.max_displacement)
        .with_multi_stream(args.multi)
        .with_target_size(args.size)
        .with_end_of_stream(if args.lenient {
            EndOfStream::Lenient
        } else {
            EndOfStream::Strict
        });

    if args.calc_size_only {
        println!("{}", decompressed_size(&data, &config));
        return Ok(());
    }

    let mut output = Vec::new();
    decompress_with(&data, &mut output, &config)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    match args.size {
        Some(expected) if output.len() < expected => warn!(
            expected,
            actual = output.len(),
            "stream ended before the requested size"
        ),
        _ => {}
    }
    info!(
        input = data.len(),
        output = output.len(),
        "decoded {}",
        args.input.display()
    );

    match &args.output {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&output).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}

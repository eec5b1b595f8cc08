use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tiny_asm::assemble_str;
use tiny_disasm::write_program;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tiny-ASM assembler")]
struct Opts {
    /// Input assembly file (one instruction per line, ';' starts a comment)
    #[arg(short, long)]
    input: PathBuf,
    /// Output binary file
    #[arg(short, long, default_value = "out.bin")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("failed to read {}", opts.input.display()))?;
    // nothing is written when any line fails
    let bin = assemble_str(&text).with_context(|| format!("{}: compilation failed", opts.input.display()))?;
    write_program(&opts.output, bin.as_bytes())?;
    tracing::info!("wrote {} bytes to '{}'", bin.len(), opts.output.display());
    Ok(())
}

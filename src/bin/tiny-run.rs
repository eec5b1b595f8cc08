use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tiny_asm::{exec::IntExecutor, isa::tiny8::Tiny8Decoder, Cpu, StdConsole};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run a Tiny-ASM binary on the interpreter"
)]
struct Opts {
    /// Final register report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[arg(value_name = "BINFILE")]
    input: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let program = std::fs::read(&opts.input)?;
    ensure!(!program.is_empty(), "empty program file: {}", opts.input);

    let mut cpu = Cpu::new();
    let mut console = StdConsole::stdio();
    let dec = Tiny8Decoder::new();
    let exec = IntExecutor;

    // a fault surfaces through `?`; no register dump in that case
    let regs = cpu.run(&program, &mut console, &dec, &exec)?;
    match opts.format {
        OutputFormat::Text => println!("Registers: {regs}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&regs)?),
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use std::path::Path;

use tiny_disasm::{load_program, render_listing, render_summary, summarize, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tiny-ASM disassembler CLI", long_about=None)]
struct Cli {
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: String,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize the loaded program
    Info {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Disassemble every byte
    List {
        /// Show pc and instruction byte
        #[arg(long)]
        show_bytes: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Also write the listing to this file
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let prog = load_program(Path::new(&cli.input), cli.skip, cli.len)?;
    anyhow::ensure!(!prog.is_empty(), "empty binary file: {}", cli.input);

    match cli.cmd {
        Command::Info { format } => {
            print!("{}", render_summary(&summarize(&prog), format)?);
        }
        Command::List { show_bytes, format, out } => {
            let buf = render_listing(&prog.bytes, show_bytes, format)?;
            print!("{buf}");
            if let Some(path) = out {
                std::fs::write(&path, &buf)?;
                tracing::info!("disassembly written to {path}");
            }
        }
    }

    Ok(())
}

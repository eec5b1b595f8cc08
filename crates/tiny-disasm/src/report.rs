use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write as _;

use tiny_asm::decoder::{Decoded, Decoder};
use tiny_asm::isa::tiny8::Tiny8Decoder;
use tiny_asm::{listing, ListingLine};

use crate::model::Program;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat { Text, Json }

/// Per-kind instruction counts for a loaded program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub name: String,
    pub bytes: usize,
    pub movi: usize,
    pub arith: usize,
    pub io: usize,
    pub unknown: usize,
}

pub fn summarize(prog: &Program) -> Summary {
    let dec = Tiny8Decoder::new();
    let mut s = Summary { name: prog.name.clone(), bytes: prog.len(), ..Summary::default() };
    for &b in &prog.bytes {
        match dec.decode(b) {
            Decoded::Movi(_) => s.movi += 1,
            Decoded::Arith { .. } => s.arith += 1,
            Decoded::Io { .. } => s.io += 1,
            Decoded::Unknown(_) => s.unknown += 1,
        }
    }
    s
}

pub fn render_summary(s: &Summary, format: OutputFormat) -> Result<String> {
    let mut buf = String::new();
    match format {
        OutputFormat::Json => {
            buf = serde_json::to_string_pretty(s)?;
            buf.push('\n');
        }
        OutputFormat::Text => {
            writeln!(buf, "{:<16} {:>6} {:>6} {:>6} {:>6} {:>8}", "name", "bytes", "movi", "arith", "io", "unknown")?;
            writeln!(
                buf,
                "{:<16} {:>6} {:>6} {:>6} {:>6} {:>8}",
                s.name, s.bytes, s.movi, s.arith, s.io, s.unknown
            )?;
        }
    }
    Ok(buf)
}

pub fn render_listing(bytes: &[u8], show_bytes: bool, format: OutputFormat) -> Result<String> {
    let lines: Vec<ListingLine> = listing(bytes).collect();
    let mut buf = String::new();
    match format {
        OutputFormat::Json => {
            buf = serde_json::to_string_pretty(&lines)?;
            buf.push('\n');
        }
        OutputFormat::Text => {
            for l in &lines {
                if show_bytes {
                    writeln!(buf, "{l}")?;
                } else {
                    writeln!(buf, "{}", l.text)?;
                }
            }
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prog(bytes: &[u8]) -> Program {
        Program { name: "prog.bin".into(), bytes: bytes.to_vec() }
    }

    #[test]
    fn summary_counts_each_kind() {
        let s = summarize(&prog(&[0x05, 0x81, 0xB1, 0xC2, 0xC7, 0xD0, 0xF3]));
        assert_eq!(
            s,
            Summary { name: "prog.bin".into(), bytes: 7, movi: 1, arith: 2, io: 2, unknown: 2 }
        );
    }

    #[test]
    fn summary_json() {
        let s = summarize(&prog(&[0x05, 0xE0]));
        let text = render_summary(&s, OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["name"], "prog.bin");
        assert_eq!(v["bytes"], 2);
        assert_eq!(v["movi"], 1);
        assert_eq!(v["unknown"], 1);
    }

    #[test]
    fn summary_text_has_header_and_row() {
        let s = summarize(&prog(&[0x05]));
        let text = render_summary(&s, OutputFormat::Text).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("name"));
        assert!(rows[1].starts_with("prog.bin"));
    }

    #[test]
    fn listing_text_and_bytes() {
        let bytes = [0x05, 0x81, 0xD2];
        assert_eq!(
            render_listing(&bytes, false, OutputFormat::Text).unwrap(),
            "MOVI #5\nADD a,b\n??? (Unknown opcode: 5)\n"
        );
        assert_eq!(
            render_listing(&bytes, true, OutputFormat::Text).unwrap(),
            "0000: 05  MOVI #5\n0001: 81  ADD a,b\n0002: d2  ??? (Unknown opcode: 5)\n"
        );
    }

    #[test]
    fn listing_json() {
        let text = render_listing(&[0xC7], false, OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v[0]["pc"], 0);
        assert_eq!(v[0]["byte"], 0xC7);
        assert_eq!(v[0]["text"], "OUT d");
    }
}

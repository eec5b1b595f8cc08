use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decoder::{Decoded, Decoder};
use crate::isa::tiny8::Tiny8Decoder;

pub fn fmt_decoded(d: &Decoded) -> String {
    match *d {
        Decoded::Movi(imm) => format!("MOVI #{imm}"),
        Decoded::Arith { op, r1, r2 } => format!("{} {r1},{r2}", op.mnemonic()),
        Decoded::Io { dir, reg } => format!("{} {reg}", dir.mnemonic()),
        Decoded::Unknown(op) => format!("??? (Unknown opcode: {op})"),
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fmt_decoded(self))
    }
}

/// One text line per byte, produced lazily in program order. Never fails:
/// reserved opcodes render as `??? (Unknown opcode: n)`.
pub fn disassemble(bytes: &[u8]) -> impl Iterator<Item = String> + '_ {
    listing(bytes).map(|l| l.text)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingLine {
    pub pc: usize,
    pub byte: u8,
    pub text: String,
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}: {:02x}  {}", self.pc, self.byte, self.text)
    }
}

pub fn listing(bytes: &[u8]) -> impl Iterator<Item = ListingLine> + '_ {
    let dec = Tiny8Decoder::new();
    bytes.iter().enumerate().map(move |(pc, &byte)| ListingLine {
        pc,
        byte,
        text: fmt_decoded(&dec.decode(byte)),
    })
}

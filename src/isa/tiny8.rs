use bitflags::bitflags;

use crate::decoder::{ArithOp, Decoded, Decoder, IoDir, IsaError, Register};

/// Tiny-ASM single-byte encoding.
///
/// ```text
/// layout A  0 iiiiiii            MOVI #imm        (imm 0..=127, always into a)
/// layout B  1 ooo xx yy          ooo = opcode
///             000..011 xx=r1 yy=r2   ADD/SUB/MUL/DIV r1,r2
///             100      0d yy         IN (d=0) / OUT (d=1) register yy
///             101..111               reserved
/// ```
pub struct Tiny8Decoder;

impl Tiny8Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Tiny8Decoder {
    fn default() -> Self {
        Self::new()
    }
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags: u8 {
const LAYOUT_B = 1 << 7; // clear for MOVI
const IO_RESERVED = 1 << 3; // IO only, always written as 0
const IO_OUT = 1 << 2; // IO only, direction
}
}

pub const IMM_MASK: u8 = 0x7F;
pub const OPCODE_SHIFT: u8 = 4;
pub const OPCODE_MASK: u8 = 0b111;
pub const OPCODE_IO: u8 = 4;

#[inline]
pub fn flags(raw: u8) -> Flags {
    Flags::from_bits_truncate(raw)
}

#[inline]
pub fn imm7(raw: u8) -> u8 {
    raw & IMM_MASK
}

#[inline]
pub fn opcode(raw: u8) -> u8 {
    (raw >> OPCODE_SHIFT) & OPCODE_MASK
}

#[inline]
pub fn r1(raw: u8) -> u8 {
    (raw >> 2) & 0b11
}

#[inline]
pub fn r2(raw: u8) -> u8 {
    raw & 0b11
}

pub fn decode(raw: u8) -> Decoded {
    let f = flags(raw);
    if !f.contains(Flags::LAYOUT_B) {
        return Decoded::Movi(imm7(raw));
    }
    match opcode(raw) {
        op @ 0..=3 => Decoded::Arith {
            // 0..=3 always maps to an ArithOp
            op: ArithOp::ALL[op as usize],
            r1: Register::from_code(r1(raw)),
            r2: Register::from_code(r2(raw)),
        },
        OPCODE_IO => {
            // direction lives in bit 2 alone; the reserved bit 3 is not consulted
            let dir = if f.contains(Flags::IO_OUT) { IoDir::Out } else { IoDir::In };
            Decoded::Io { dir, reg: Register::from_code(r2(raw)) }
        }
        op => Decoded::Unknown(op),
    }
}

impl Decoder for Tiny8Decoder {
    fn decode(&self, raw: u8) -> Decoded {
        decode(raw)
    }
}

pub fn encode_movi(value: i64) -> Result<u8, IsaError> {
    if !(0..=IMM_MASK as i64).contains(&value) {
        return Err(IsaError::Range(value));
    }
    Ok(value as u8)
}

pub fn encode_arith(op: ArithOp, r1: Register, r2: Register) -> u8 {
    Flags::LAYOUT_B.bits() | (op.opcode() << OPCODE_SHIFT) | (r1.code() << 2) | r2.code()
}

pub fn encode_io(dir: IoDir, reg: Register) -> u8 {
    let mut f = Flags::LAYOUT_B;
    f.set(Flags::IO_OUT, dir == IoDir::Out);
    f.bits() | (OPCODE_IO << OPCODE_SHIFT) | reg.code()
}

pub fn encode_arith_named(op: ArithOp, r1: &str, r2: &str) -> Result<u8, IsaError> {
    Ok(encode_arith(op, r1.parse()?, r2.parse()?))
}

pub fn encode_io_named(dir: IoDir, reg: &str) -> Result<u8, IsaError> {
    Ok(encode_io(dir, reg.parse()?))
}

/// Inverse of [`decode`]. `Unknown` has no canonical encoding and yields `None`.
pub fn encode(d: &Decoded) -> Option<u8> {
    match *d {
        Decoded::Movi(imm) => encode_movi(imm as i64).ok(),
        Decoded::Arith { op, r1, r2 } => Some(encode_arith(op, r1, r2)),
        Decoded::Io { dir, reg } => Some(encode_io(dir, reg)),
        Decoded::Unknown(_) => None,
    }
}

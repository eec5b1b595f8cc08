use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IsaError {
    #[error("immediate {0} out of range 0..=127")]
    Range(i64),
    #[error("invalid register name '{0}'")]
    InvalidRegister(String),
}

/// One of the four general purpose registers; the discriminant is the 2-bit register code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

impl Register {
    pub const ALL: [Register; 4] = [Register::A, Register::B, Register::C, Register::D];

    /// Maps the low two bits of `code` to a register.
    pub fn from_code(code: u8) -> Self {
        Self::ALL[(code & 0b11) as usize]
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> char {
        (b'a' + self.code()) as char
    }
}

impl FromStr for Register {
    type Err = IsaError;

    /// Only the first character is significant and it is matched case-sensitively,
    /// so `"apple"` names `a` while `"A"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().chars().next() {
            Some('a') => Ok(Register::A),
            Some('b') => Ok(Register::B),
            Some('c') => Ok(Register::C),
            Some('d') => Ok(Register::D),
            _ => Err(IsaError::InvalidRegister(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    Add = 0,
    Sub = 1,
    Mul = 2,
    Div = 3,
}

impl ArithOp {
    pub const ALL: [ArithOp; 4] = [ArithOp::Add, ArithOp::Sub, ArithOp::Mul, ArithOp::Div];

    pub fn opcode(self) -> u8 {
        self as u8
    }

    pub fn from_opcode(op: u8) -> Option<Self> {
        Self::ALL.get(op as usize).copied()
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            ArithOp::Add => "ADD",
            ArithOp::Sub => "SUB",
            ArithOp::Mul => "MUL",
            ArithOp::Div => "DIV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IoDir {
    In,
    Out,
}

impl IoDir {
    pub fn mnemonic(self) -> &'static str {
        match self {
            IoDir::In => "IN",
            IoDir::Out => "OUT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decoded {
    /// Load a 7-bit immediate into register `a`.
    Movi(u8),
    Arith { op: ArithOp, r1: Register, r2: Register },
    Io { dir: IoDir, reg: Register },
    /// Layout B with a reserved opcode (5, 6 or 7).
    Unknown(u8),
}

pub trait Decoder {
    fn decode(&self, raw: u8) -> Decoded;
}

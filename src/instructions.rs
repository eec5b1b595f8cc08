use crate::decoder::{ArithOp, IoDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Movi,
    Arith(ArithOp),
    Io(IoDir),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// Decimal immediate 0..=127.
    Imm,
    /// `r1, r2`
    RegReg,
    Reg,
}

impl Operands {
    pub fn count(self) -> usize {
        match self {
            Operands::Imm | Operands::Reg => 1,
            Operands::RegReg => 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: Mnemonic,
    pub text: &'static str,
    pub operands: Operands,
}

/// Searched front to back; the first entry whose text prefixes the line wins.
pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        mnemonic: Mnemonic::Movi,
        text: "MOVI",
        operands: Operands::Imm,
    },
    InstrDesc {
        mnemonic: Mnemonic::Arith(ArithOp::Add),
        text: "ADD",
        operands: Operands::RegReg,
    },
    InstrDesc {
        mnemonic: Mnemonic::Arith(ArithOp::Sub),
        text: "SUB",
        operands: Operands::RegReg,
    },
    InstrDesc {
        mnemonic: Mnemonic::Arith(ArithOp::Mul),
        text: "MUL",
        operands: Operands::RegReg,
    },
    InstrDesc {
        mnemonic: Mnemonic::Arith(ArithOp::Div),
        text: "DIV",
        operands: Operands::RegReg,
    },
    InstrDesc {
        mnemonic: Mnemonic::Io(IoDir::In),
        text: "IN",
        operands: Operands::Reg,
    },
    InstrDesc {
        mnemonic: Mnemonic::Io(IoDir::Out),
        text: "OUT",
        operands: Operands::Reg,
    },
];

/// Case-insensitive prefix lookup. Returns the entry and the text following the prefix.
pub fn lookup(line: &str) -> Option<(&'static InstrDesc, &str)> {
    TABLE.iter().find_map(|desc| {
        let n = desc.text.len();
        let head = line.get(..n)?;
        head.eq_ignore_ascii_case(desc.text).then(|| (desc, &line[n..]))
    })
}

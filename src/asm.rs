use crate::decoder::Register;
use crate::instructions::{lookup, Mnemonic};
use crate::isa::tiny8::{encode_arith, encode_io, encode_movi};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(String),
    #[error("{mnemonic} requires {expected} operand(s), found {found}")]
    MissingOperand { mnemonic: &'static str, expected: usize, found: usize },
    #[error("{mnemonic} takes {expected} operand(s), found {found}")]
    ExtraOperand { mnemonic: &'static str, expected: usize, found: usize },
    #[error("invalid operand '{0}': expected a decimal value in 0..=127")]
    InvalidOperand(String),
    #[error("invalid register name '{0}'")]
    InvalidRegister(String),
}

/// An assembly error tagged with its 1-based source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: AsmError,
}

const INITIAL_CAPACITY: usize = 256;

/// Append-only output of the assembler.
///
/// Growth is left to `Vec`, which doubles its capacity and keeps existing
/// contents on reallocation; an allocation failure aborts the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramBuffer {
    bytes: Vec<u8>,
}

impl ProgramBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Assembles `line` and appends the resulting byte, if any.
    pub fn assemble_line(&mut self, line: &str) -> Result<Option<u8>, AsmError> {
        let byte = assemble_line(line)?;
        if let Some(b) = byte {
            self.push(b);
        }
        Ok(byte)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl Default for ProgramBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for ProgramBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Assembles one source line. Blank and comment-only lines produce `None`.
pub fn assemble_line(line: &str) -> Result<Option<u8>, AsmError> {
    let code = match line.find(';') {
        Some(p) => &line[..p],
        None => line,
    }
    .trim();
    if code.is_empty() {
        return Ok(None);
    }

    let (desc, rest) = lookup(code).ok_or_else(|| AsmError::UnknownInstruction(code.to_string()))?;
    let byte = match desc.mnemonic {
        Mnemonic::Movi => {
            // the immediate is the whole remainder, so any comma makes it invalid
            let tok = rest.trim();
            if tok.is_empty() {
                return Err(AsmError::MissingOperand { mnemonic: desc.text, expected: 1, found: 0 });
            }
            encode_movi(parse_imm(tok)?).map_err(|_| AsmError::InvalidOperand(tok.to_string()))?
        }
        Mnemonic::Arith(op) => {
            let ops = split_registers(desc.text, rest, desc.operands.count())?;
            encode_arith(op, parse_reg(ops[0])?, parse_reg(ops[1])?)
        }
        Mnemonic::Io(dir) => {
            let ops = split_registers(desc.text, rest, desc.operands.count())?;
            encode_io(dir, parse_reg(ops[0])?)
        }
    };
    tracing::trace!("{:#04x} <- {}", byte, code);
    Ok(Some(byte))
}

/// Splits comma-separated register operands, requiring exactly `expected` of them.
fn split_registers<'a>(mnemonic: &'static str, rest: &'a str, expected: usize) -> Result<Vec<&'a str>, AsmError> {
    // empty tokens are skipped, so "a,,b" reads as "a,b"
    let ops: Vec<&str> = rest.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
    if ops.len() < expected {
        return Err(AsmError::MissingOperand { mnemonic, expected, found: ops.len() });
    }
    if ops.len() > expected {
        return Err(AsmError::ExtraOperand { mnemonic, expected, found: ops.len() });
    }
    Ok(ops)
}

/// Assembles every line, stopping at the first error.
///
/// Bytes assembled before the failing line are dropped together with the buffer.
pub fn assemble_lines<I, S>(lines: I) -> Result<ProgramBuffer, LineError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = ProgramBuffer::new();
    for (i, line) in lines.into_iter().enumerate() {
        buf.assemble_line(line.as_ref())
            .map_err(|source| LineError { line: i + 1, source })?;
    }
    Ok(buf)
}

pub fn assemble_str(source: &str) -> Result<ProgramBuffer, LineError> {
    assemble_lines(source.lines())
}

fn parse_imm(tok: &str) -> Result<i64, AsmError> {
    // a leading '#' matches the disassembler's "MOVI #n" rendering
    let digits = tok.strip_prefix('#').unwrap_or(tok);
    digits
        .parse::<i64>()
        .map_err(|_| AsmError::InvalidOperand(tok.to_string()))
}

fn parse_reg(tok: &str) -> Result<Register, AsmError> {
    tok.parse().map_err(|_| AsmError::InvalidRegister(tok.to_string()))
}

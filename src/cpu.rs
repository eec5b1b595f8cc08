use std::fmt;

use anyhow::Error;
use serde::{Deserialize, Serialize};

use crate::decoder::{Decoder, Register};
use crate::exec::{Executor, IntExecutor};
use crate::io::Console;
use crate::isa::tiny8::Tiny8Decoder;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
}

impl Registers {
    pub fn get(&self, r: Register) -> u8 {
        match r {
            Register::A => self.a,
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
        }
    }

    pub fn set(&mut self, r: Register, value: u8) {
        match r {
            Register::A => self.a = value,
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
        }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a={} b={} c={} d={}", self.a, self.b, self.c, self.d)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    Halted,
}

#[derive(thiserror::Error, Debug)]
pub enum Fault {
    #[error("Division by zero at pc {pc}: {r1} /= {r2}")]
    DivisionByZero { pc: usize, r1: Register, r2: Register },
    #[error("Unknown opcode {opcode} at pc {pc}")]
    UnknownOpcode { pc: usize, opcode: u8 },
    #[error("Input closed while executing IN {reg} at pc {pc}")]
    InputClosed { pc: usize, reg: Register },
    #[error("Input error at pc {pc}: {source}")]
    Input { pc: usize, #[source] source: Error },
    #[error("Output error at pc {pc}: {source}")]
    Output { pc: usize, #[source] source: Error },
}

impl Fault {
    /// Address of the instruction that faulted.
    pub fn pc(&self) -> usize {
        match *self {
            Fault::DivisionByZero { pc, .. }
            | Fault::UnknownOpcode { pc, .. }
            | Fault::InputClosed { pc, .. }
            | Fault::Input { pc, .. }
            | Fault::Output { pc, .. } => pc,
        }
    }
}

/// Interpreter state: program counter plus the register file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: usize,
    pub regs: Registers,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Executes the instruction at `pc` and advances by one byte.
    ///
    /// Returns `Halted` once `pc` reaches the end of `program`. On a fault `pc`
    /// is left pointing at the faulting instruction.
    pub fn step<C: Console, D: Decoder, X: Executor>(
        &mut self,
        program: &[u8],
        console: &mut C,
        dec: &D,
        exec: &X,
    ) -> Result<Status, Fault> {
        let Some(&raw) = program.get(self.pc) else {
            return Ok(Status::Halted);
        };
        let d = dec.decode(raw);
        exec.exec(self, console, d)?;
        self.pc += 1;
        if self.pc < program.len() {
            Ok(Status::Running)
        } else {
            Ok(Status::Halted)
        }
    }

    /// Steps until the program halts. Registers are only returned on normal completion.
    pub fn run<C: Console, D: Decoder, X: Executor>(
        &mut self,
        program: &[u8],
        console: &mut C,
        dec: &D,
        exec: &X,
    ) -> Result<Registers, Fault> {
        loop {
            match self.step(program, console, dec, exec) {
                Ok(Status::Running) => {}
                Ok(Status::Halted) => return Ok(self.regs),
                Err(fault) => {
                    tracing::warn!(pc = fault.pc(), "{fault}");
                    return Err(fault);
                }
            }
        }
    }
}

/// Runs `program` from a fresh register file with the stock decoder and executor.
pub fn run<C: Console>(program: &[u8], console: &mut C) -> Result<Registers, Fault> {
    Cpu::new().run(program, console, &Tiny8Decoder::new(), &IntExecutor)
}

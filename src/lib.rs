pub mod asm;
pub mod cpu;
pub mod decoder;
pub mod disasm;
pub mod exec;
pub mod instructions;
pub mod io;

pub mod isa {
    pub mod tiny8; // the single-byte Tiny-ASM encoding
}

pub use asm::{assemble_line, assemble_lines, assemble_str, AsmError, LineError, ProgramBuffer};
pub use cpu::{run, Cpu, Fault, Registers, Status};
pub use decoder::{ArithOp, Decoded, Decoder, IoDir, IsaError, Register};
pub use disasm::{disassemble, listing, ListingLine};
pub use io::{Console, ScriptedConsole, StdConsole};

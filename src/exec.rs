use crate::cpu::{Cpu, Fault};
use crate::decoder::{ArithOp, Decoded, IoDir};
use crate::io::Console;
use crate::isa::tiny8::IMM_MASK;

pub trait Executor {
    fn exec<C: Console>(&self, cpu: &mut Cpu, console: &mut C, d: Decoded) -> Result<(), Fault>;
}

pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec<C: Console>(&self, cpu: &mut Cpu, console: &mut C, d: Decoded) -> Result<(), Fault> {
        let pc = cpu.pc;
        match d {
            Decoded::Movi(imm) => {
                // MOVI has no destination field; it always targets a
                cpu.regs.a = imm;
                tracing::debug!(pc, "MOVI #{imm} -> a");
            }
            Decoded::Arith { op, r1, r2 } => {
                let x = cpu.regs.get(r1);
                let y = cpu.regs.get(r2);
                let res = match op {
                    ArithOp::Add => x.wrapping_add(y),
                    ArithOp::Sub => x.wrapping_sub(y),
                    ArithOp::Mul => x.wrapping_mul(y),
                    ArithOp::Div => x
                        .checked_div(y)
                        .ok_or(Fault::DivisionByZero { pc, r1, r2 })?,
                };
                cpu.regs.set(r1, res);
                tracing::debug!(pc, "{} {r1} {}= {r2} -> {res}", op.mnemonic(), symbol(op));
            }
            Decoded::Io { dir: IoDir::In, reg } => {
                let line = console
                    .read_line(reg)
                    .map_err(|source| Fault::Input { pc, source })?
                    .ok_or(Fault::InputClosed { pc, reg })?;
                let value = parse_input(&line);
                cpu.regs.set(reg, value);
                tracing::debug!(pc, "IN read {value} into {reg}");
            }
            Decoded::Io { dir: IoDir::Out, reg } => {
                let value = cpu.regs.get(reg);
                console
                    .write_out(reg, value)
                    .map_err(|source| Fault::Output { pc, source })?;
                tracing::debug!(pc, "OUT {reg}: {value}");
            }
            Decoded::Unknown(opcode) => return Err(Fault::UnknownOpcode { pc, opcode }),
        }
        Ok(())
    }
}

fn symbol(op: ArithOp) -> char {
    match op {
        ArithOp::Add => '+',
        ArithOp::Sub => '-',
        ArithOp::Mul => '*',
        ArithOp::Div => '/',
    }
}

/// Parses an `IN` line the way C's `atoi` does (leading whitespace, optional
/// sign, then as many digits as present). Anything unparseable or outside
/// 0..=127 reads as 0.
pub fn parse_input(line: &str) -> u8 {
    let s = line.trim_start();
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    let Ok(mag) = digits[..end].parse::<i64>() else {
        return 0;
    };
    let value = if neg { -mag } else { mag };
    if (0..=IMM_MASK as i64).contains(&value) {
        value as u8
    } else {
        0
    }
}

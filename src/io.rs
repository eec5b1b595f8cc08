use std::collections::VecDeque;
use std::io::{BufRead, StdinLock, Stdout, Write};

use anyhow::Result;

use crate::decoder::Register;

/// Line-oriented I/O used by the `IN` and `OUT` instructions.
pub trait Console {
    /// Blocks for one line of input destined for `reg`. `Ok(None)` signals end of input.
    fn read_line(&mut self, reg: Register) -> Result<Option<String>>;
    fn write_out(&mut self, reg: Register, value: u8) -> Result<()>;
}

/// Interactive console: prompts on `output`, reads lines from `input`.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl StdConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self, reg: Register) -> Result<Option<String>> {
        write!(self.output, "IN {reg}: enter value (0-127): ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn write_out(&mut self, reg: Register, value: u8) -> Result<()> {
        writeln!(self.output, "OUT {reg}: {value}")?;
        Ok(())
    }
}

/// Non-interactive console fed from a queue of lines; records every `OUT`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    pub input: VecDeque<String>,
    pub output: Vec<(Register, u8)>,
}

impl ScriptedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Values written so far, in order.
    pub fn values(&self) -> Vec<u8> {
        self.output.iter().map(|&(_, v)| v).collect()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, _reg: Register) -> Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_out(&mut self, reg: Register, value: u8) -> Result<()> {
        self.output.push((reg, value));
        Ok(())
    }
}

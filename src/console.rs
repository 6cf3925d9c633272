use crate::error::Result;
use crate::solver::Answers;
use alloc::vec::Vec;
use core::fmt;

pub trait ConsoleOutput {
    fn output(&mut self, line: &[u8]);
}

impl ConsoleOutput for Vec<u8> {
    fn output(&mut self, line: &[u8]) {
        self.extend_from_slice(line);
    }
}

/// Line-oriented text console over a byte sink. Serial terminals get `\r\n`.
pub struct Console<Output> {
    output: Output,
    eol: &'static str,
}

impl<Output: ConsoleOutput> Console<Output> {
    pub fn new(output: Output) -> Self {
        Self::with_eol(output, "\r\n")
    }

    pub fn with_eol(output: Output, eol: &'static str) -> Self {
        Self { output, eol }
    }

    pub fn writeln(&mut self, line: &str) {
        self.output.output(line.as_bytes());
        self.output.output(self.eol.as_bytes());
    }

    pub fn write_line(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::Write::write_fmt(self, args);
        self.output.output(self.eol.as_bytes());
    }

    pub fn into_inner(self) -> Output {
        self.output
    }
}

impl<Output: ConsoleOutput> fmt::Write for Console<Output> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.output(s.as_bytes());
        Ok(())
    }
}

/// Prints the outcome of a run: the answers line, or the reason there is none.
pub fn report<Output: ConsoleOutput>(console: &mut Console<Output>, result: &Result<Answers>) {
    match result {
        Ok(answers) => console.write_line(format_args!("{answers}")),
        Err(err) => console.write_line(format_args!("error : {err}")),
    }
}

use defrag_pico::config::Limits;
use defrag_pico::console::{Console, ConsoleOutput, report};
use defrag_pico::solver::DiskCompaction;
use std::io::Write;
use std::process::ExitCode;

/// Same run as the board, printed to stdout. An optional path argument
/// replaces the embedded disk map.
pub fn main() -> ExitCode {
    let input = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(input) => input,
            Err(err) => {
                eprintln!("cannot read {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => crate::INPUT.to_string(),
    };

    let result = DiskCompaction::new(&input, Limits::unbounded()).answers();
    let mut console = Console::with_eol(StdoutWriter(std::io::stdout()), "\n");
    report(&mut console, &result);

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

struct StdoutWriter(std::io::Stdout);

impl ConsoleOutput for StdoutWriter {
    fn output(&mut self, line: &[u8]) {
        let _ = self.0.write_all(line);
    }
}

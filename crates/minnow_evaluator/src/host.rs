//! Host I/O for the `read` and `write` built-ins.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// The ambient input and output a program runs against.
pub trait Host {
    /// Read one line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> Option<String>;

    /// Write one line of output.
    fn write_line(&mut self, text: &str);
}

/// Reads from stdin and writes to stdout.
#[derive(Debug, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\r', '\n']).len();
                line.truncate(trimmed);
                Some(line)
            }
        }
    }

    fn write_line(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        // A closed stdout is not the program's concern
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

/// Serves queued input lines and records output, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryHost {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl MemoryHost {
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

    /// Every line written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl Host for MemoryHost {
    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn write_line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}

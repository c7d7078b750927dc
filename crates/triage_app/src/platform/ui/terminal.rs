use std::io::{self, Write};

use base64::Engine;
use triage_logging::triage_warn;

const PICKER_PROMPT: &str = "Path to upload (blank to cancel):";

/// Output side of the terminal front end, plus the picker it may have open.
pub struct Terminal<W: Write> {
    out: W,
    picker_open: bool,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            picker_open: false,
        }
    }

    /// The next input line answers the picker instead of being a command.
    pub fn open_picker(&mut self) {
        self.picker_open = true;
        self.prompt(PICKER_PROMPT);
    }

    pub fn take_picker_open(&mut self) -> bool {
        std::mem::take(&mut self.picker_open)
    }

    pub fn print_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|_| self.out.flush());
        self.report(result);
    }

    pub fn alert(&mut self, message: &str) {
        let result = writeln!(self.out, "! {message}").and_then(|_| self.out.flush());
        self.report(result);
    }

    pub fn prompt(&mut self, question: &str) {
        let result = write!(self.out, "{question} ").and_then(|_| self.out.flush());
        self.report(result);
    }

    /// Sets the system clipboard via the OSC 52 escape sequence.
    pub fn copy_to_clipboard(&mut self, text: &str) {
        let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
        let result = write!(self.out, "\x1b]52;c;{encoded}\x07")
            .and_then(|_| self.out.flush());
        self.report(result);
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn report(&self, result: io::Result<()>) {
        if let Err(err) = result {
            triage_warn!("Terminal write failed: {}", err);
        }
    }
}

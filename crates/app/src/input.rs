//! Line sources for the interactive menu.

use std::io::{self, BufRead};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// One read from a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A line without its terminator.
    Text(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// End of input.
    Eof,
}

/// Where the menu reads its answers from.
pub trait LineSource {
    /// Show `prompt` (if the source is interactive) and read one line.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the underlying input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Line>;
}

/// Line editor on the controlling terminal.
pub struct TerminalLines {
    editor: DefaultEditor,
}

impl TerminalLines {
    /// # Errors
    ///
    /// Fails if the terminal cannot be set up for line editing.
    pub fn new() -> io::Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| io::Error::other(format!("failed to initialize editor: {e}")))?;
        Ok(Self { editor })
    }
}

impl LineSource for TerminalLines {
    fn read_line(&mut self, prompt: &str) -> io::Result<Line> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Line::Text(line)),
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }
}

/// Plain buffered reader, for piped input and scripted runs.
///
/// Prompts are not echoed.
pub struct ReaderLines<R> {
    reader: R,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn read_line(&mut self, _prompt: &str) -> io::Result<Line> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Line::Eof);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Line::Text(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_strips_terminators_and_reports_eof() {
        let mut lines = ReaderLines::new("a\r\nb\n\nlast".as_bytes());
        assert_eq!(lines.read_line("> ").unwrap(), Line::Text("a".into()));
        assert_eq!(lines.read_line("> ").unwrap(), Line::Text("b".into()));
        assert_eq!(lines.read_line("> ").unwrap(), Line::Text(String::new()));
        assert_eq!(lines.read_line("> ").unwrap(), Line::Text("last".into()));
        assert_eq!(lines.read_line("> ").unwrap(), Line::Eof);
    }
}

mod completer;

use std::io::BufRead;

use rustyline::{config::Configurer, error::ReadlineError, history::FileHistory, Editor};

pub use completer::ShellCompleter;

use crate::error::ShellError;
use crate::highlight::SyntaxHighlighter;

/// One read from the input side of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    Interrupted,
    Eof,
}

/// Supplies the read-eval loop with input lines.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line, ShellError>;

    /// Lets interactive sources refresh completion after aliases or `PATH` change.
    fn update_completions(&mut self, _aliases: Vec<String>) {}
}

/// Interactive input through rustyline, with completion and highlighting.
pub struct ReadlineSource {
    editor: Editor<ShellCompleter, FileHistory>,
}

impl ReadlineSource {
    pub fn new(highlighter: SyntaxHighlighter) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(highlighter)));
        editor.set_auto_add_history(true);
        Ok(ReadlineSource { editor })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Line, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Line::Text(line)),
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn update_completions(&mut self, aliases: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.update_aliases(aliases);
            helper.refresh_commands();
        }
    }
}

/// Non-interactive input from any buffered reader, e.g. piped stdin. Bytes
/// that are not UTF-8 are replaced rather than ending the input.
pub struct BufferedSource<R> {
    reader: R,
}

impl<R: BufRead> BufferedSource<R> {
    pub fn new(reader: R) -> Self {
        BufferedSource { reader }
    }
}

impl<R: BufRead> LineSource for BufferedSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Line, ShellError> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(Line::Eof);
        }
        Ok(Line::Text(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_buffered_source_keeps_newlines_and_ends() {
        let mut source = BufferedSource::new(Cursor::new("ls -l\ncd\n"));
        assert_eq!(source.read_line("> ").unwrap(), Line::Text("ls -l\n".into()));
        assert_eq!(source.read_line("> ").unwrap(), Line::Text("cd\n".into()));
        assert_eq!(source.read_line("> ").unwrap(), Line::Eof);
    }

    #[test]
    fn test_buffered_source_survives_invalid_utf8() {
        let mut source = BufferedSource::new(Cursor::new(&b"echo \xff\nalias a ls\n"[..]));
        assert_eq!(
            source.read_line("> ").unwrap(),
            Line::Text("echo \u{fffd}\n".into())
        );
        assert_eq!(source.read_line("> ").unwrap(), Line::Text("alias a ls\n".into()));
        assert_eq!(source.read_line("> ").unwrap(), Line::Eof);
    }
}

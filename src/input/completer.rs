use std::{borrow::Cow, collections::BTreeSet, env, fs};

use crate::core::commands::BUILTIN_NAMES;
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, FilenameCompleter, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Editor helper: completes command names (built-ins, aliases and programs
/// on `PATH`) in first position and file names elsewhere.
pub struct ShellCompleter {
    commands: BTreeSet<String>,
    aliases: BTreeSet<String>,
    files: FilenameCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(highlighter: SyntaxHighlighter) -> Self {
        let mut completer = ShellCompleter {
            commands: BTreeSet::new(),
            aliases: BTreeSet::new(),
            files: FilenameCompleter::new(),
            highlighter,
        };
        completer.refresh_commands();
        completer
    }

    /// Rescans `PATH`; called after `setpath` may have changed it.
    pub fn refresh_commands(&mut self) {
        self.commands.clear();
        self.commands
            .extend(BUILTIN_NAMES.iter().map(|name| name.to_string()));

        let Some(path_var) = env::var_os("PATH") else {
            return;
        };
        for dir in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_candidate = entry
                    .file_type()
                    .map(|t| t.is_file() || t.is_symlink())
                    .unwrap_or(false);
                if let (true, Some(name)) = (is_candidate, entry.file_name().to_str()) {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn update_aliases(&mut self, names: impl IntoIterator<Item = String>) {
        self.aliases = names.into_iter().collect();
    }

    fn complete_command(&self, word: &str) -> Vec<Pair> {
        let aliases = self.aliases.iter().filter(|a| a.starts_with(word)).map(|a| Pair {
            display: format!("{} (alias)", a),
            replacement: a.clone(),
        });
        let commands = self
            .commands
            .iter()
            .filter(|c| c.starts_with(word))
            .map(|c| Pair {
                display: c.clone(),
                replacement: c.clone(),
            });
        aliases.chain(commands).collect()
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before_cursor = &line[..pos];
        let word_start = before_cursor
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let in_first_word = before_cursor[..word_start].trim().is_empty();

        if in_first_word {
            Ok((word_start, self.complete_command(&before_cursor[word_start..])))
        } else {
            self.files.complete(line, pos, ctx)
        }
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

mod alias;
mod cd;
mod exit;
mod history;
mod path;

pub use alias::{AliasCommand, UnaliasCommand};
pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use history::HistoryCommand;
pub use path::{GetPathCommand, SetPathCommand};

use super::aliases::AliasError;
use super::history::{HistoryError, RepeatSpec};
use super::session::Session;
use super::tokenizer::tokenize;
use crate::process::{ProcessError, ProcessRunner};

pub const BUILTIN_NAMES: [&str; 7] = [
    "exit", "cd", "getpath", "setpath", "history", "alias", "unalias",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    HomeDirNotFound,
    Alias(AliasError),
    History(HistoryError),
    Process(ProcessError),
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl CommandError {
    fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Io {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::HomeDirNotFound => write!(f, "home directory not found"),
            CommandError::Alias(err) => write!(f, "alias: {}", err),
            CommandError::History(err) => write!(f, "{}", err),
            CommandError::Process(err) => write!(f, "{}", err),
            CommandError::Io { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<AliasError> for CommandError {
    fn from(err: AliasError) -> Self {
        CommandError::Alias(err)
    }
}

impl From<HistoryError> for CommandError {
    fn from(err: HistoryError) -> Self {
        CommandError::History(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::io("output", err)
    }
}

/// What the read-eval loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Whether a line joins the history once it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recording {
    Record,
    Skip,
}

/// The mutable world a command runs against.
pub struct Context<'a> {
    pub session: &'a mut Session,
    pub out: &'a mut dyn Write,
    pub quiet: bool,
}

pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    Cd(CdCommand),
    GetPath(GetPathCommand),
    SetPath(SetPathCommand),
    History(HistoryCommand),
    Alias(AliasCommand),
    Unalias(UnaliasCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(args, ctx),
            CommandType::Cd(cmd) => cmd.execute(args, ctx),
            CommandType::GetPath(cmd) => cmd.execute(args, ctx),
            CommandType::SetPath(cmd) => cmd.execute(args, ctx),
            CommandType::History(cmd) => cmd.execute(args, ctx),
            CommandType::Alias(cmd) => cmd.execute(args, ctx),
            CommandType::Unalias(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// Routes a tokenized line to a built-in or to an external program.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_runner: ProcessRunner,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("exit", CommandType::Exit(ExitCommand));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("getpath", CommandType::GetPath(GetPathCommand));
        commands.insert("setpath", CommandType::SetPath(SetPathCommand));
        commands.insert("history", CommandType::History(HistoryCommand));
        commands.insert("alias", CommandType::Alias(AliasCommand));
        commands.insert("unalias", CommandType::Unalias(UnaliasCommand));

        Self {
            commands,
            process_runner: ProcessRunner::new(),
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    /// Runs one input line: alias substitution, tokenizing, then dispatch.
    /// Repeat notation is resolved against the history and re-enters here
    /// with `Recording::Skip`; a line run that way may not repeat again.
    pub fn run_line(
        &self,
        line: &str,
        ctx: &mut Context<'_>,
        recording: Recording,
    ) -> Result<Flow, CommandError> {
        let resolved = ctx.session.aliases.resolve(line);
        if resolved != line {
            log::debug!("alias expanded {:?} to {:?}", line.trim_end(), resolved);
        }

        let argv = tokenize(&resolved);
        let Some(first) = argv.first() else {
            return Ok(Flow::Continue);
        };

        if RepeatSpec::is_repeat(first) {
            if recording == Recording::Skip {
                return Err(CommandError::InvalidArguments(format!(
                    "{}: a history invocation cannot start another",
                    first
                )));
            }
            return history::execute_by_index(self, &argv, ctx);
        }

        let result = self.execute(&argv, ctx);
        if recording == Recording::Record {
            let sequence = ctx.session.history.push(line);
            log::debug!("recorded history entry {}", sequence + 1);
        }
        result
    }

    /// Executes an already tokenized command.
    pub fn execute(&self, argv: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let Some((name, args)) = argv.split_first() else {
            return Ok(Flow::Continue);
        };

        if let Some(cmd) = self.commands.get(name.as_str()) {
            return cmd.execute(args, ctx);
        }

        let status = self.process_runner.run(argv)?;
        if !status.success() && !ctx.quiet {
            writeln!(ctx.out, "{} exited with {}", name, status)?;
        }
        Ok(Flow::Continue)
    }
}

fn expect_no_args(name: &str, args: &[String]) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::InvalidArguments(format!(
            "Too many arguments for {}",
            name
        )))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::test_support::env_lock;
    use tempfile::TempDir;

    pub(crate) struct Harness {
        pub session: Session,
        pub out: Vec<u8>,
        pub executor: CommandExecutor,
        _dir: TempDir,
    }

    impl Harness {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let session = Session::new(Config::in_dir(dir.path()));
            Harness {
                session,
                out: Vec::new(),
                executor: CommandExecutor::new(),
                _dir: dir,
            }
        }

        pub fn line(&mut self, line: &str) -> Result<Flow, CommandError> {
            let mut ctx = Context {
                session: &mut self.session,
                out: &mut self.out,
                quiet: false,
            };
            self.executor.run_line(line, &mut ctx, Recording::Record)
        }

        pub fn take_output(&mut self) -> String {
            String::from_utf8(std::mem::take(&mut self.out)).unwrap()
        }
    }

    #[test]
    fn test_builtin_command_detection() {
        let executor = CommandExecutor::new();
        for name in BUILTIN_NAMES {
            assert!(executor.is_builtin(name));
            assert!(is_builtin(name));
        }
        assert!(!executor.is_builtin("ls"));
        assert!(!executor.is_builtin("Exit"));
        assert!(!executor.is_builtin(""));
    }

    #[test]
    fn test_empty_line_is_ignored() {
        let mut harness = Harness::new();
        assert_eq!(harness.line("   \t;\n").unwrap(), Flow::Continue);
        assert!(harness.session.history.is_empty());
        assert_eq!(harness.take_output(), "");
    }

    #[test]
    fn test_lines_are_recorded_raw() {
        let _guard = env_lock();
        let mut harness = Harness::new();
        harness.line("alias ll ls -l\n").unwrap();
        harness.line("ll /\n").unwrap();

        let commands: Vec<String> = harness
            .session
            .history
            .entries()
            .map(|e| e.command.clone())
            .collect();
        assert_eq!(commands, vec!["alias ll ls -l\n", "ll /\n"]);
    }

    #[test]
    fn test_failed_commands_are_still_recorded() {
        let _guard = env_lock();
        let mut harness = Harness::new();
        assert!(harness.line("getpath extra").is_err());
        assert_eq!(harness.session.history.len(), 1);
    }

    #[test]
    fn test_unknown_program_reports_spawn_error() {
        let _guard = env_lock();
        let mut harness = Harness::new();
        let err = harness.line("no-such-program-xyz arg").unwrap_err();
        assert!(matches!(err, CommandError::Process(ProcessError::Spawn { .. })));
    }

    #[test]
    fn test_nonzero_exit_is_reported() {
        let _guard = env_lock();
        let mut harness = Harness::new();
        assert_eq!(harness.line("false").unwrap(), Flow::Continue);
        assert!(harness.take_output().starts_with("false exited with"));
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::InvalidArguments("bad args".to_string()),
            CommandError::HomeDirNotFound,
            CommandError::Alias(AliasError::NoSpace),
            CommandError::History(HistoryError::EmptyHistory),
            CommandError::io("cd", std::io::Error::from(std::io::ErrorKind::NotFound)),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}

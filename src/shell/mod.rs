use std::env;
use std::io::{self, IsTerminal, Write};

mod executor;

use crate::{
    core::{
        commands::{CommandExecutor, Flow},
        config::Config,
        session::Session,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{BufferedSource, Line, LineSource, ReadlineSource},
    path::home_dir,
};

use executor::CommandHandler;

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `exit` or end of input.
    Clean,
    /// A fatal error forced the shutdown.
    Fatal,
}

impl Termination {
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Clean => 0,
            Termination::Fatal => 1,
        }
    }
}

pub struct Shell {
    pub(crate) input: Box<dyn LineSource>,
    pub(crate) out: Box<dyn Write>,
    pub(crate) session: Session,
    pub(crate) executor: CommandExecutor,
    pub(crate) highlighter: SyntaxHighlighter,
    pub(crate) flags: Flags,
    pub(crate) interactive: bool,
}

impl Shell {
    /// A shell on the process's own terminal: rustyline when stdin is a tty,
    /// plain line reading otherwise.
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let config = Config::from_flags(&flags)?;
        let interactive = io::stdin().is_terminal();
        let highlighter = if io::stdout().is_terminal() {
            SyntaxHighlighter::new()
        } else {
            SyntaxHighlighter::plain()
        };

        let input: Box<dyn LineSource> = if interactive {
            Box::new(ReadlineSource::new(highlighter)?)
        } else {
            Box::new(BufferedSource::new(io::stdin().lock()))
        };

        // A foreground child receives the interrupt; the shell keeps running.
        ctrlc::set_handler(move || {
            println!();
        })?;

        match home_dir() {
            Some(home) => {
                if let Err(e) = env::set_current_dir(&home) {
                    log::warn!("could not change to {}: {}", home.display(), e);
                }
            }
            None => log::warn!("no home directory; staying in the current directory"),
        }

        let mut shell = Shell::with_io(flags, config, input, Box::new(io::stdout()), highlighter);
        shell.interactive = interactive;
        Ok(shell)
    }

    /// A shell wired to the given collaborators, for embedding and tests.
    pub fn with_io(
        flags: Flags,
        config: Config,
        input: Box<dyn LineSource>,
        out: Box<dyn Write>,
        highlighter: SyntaxHighlighter,
    ) -> Self {
        Shell {
            input,
            out,
            session: Session::new(config),
            executor: CommandExecutor::new(),
            highlighter,
            flags,
            interactive: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn quiet(&self) -> bool {
        self.flags.is_set("quiet")
    }

    pub fn run(&mut self) -> Result<Termination, ShellError> {
        if let Err(e) = self.session.load() {
            self.report(&e.to_string());
            self.shutdown();
            return Ok(Termination::Fatal);
        }
        self.refresh_completions();

        if !self.quiet() {
            let path = env::var_os("PATH").unwrap_or_default();
            writeln!(self.out, "Initial PATH: {}", path.to_string_lossy())?;
        }

        loop {
            let prompt = self.prompt();
            match self.input.read_line(&prompt) {
                Ok(Line::Text(line)) => match self.execute_command(&line) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => break,
                    Err(e) => self.report(&e.to_string()),
                },
                Ok(Line::Interrupted) => {
                    if !self.quiet() {
                        writeln!(self.out, "Use 'exit' to leave the shell")?;
                    }
                }
                Ok(Line::Eof) => {
                    if self.interactive {
                        writeln!(self.out, "exit")?;
                    }
                    break;
                }
                Err(e) => {
                    self.report(&e.to_string());
                    break;
                }
            }
            self.out.flush()?;
        }

        self.shutdown();
        Ok(Termination::Clean)
    }

    fn prompt(&self) -> String {
        if !self.interactive {
            return "> ".to_string();
        }
        match env::current_dir() {
            Ok(dir) => format!("{} > ", dir.display()),
            Err(_) => "> ".to_string(),
        }
    }

    /// Best-effort save and `PATH` restore; problems are reported, not raised.
    fn shutdown(&mut self) {
        if let Err(e) = self.session.shutdown() {
            self.report(&e.to_string());
        }
        if !self.quiet() {
            let path = env::var_os("PATH").unwrap_or_default();
            if let Err(e) = writeln!(self.out, "Restored PATH: {}", path.to_string_lossy()) {
                log::error!("could not write output: {}", e);
            }
        }
        if let Err(e) = self.out.flush() {
            log::error!("could not flush output: {}", e);
        }
    }

    fn report(&mut self, message: &str) {
        let line = self.highlighter.highlight_error(message);
        if let Err(e) = writeln!(self.out, "{}", line) {
            log::error!("could not write output: {}", e);
        }
    }
}

use std::env;

use crate::core::commands::{CommandError, Context, Flow, Recording};

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<Flow, CommandError>;
    fn refresh_completions(&mut self);
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<Flow, CommandError> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let path_before = env::var_os("PATH");
        let aliases_before = self.session.aliases.len();

        let mut ctx = Context {
            session: &mut self.session,
            out: &mut *self.out,
            quiet: self.flags.is_set("quiet"),
        };
        let result = self
            .executor
            .run_line(line, &mut ctx, Recording::Record);

        if env::var_os("PATH") != path_before || self.session.aliases.len() != aliases_before {
            self.refresh_completions();
        }
        result
    }

    fn refresh_completions(&mut self) {
        let names = self
            .session
            .aliases
            .list()
            .map(|(_, alias)| alias.name.clone())
            .collect();
        self.input.update_completions(names);
    }
}

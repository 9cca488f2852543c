use super::cd::change_directory;
use super::{expect_no_args, Command, CommandError, Context, Flow};
use crate::path::home_dir;
use std::env;

#[derive(Clone, Copy)]
pub struct GetPathCommand;

impl Command for GetPathCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        expect_no_args("getpath", args)?;
        let path = env::var_os("PATH").unwrap_or_default();
        writeln!(ctx.out, "PATH: {}", path.to_string_lossy())?;
        Ok(Flow::Continue)
    }
}

/// Sets `PATH` for the rest of the session. The literal argument `HOME` is a
/// long-standing special case: it changes to the home directory instead.
#[derive(Clone, Copy)]
pub struct SetPathCommand;

impl Command for SetPathCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let value = match args {
            [value] => value,
            [] => {
                return Err(CommandError::InvalidArguments(
                    "setpath requires an argument. PATH unchanged".to_string(),
                ))
            }
            _ => {
                return Err(CommandError::InvalidArguments(
                    "Too many arguments for setpath".to_string(),
                ))
            }
        };

        if value == "HOME" {
            let home = home_dir().ok_or(CommandError::HomeDirNotFound)?;
            change_directory(&home, ctx)?;
        } else {
            env::set_var("PATH", value);
            writeln!(ctx.out, "Current PATH: {}", value)?;
        }
        Ok(Flow::Continue)
    }
}

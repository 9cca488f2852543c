use super::{expect_no_args, Command, CommandError, CommandExecutor, Context, Flow, Recording};

#[derive(Clone, Copy)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        expect_no_args("history", args)?;
        for entry in ctx.session.history.entries() {
            write!(ctx.out, "{} {}", entry.display_number(), entry.command)?;
        }
        Ok(Flow::Continue)
    }
}

/// Re-runs the entry named by `argv[0]` (`!!`, `!n` or `!-n`) as though it had
/// just been typed, except that it is not recorded again.
pub(super) fn execute_by_index(
    executor: &CommandExecutor,
    argv: &[String],
    ctx: &mut Context<'_>,
) -> Result<Flow, CommandError> {
    let [token] = argv else {
        return Err(CommandError::InvalidArguments(format!(
            "{}: history invocations take no arguments",
            argv.first().map_or("", String::as_str)
        )));
    };

    let command = ctx.session.history.resolve_index(token)?.command.clone();
    log::debug!("{} resolved to {:?}", token, command.trim_end());
    write!(ctx.out, "{}", command)?;
    executor.run_line(&command, ctx, Recording::Skip)
}

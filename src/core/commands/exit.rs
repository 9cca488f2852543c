use super::{expect_no_args, Command, CommandError, Context, Flow};

/// Asks the loop to shut down. Saving state and restoring `PATH` happen there,
/// so end-of-input takes exactly the same route.
#[derive(Clone, Copy)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, args: &[String], _ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        expect_no_args("exit", args)?;
        Ok(Flow::Exit)
    }
}

use super::{Command, CommandError, Context, Flow};
use crate::core::aliases::AliasUpdate;

/// `alias` lists, `alias name expansion...` adds or replaces.
#[derive(Clone, Copy)]
pub struct AliasCommand;

impl Command for AliasCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let Some((name, expansion)) = args.split_first() else {
            list(ctx)?;
            return Ok(Flow::Continue);
        };

        match ctx.session.aliases.set(name, expansion)? {
            AliasUpdate::Added => {
                writeln!(ctx.out, "[\"{}\" - \"{}\"] added.", name, expansion.join(" "))?;
            }
            AliasUpdate::Replaced { old } => {
                writeln!(
                    ctx.out,
                    "[\"{0}\" - \"{1}\"] has been successfully updated to [\"{0}\" - \"{2}\"].",
                    name,
                    old,
                    expansion.join(" ")
                )?;
            }
        }
        Ok(Flow::Continue)
    }
}

fn list(ctx: &mut Context<'_>) -> Result<(), CommandError> {
    if ctx.session.aliases.is_empty() {
        writeln!(ctx.out, "No aliases set")?;
        return Ok(());
    }
    for (slot, alias) in ctx.session.aliases.list() {
        writeln!(ctx.out, "{}. [{} - {}]", slot + 1, alias.name, alias.expansion)?;
    }
    Ok(())
}

#[derive(Clone, Copy)]
pub struct UnaliasCommand;

impl Command for UnaliasCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let [name] = args else {
            return Err(CommandError::InvalidArguments(
                "Usage: unalias <name>".to_string(),
            ));
        };

        let removed = ctx.session.aliases.remove(name)?;
        writeln!(
            ctx.out,
            "[\"{}\" - \"{}\"] successfully removed.",
            removed.name, removed.expansion
        )?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::Harness;
    use super::*;
    use crate::core::aliases::AliasError;

    #[test]
    fn test_alias_add_and_list() {
        let mut harness = Harness::new();
        harness.line("alias").unwrap();
        assert_eq!(harness.take_output(), "No aliases set\n");

        harness.line("alias ll ls -l").unwrap();
        assert_eq!(harness.take_output(), "[\"ll\" - \"ls -l\"] added.\n");

        harness.line("alias").unwrap();
        assert_eq!(harness.take_output(), "1. [ll - ls -l]\n");
    }

    #[test]
    fn test_alias_update_reports_both_values() {
        let mut harness = Harness::new();
        harness.line("alias ll ls -l").unwrap();
        harness.take_output();
        harness.line("alias ll ls -la").unwrap();
        assert_eq!(
            harness.take_output(),
            "[\"ll\" - \"ls -l\"] has been successfully updated to [\"ll\" - \"ls -la\"].\n"
        );
    }

    #[test]
    fn test_alias_without_expansion_is_rejected() {
        let mut harness = Harness::new();
        assert!(matches!(
            harness.line("alias ll"),
            Err(CommandError::Alias(AliasError::MissingExpansion(_)))
        ));
        assert!(harness.session.aliases.is_empty());
    }

    #[test]
    fn test_alias_table_full() {
        let mut harness = Harness::new();
        let capacity = harness.session.aliases.capacity();
        for i in 0..capacity {
            harness.line(&format!("alias a{} ls", i)).unwrap();
        }
        assert!(matches!(
            harness.line("alias extra ls"),
            Err(CommandError::Alias(AliasError::NoSpace))
        ));
    }

    #[test]
    fn test_unalias() {
        let mut harness = Harness::new();
        harness.line("alias ll ls -l").unwrap();
        harness.take_output();

        harness.line("unalias ll").unwrap();
        assert_eq!(harness.take_output(), "[\"ll\" - \"ls -l\"] successfully removed.\n");
        assert!(matches!(
            harness.line("unalias ll"),
            Err(CommandError::Alias(AliasError::NotFound(_)))
        ));
        assert!(matches!(
            harness.line("unalias"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            harness.line("unalias a b"),
            Err(CommandError::InvalidArguments(_))
        ));
    }
}

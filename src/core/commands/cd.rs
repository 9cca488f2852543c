use super::{Command, CommandError, Context, Flow};
use crate::path::PathExpander;
use std::env;
use std::path::Path;

#[derive(Clone, Default)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

/// Changes directory and confirms where the shell now is. On failure the
/// working directory is left as it was and is still reported.
pub(super) fn change_directory(path: &Path, ctx: &mut Context<'_>) -> Result<(), CommandError> {
    let changed = env::set_current_dir(path)
        .map_err(|e| CommandError::io(path.display().to_string(), e));
    let cwd = env::current_dir().map_err(|e| CommandError::io("getcwd", e))?;
    writeln!(ctx.out, "Current working directory: {}", cwd.display())?;
    changed
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let target = match args {
            [] => self
                .path_expander
                .home()
                .map_err(|_| CommandError::HomeDirNotFound)?,
            [path] => self
                .path_expander
                .expand(path)
                .map_err(|_| CommandError::HomeDirNotFound)?,
            _ => {
                return Err(CommandError::InvalidArguments(
                    "Too many arguments for cd".to_string(),
                ))
            }
        };

        change_directory(&target, ctx)?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::Harness;
    use super::*;
    use crate::path::home_dir;
    use crate::test_support::env_lock;
    use tempfile::tempdir;

    #[test]
    fn test_cd_home() {
        let _guard = env_lock();
        let mut harness = Harness::new();
        harness.line("cd").unwrap();
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            home_dir().unwrap().canonicalize().unwrap()
        );
        assert!(harness
            .take_output()
            .starts_with("Current working directory: "));
    }

    #[test]
    fn test_cd_relative_navigation() {
        let _guard = env_lock();
        let dir = tempdir().unwrap();
        let base = dir.path().canonicalize().unwrap();
        std::fs::create_dir(base.join("child")).unwrap();

        let mut harness = Harness::new();
        harness.line(&format!("cd {}", base.join("child").display())).unwrap();
        harness.line("cd .").unwrap();
        assert_eq!(env::current_dir().unwrap(), base.join("child"));
        harness.line("cd ..").unwrap();
        assert_eq!(env::current_dir().unwrap(), base);
    }

    #[test]
    fn test_cd_invalid_leaves_directory() {
        let _guard = env_lock();
        let dir = tempdir().unwrap();
        let base = dir.path().canonicalize().unwrap();
        env::set_current_dir(&base).unwrap();

        let mut harness = Harness::new();
        let err = harness.line("cd /nonexistent-path-xyz").unwrap_err();
        assert!(matches!(err, CommandError::Io { .. }));
        assert!(err.to_string().starts_with("/nonexistent-path-xyz: "));
        assert_eq!(env::current_dir().unwrap(), base);
        assert_eq!(
            harness.take_output(),
            format!("Current working directory: {}\n", base.display())
        );
    }

    #[test]
    fn test_cd_too_many_arguments() {
        let _guard = env_lock();
        let before = env::current_dir().unwrap();
        let mut harness = Harness::new();
        assert!(matches!(
            harness.line("cd /tmp /var"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert_eq!(env::current_dir().unwrap(), before);
    }
}

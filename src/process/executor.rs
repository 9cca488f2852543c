use std::process::{Command, ExitStatus, Stdio};

use super::ProcessError;

/// Runs external programs in the foreground. The program is looked up on the
/// current `PATH` by the OS unless it already contains a `/`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        ProcessRunner
    }

    /// Spawns `argv[0]` with the remaining arguments and blocks until it exits.
    pub fn run(&self, argv: &[String]) -> Result<ExitStatus, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program.clone(),
                source,
            })?;

        log::debug!("spawned {} (pid {})", program, child.id());

        let status = child.wait().map_err(|source| ProcessError::Wait {
            program: program.clone(),
            source,
        })?;

        log::debug!("{} finished with {}", program, status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env_lock;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reports_exit_status() {
        let _guard = env_lock();
        let runner = ProcessRunner::new();

        assert!(runner.run(&argv(&["true"])).unwrap().success());
        assert!(!runner.run(&argv(&["false"])).unwrap().success());
        assert_eq!(runner.run(&argv(&["sh", "-c", "exit 3"])).unwrap().code(), Some(3));
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let _guard = env_lock();
        let result = ProcessRunner::new().run(&argv(&["definitely-not-a-program-xyz"]));

        match result {
            Err(err @ ProcessError::Spawn { .. }) => {
                assert!(err.to_string().starts_with("definitely-not-a-program-xyz: "));
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_argv() {
        assert!(matches!(
            ProcessRunner::new().run(&[]),
            Err(ProcessError::EmptyCommand)
        ));
    }
}

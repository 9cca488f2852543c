use std::fmt;

pub mod executor;

pub use executor::ProcessRunner;

#[derive(Debug)]
pub enum ProcessError {
    EmptyCommand,
    Spawn {
        program: String,
        source: std::io::Error,
    },
    Wait {
        program: String,
        source: std::io::Error,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::EmptyCommand => write!(f, "no command to run"),
            ProcessError::Spawn { program, source } => write!(f, "{}: {}", program, source),
            ProcessError::Wait { program, source } => {
                write!(f, "{}: failed waiting for process: {}", program, source)
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::EmptyCommand => None,
            ProcessError::Spawn { source, .. } | ProcessError::Wait { source, .. } => Some(source),
        }
    }
}

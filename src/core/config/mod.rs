use std::fmt;
use std::path::Path;

mod loader;
mod paths;

pub use loader::{load_aliases, save_aliases};
pub use paths::{ConfigPaths, ALIAS_FILE_NAME, HISTORY_FILE_NAME};

use super::aliases::DEFAULT_ALIAS_CAPACITY;
use super::history::DEFAULT_HISTORY_CAPACITY;
use crate::flags::Flags;

/// Where session state is persisted and how much of it is kept.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: ConfigPaths,
    pub history_capacity: usize,
    pub alias_capacity: usize,
    pub persist: bool,
}

impl Config {
    pub fn from_flags(flags: &Flags) -> Result<Self, ConfigError> {
        let paths = ConfigPaths::new(flags.get_value("config").map(Path::new))?;
        Ok(Config {
            paths,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            alias_capacity: DEFAULT_ALIAS_CAPACITY,
            persist: !flags.is_set("no-persist"),
        })
    }

    pub fn in_dir(dir: &Path) -> Self {
        Config {
            paths: ConfigPaths::in_dir(dir),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            alias_capacity: DEFAULT_ALIAS_CAPACITY,
            persist: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    IoError(std::io::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

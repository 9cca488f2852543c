use super::ConfigError;
use crate::path::home_dir;
use std::path::{Path, PathBuf};

pub const HISTORY_FILE_NAME: &str = ".hist_list";
pub const ALIAS_FILE_NAME: &str = ".aliases";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub history_path: PathBuf,
    pub alias_path: PathBuf,
}

impl ConfigPaths {
    /// Files live in `dir` when given, otherwise in the user's home.
    pub fn new(dir: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match dir {
            Some(dir) => dir.to_path_buf(),
            None => home_dir().ok_or(ConfigError::HomeDirNotFound)?,
        };
        Ok(Self::in_dir(&base))
    }

    pub fn in_dir(base: &Path) -> Self {
        ConfigPaths {
            history_path: base.join(HISTORY_FILE_NAME),
            alias_path: base.join(ALIAS_FILE_NAME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir() {
        let paths = ConfigPaths::new(Some(Path::new("/home/testuser"))).unwrap();

        assert_eq!(paths.history_path, PathBuf::from("/home/testuser/.hist_list"));
        assert_eq!(paths.alias_path, PathBuf::from("/home/testuser/.aliases"));
    }
}

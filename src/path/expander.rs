use crate::error::ShellError;
use std::env;
use std::path::{Path, PathBuf};

/// The user's home directory: `$HOME` when set, otherwise the platform lookup.
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

#[derive(Clone, Copy, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expands a leading `~` or `~/`. Anything else, including `~user`, is
    /// returned as written.
    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        match path.strip_prefix('~') {
            Some("") => self.home(),
            Some(rest) if rest.starts_with('/') => {
                let mut home = self.home()?;
                home.extend(rest.split('/').filter(|part| !part.is_empty()));
                Ok(home)
            }
            _ => Ok(Path::new(path).to_path_buf()),
        }
    }

    pub fn home(&self) -> Result<PathBuf, ShellError> {
        home_dir().ok_or(ShellError::HomeDirNotFound)
    }
}

use std::env;
use std::ffi::OsString;

use super::aliases::AliasTable;
use super::config::{load_aliases, save_aliases, Config};
use super::history::{FileOps, HistoryError, HistoryLedger};
use crate::error::ShellError;

/// Everything a command line can change, owned by the read-eval loop.
pub struct Session {
    pub aliases: AliasTable,
    pub history: HistoryLedger,
    config: Config,
    original_path: Option<OsString>,
    history_trusted: bool,
}

impl Session {
    /// Captures the current `PATH` so it can be restored on shutdown.
    pub fn new(config: Config) -> Self {
        Session {
            aliases: AliasTable::with_capacity(config.alias_capacity),
            history: HistoryLedger::new(config.history_capacity),
            original_path: env::var_os("PATH"),
            config,
            history_trusted: true,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn original_path(&self) -> Option<&OsString> {
        self.original_path.as_ref()
    }

    fn history_file(&self) -> FileOps {
        FileOps::new(self.config.paths.history_path.clone())
    }

    /// Loads persisted aliases and history. A corrupt history file is returned
    /// as an error. A history file that could not be loaded for any reason is
    /// never written back.
    pub fn load(&mut self) -> Result<(), HistoryError> {
        if !self.config.persist {
            return Ok(());
        }

        match load_aliases(&self.config.paths.alias_path, self.config.alias_capacity) {
            Ok(aliases) => self.aliases = aliases,
            Err(e) => log::warn!("could not read aliases: {}", e),
        }

        match self.history_file().load(self.config.history_capacity) {
            Ok(history) => self.history = history,
            Err(e) => {
                self.history_trusted = false;
                if let HistoryError::Corrupt { .. } = e {
                    return Err(e);
                }
                log::warn!("could not read history, it will not be saved: {}", e);
            }
        }
        Ok(())
    }

    /// Saves what can be saved and puts `PATH` back the way it was found.
    /// Every step is attempted; the first failure is returned.
    pub fn shutdown(&mut self) -> Result<(), ShellError> {
        let mut first_error: Option<ShellError> = None;

        if self.config.persist {
            if let Err(e) = save_aliases(&self.config.paths.alias_path, &self.aliases) {
                log::warn!("could not save aliases: {}", e);
                first_error.get_or_insert(e.into());
            }

            if self.history_trusted {
                if let Err(e) = self.history_file().save(&self.history) {
                    log::warn!("could not save history: {}", e);
                    first_error.get_or_insert(e.into());
                }
            } else {
                log::debug!("history file left untouched after a failed load");
            }
        }

        self.restore_path();
        first_error.map_or(Ok(()), Err)
    }

    pub fn restore_path(&self) {
        match &self.original_path {
            Some(path) => env::set_var("PATH", path),
            None => env::remove_var("PATH"),
        }
    }
}

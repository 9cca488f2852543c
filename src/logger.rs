use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::ShellError;
use crate::flags::Flags;

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "error",
            Level::Warn => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        eprintln!("marrow: {}: {}", level, record.args());
    }

    fn flush(&self) {}
}

pub fn level_for(flags: &Flags) -> LevelFilter {
    if flags.is_set("quiet") {
        LevelFilter::Off
    } else if flags.is_set("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the stderr logger. Only the first call in a process takes effect.
pub fn init(flags: &Flags) -> Result<(), ShellError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level_for(flags));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_follows_flags() {
        let mut flags = Flags::new();
        assert_eq!(level_for(&flags), LevelFilter::Warn);

        flags.set("debug", "true");
        assert_eq!(level_for(&flags), LevelFilter::Debug);

        flags.set("quiet", "true");
        assert_eq!(level_for(&flags), LevelFilter::Off);
    }
}

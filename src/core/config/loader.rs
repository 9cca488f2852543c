use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use super::ConfigError;
use crate::core::aliases::{AliasError, AliasTable};

/// Reads the alias file, one `<name> <expansion>` per line. Lines that cannot
/// be used are skipped with a warning rather than failing startup.
pub fn load_aliases(path: &Path, capacity: usize) -> Result<AliasTable, ConfigError> {
    let mut table = AliasTable::with_capacity(capacity);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(table),
        Err(e) => return Err(e.into()),
    };

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((name, expansion)) = line.split_once(char::is_whitespace) else {
            log::warn!("{}:{}: alias has no expansion", path.display(), index + 1);
            continue;
        };
        let tokens: Vec<&str> = expansion.split_whitespace().collect();

        match table.set(name, &tokens) {
            Ok(_) => {}
            Err(AliasError::NoSpace) => {
                log::warn!(
                    "{}:{}: alias table is full, ignoring `{}`",
                    path.display(),
                    index + 1,
                    name
                );
            }
            Err(e) => log::warn!("{}:{}: {}", path.display(), index + 1, e),
        }
    }

    log::debug!("loaded {} aliases from {}", table.len(), path.display());
    Ok(table)
}

pub fn save_aliases(path: &Path, table: &AliasTable) -> Result<(), ConfigError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (_, alias) in table.list() {
        writeln!(writer, "{} {}", alias.name, alias.expansion)?;
    }
    writer.flush()?;

    log::debug!("saved {} aliases to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let table = load_aliases(&dir.path().join(".aliases"), 10).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".aliases");

        let mut table = AliasTable::new();
        table.set("ll", &["ls", "-l"]).unwrap();
        table.set("up", &["cd", ".."]).unwrap();
        save_aliases(&path, &table).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ll ls -l\nup cd ..\n");

        let loaded = load_aliases(&path, 10).unwrap();
        assert_eq!(loaded.get("ll"), Some("ls -l"));
        assert_eq!(loaded.get("up"), Some("cd .."));
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".aliases");
        fs::write(&path, "lonely\n\nll ls -l\na x\nb y\n").unwrap();

        let table = load_aliases(&path, 2).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("ll"), Some("ls -l"));
        assert_eq!(table.get("a"), Some("x"));
        assert_eq!(table.get("lonely"), None);
        assert_eq!(table.get("b"), None);
    }
}

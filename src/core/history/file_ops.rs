use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use super::{HistoryEntry, HistoryError, HistoryLedger};

/// Reads and writes the history file: one `<number> <command>` line per
/// entry, numbered from 1 and strictly increasing.
pub struct FileOps {
    file_path: PathBuf,
}

impl FileOps {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// A missing file yields an empty ledger. Any unparsable or out-of-order
    /// line rejects the whole file.
    pub fn load(&self, capacity: usize) -> Result<HistoryLedger, HistoryError> {
        let mut ledger = HistoryLedger::new(capacity);

        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ledger),
            Err(e) => return Err(e.into()),
        };

        let mut previous: Option<u64> = None;
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => HistoryError::Corrupt {
                    line: index + 1,
                    reason: "not valid UTF-8".to_string(),
                },
                _ => HistoryError::Io(e),
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = parse_line(&line).map_err(|reason| HistoryError::Corrupt {
                line: index + 1,
                reason,
            })?;
            if previous.is_some_and(|prev| entry.sequence <= prev) {
                return Err(HistoryError::Corrupt {
                    line: index + 1,
                    reason: format!("entry {} is out of order", entry.display_number()),
                });
            }
            previous = Some(entry.sequence);
            ledger.restore(entry);
        }

        log::debug!(
            "loaded {} history entries from {}",
            ledger.len(),
            self.file_path.display()
        );
        Ok(ledger)
    }

    pub fn save(&self, ledger: &HistoryLedger) -> Result<(), HistoryError> {
        let mut writer = BufWriter::new(File::create(&self.file_path)?);
        for entry in ledger.entries() {
            write!(writer, "{} {}", entry.display_number(), entry.command)?;
        }
        writer.flush()?;

        log::debug!(
            "saved {} history entries to {}",
            ledger.len(),
            self.file_path.display()
        );
        Ok(())
    }
}

fn parse_line(line: &str) -> Result<HistoryEntry, String> {
    let (number, command) = line
        .split_once(' ')
        .ok_or_else(|| "expected `<number> <command>`".to_string())?;
    let number: u64 = number
        .parse()
        .map_err(|_| format!("`{}` is not an entry number", number))?;
    if number == 0 {
        return Err("entry numbers start at 1".to_string());
    }
    if command.trim().is_empty() {
        return Err(format!("entry {} has no command", number));
    }

    Ok(HistoryEntry {
        sequence: number - 1,
        command: format!("{}\n", command),
    })
}

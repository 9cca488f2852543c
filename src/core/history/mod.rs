mod file_ops;

use std::collections::VecDeque;
use std::fmt;

pub use file_ops::FileOps;

pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

#[derive(Debug)]
pub enum HistoryError {
    EmptyHistory,
    OutOfRange(i64),
    Parse(String),
    Corrupt { line: usize, reason: String },
    Io(std::io::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::EmptyHistory => write!(f, "history is empty"),
            HistoryError::OutOfRange(n) => write!(f, "!{}: event not found", n),
            HistoryError::Parse(spec) => write!(f, "{}: not a valid history reference", spec),
            HistoryError::Corrupt { line, reason } => {
                write!(f, "history file is corrupt at line {}: {}", line, reason)
            }
            HistoryError::Io(e) => write!(f, "history file: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {}

impl From<std::io::Error> for HistoryError {
    fn from(e: std::io::Error) -> Self {
        HistoryError::Io(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Zero-based and never reused; shown to users as `sequence + 1`.
    pub sequence: u64,
    /// The accepted line, always ending in `'\n'`.
    pub command: String,
}

impl HistoryEntry {
    pub fn display_number(&self) -> u64 {
        self.sequence + 1
    }
}

/// Parsed form of the `!!`, `!n` and `!-n` repeat notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatSpec {
    Last,
    Position(u64),
    Back(u64),
}

impl RepeatSpec {
    pub fn is_repeat(token: &str) -> bool {
        token.starts_with('!')
    }

    pub fn parse(token: &str) -> Result<Self, HistoryError> {
        let parse_error = || HistoryError::Parse(token.to_string());
        let body = token.strip_prefix('!').ok_or_else(parse_error)?;
        if body == "!" {
            return Ok(RepeatSpec::Last);
        }

        let digits = body.strip_prefix(['-', '+']).unwrap_or(body);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(parse_error());
        }
        // All digits by now, so a failed parse can only be an overflow.
        let n: i64 = body.parse().unwrap_or(if body.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });

        match n {
            0 => Err(HistoryError::OutOfRange(0)),
            n if n > 0 => Ok(RepeatSpec::Position(n.unsigned_abs())),
            n => Ok(RepeatSpec::Back(n.unsigned_abs())),
        }
    }
}

/// Bounded, oldest-first record of accepted command lines.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLedger {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Records `command` under the next sequence number, dropping the oldest
    /// entry first when the ledger is full.
    pub fn push(&mut self, command: &str) -> u64 {
        let mut command = command.to_string();
        if !command.ends_with('\n') {
            command.push('\n');
        }
        let sequence = self.next_sequence;
        self.push_evicting_oldest(HistoryEntry { sequence, command });
        sequence
    }

    /// Re-inserts a previously persisted entry, keeping its sequence number.
    pub(crate) fn restore(&mut self, entry: HistoryEntry) {
        self.push_evicting_oldest(entry);
    }

    fn push_evicting_oldest(&mut self, entry: HistoryEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.next_sequence = entry.sequence + 1;
        self.entries.push_back(entry);
    }

    pub fn resolve(&self, spec: RepeatSpec) -> Result<&HistoryEntry, HistoryError> {
        if self.entries.is_empty() {
            return Err(HistoryError::EmptyHistory);
        }
        let len = self.entries.len() as u64;

        let index = match spec {
            RepeatSpec::Last => len - 1,
            RepeatSpec::Position(n) => {
                if n > len || n > self.capacity as u64 {
                    return Err(HistoryError::OutOfRange(n as i64));
                }
                n - 1
            }
            RepeatSpec::Back(n) => {
                if n > len || n > self.capacity as u64 {
                    return Err(HistoryError::OutOfRange((n as i64).wrapping_neg()));
                }
                len - n
            }
        };

        self.entries
            .get(index as usize)
            .ok_or(HistoryError::OutOfRange(index as i64 + 1))
    }

    pub fn resolve_index(&self, token: &str) -> Result<&HistoryEntry, HistoryError> {
        self.resolve(RepeatSpec::parse(token)?)
    }
}

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use super::tokenizer::first_token_span;

pub const DEFAULT_ALIAS_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub expansion: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasUpdate {
    Added,
    Replaced { old: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    NoSpace,
    NotFound(String),
    MissingExpansion(String),
}

impl fmt::Display for AliasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasError::NoSpace => write!(f, "no more aliases can be set"),
            AliasError::NotFound(name) => {
                write!(f, "cannot unalias [\"{}\"] - not an existing alias", name)
            }
            AliasError::MissingExpansion(name) => {
                write!(f, "no command given for alias \"{}\"", name)
            }
        }
    }
}

impl std::error::Error for AliasError {}

/// Fixed number of alias slots. A removed slot is handed to the next new
/// alias, so listing order follows the slots rather than insertion order.
#[derive(Debug, Clone)]
pub struct AliasTable {
    slots: Vec<Option<Alias>>,
    index: HashMap<Box<str>, usize>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AliasTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ALIAS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let slot = *self.index.get(name)?;
        self.slots[slot].as_ref().map(|alias| alias.expansion.as_str())
    }

    pub fn set<S: AsRef<str>>(
        &mut self,
        name: &str,
        expansion: &[S],
    ) -> Result<AliasUpdate, AliasError> {
        if expansion.is_empty() {
            return Err(AliasError::MissingExpansion(name.to_string()));
        }
        let expansion = expansion
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(&slot) = self.index.get(name) {
            if let Some(alias) = self.slots[slot].as_mut() {
                let old = std::mem::replace(&mut alias.expansion, expansion);
                return Ok(AliasUpdate::Replaced { old });
            }
        }

        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(AliasError::NoSpace)?;
        self.slots[slot] = Some(Alias {
            name: name.to_string(),
            expansion,
        });
        self.index.insert(name.into(), slot);
        Ok(AliasUpdate::Added)
    }

    pub fn remove(&mut self, name: &str) -> Result<Alias, AliasError> {
        self.index
            .remove(name)
            .and_then(|slot| self.slots[slot].take())
            .ok_or_else(|| AliasError::NotFound(name.to_string()))
    }

    /// Live aliases with their slot number, in slot order.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Alias)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, alias)| alias.as_ref().map(|alias| (slot, alias)))
    }

    /// Substitutes the first argument of `line` when it names an alias.
    ///
    /// Only the leading argument is ever considered, and the expansion is not
    /// itself expanded again.
    pub fn resolve<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let Some((start, end)) = first_token_span(line) else {
            return Cow::Borrowed(line);
        };
        let Some(expansion) = self.get(&line[start..end]) else {
            return Cow::Borrowed(line);
        };

        let rest = line[end..].trim_start();
        if rest.is_empty() {
            Cow::Owned(expansion.to_string())
        } else {
            Cow::Owned(format!("{} {}", expansion, rest))
        }
    }
}

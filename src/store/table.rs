//! Character to stroke-description lookup.

use std::collections::BTreeMap;
use std::path::Path;

use crate::character::model::Character;
use crate::foundation::error::{StrokeError, StrokeResult};

/// Anything that can produce the stroke description of a character.
pub trait StrokeSource {
    /// Raw description for `ch`, or [`StrokeError::Lookup`] if unknown.
    fn lookup(&self, ch: char) -> StrokeResult<String>;

    /// Look `ch` up and parse it into a [`Character`].
    fn character(&self, ch: char) -> StrokeResult<Character> {
        Character::from_description(&self.lookup(ch)?)
    }
}

/// In-memory stroke table, usually loaded from a JSON object such as `{"十": "1NO:..."}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrokeTable {
    entries: BTreeMap<char, String>,
}

impl StrokeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object keyed by single characters.
    pub fn from_json_str(s: &str) -> StrokeResult<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(s)
            .map_err(|e| StrokeError::serde(format!("invalid stroke table: {e}")))?;

        let mut table = Self::new();
        for (key, description) in raw {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(StrokeError::validation(format!(
                    "stroke table key '{key}' must be exactly one character"
                )));
            };
            table.insert(ch, description);
        }
        tracing::debug!(entries = table.len(), "stroke table loaded");
        Ok(table)
    }

    /// Read a JSON stroke table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> StrokeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            StrokeError::validation(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Add or replace an entry, returning the previous description.
    pub fn insert(&mut self, ch: char, description: impl Into<String>) -> Option<String> {
        self.entries.insert(ch, description.into())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Characters present, in code point order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }
}

impl StrokeSource for StrokeTable {
    fn lookup(&self, ch: char) -> StrokeResult<String> {
        self.entries
            .get(&ch)
            .cloned()
            .ok_or_else(|| StrokeError::lookup(format!("no stroke data for '{ch}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/table.rs"]
mod tests;

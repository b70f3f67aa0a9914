//! Shared data types for anchor assignment and linking.
//! Implemented as newtypes to enforce invariants.

use std::fmt;

/// A heading anchor: non-empty, never starting with a digit, and made only of
/// ASCII word characters and the configured separator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Accept `raw` only if it already satisfies the identifier invariants.
    pub fn parse(raw: &str, separator: char) -> Option<Self> {
        let first = raw.chars().next()?;
        if first.is_ascii_digit() {
            return None;
        }
        let valid = raw
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == separator);
        if valid { Some(Self(raw.to_string())) } else { None }
    }

    /// Callers must have established the invariants themselves.
    pub(crate) fn new_unchecked(raw: String) -> Self {
        debug_assert!(!raw.is_empty());
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A heading after the anchor assigner has visited it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingRecord {
    pub level: u8,
    /// Text content of the heading, entities decoded, glyphs and numbering kept.
    pub raw_text: String,
    pub identifier: Identifier,
}

#[cfg(test)]
mod tests;

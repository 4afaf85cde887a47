//! Alias sets.
//!
//! Commands and flags are both addressed by a comma-delimited list of names.
//! The first name is canonical; the rest are interchangeable alternatives.

use std::fmt;

/// Separator between names in an alias-set string.
pub const ALIAS_SEPARATOR: &str = ",";

/// Split `s` on `sep`, trim each piece, and drop the pieces left empty.
///
/// Order is preserved. A string made only of separators and whitespace
/// yields an empty vector.
#[must_use]
pub fn split_trim(s: &str, sep: &str) -> Vec<String> {
    s.split(sep)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// An ordered, non-empty list of names. The first one is the primary name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AliasSet {
    names: Vec<String>,
}

impl AliasSet {
    /// Parse a comma-delimited alias string.
    ///
    /// Returns `None` when nothing is left after trimming.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let names = split_trim(raw, ALIAS_SEPARATOR);
        if names.is_empty() {
            None
        } else {
            Some(Self { names })
        }
    }

    /// The canonical name.
    #[must_use]
    pub fn primary(&self) -> &str {
        &self.names[0]
    }

    /// Names after the primary one.
    #[must_use]
    pub fn secondary(&self) -> &[String] {
        &self.names[1..]
    }

    /// All names, primary first.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: an alias set holds at least one name.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for AliasSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(ALIAS_SEPARATOR))
    }
}

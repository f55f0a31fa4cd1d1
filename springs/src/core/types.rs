//! Shared deterministic types for the arrangement counter.
//!
//! These types define stable contracts between the parser, the unfolder and
//! the counter. They carry no I/O and render deterministically.

use std::fmt;

/// Condition of a single position in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `.`: operational, can never host a damaged run.
    Functional,
    /// `#`: known damaged.
    Damaged,
    /// `?`: undetermined, resolves to either of the other two.
    Unknown,
}

impl Symbol {
    /// Parse one pattern character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Functional),
            '#' => Some(Self::Damaged),
            '?' => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Functional => '.',
            Self::Damaged => '#',
            Self::Unknown => '?',
        }
    }

    /// True for symbols that may belong to a damaged run (`#` or `?`).
    pub fn can_be_damaged(self) -> bool {
        !matches!(self, Self::Functional)
    }
}

/// One input instance: a symbol sequence plus the required damaged-run lengths.
///
/// `groups[i]` is the length of the i-th maximal run of [`Symbol::Damaged`],
/// left to right, in every valid resolution of `symbols`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConditionRecord {
    pub symbols: Vec<Symbol>,
    pub groups: Vec<usize>,
}

impl ConditionRecord {
    pub fn new(symbols: Vec<Symbol>, groups: Vec<usize>) -> Self {
        Self { symbols, groups }
    }

    /// Number of [`Symbol::Unknown`] positions still to be decided.
    pub fn unknown_count(&self) -> usize {
        self.symbols
            .iter()
            .filter(|symbol| **symbol == Symbol::Unknown)
            .count()
    }

    /// Render just the symbol pattern (`.#?` characters).
    pub fn pattern(&self) -> String {
        self.symbols.iter().map(|symbol| symbol.as_char()).collect()
    }
}

/// Renders the `<pattern> <lengths>` line format accepted by the parser.
impl fmt::Display for ConditionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lengths = self
            .groups
            .iter()
            .map(|len| len.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{} {}", self.pattern(), lengths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_chars_map_both_ways() {
        for c in ['.', '#', '?'] {
            let symbol = Symbol::from_char(c).expect("known symbol");
            assert_eq!(symbol.as_char(), c);
        }
        assert_eq!(Symbol::from_char('x'), None);
    }

    #[test]
    fn display_renders_line_format() {
        let record = ConditionRecord::new(
            vec![Symbol::Unknown, Symbol::Functional, Symbol::Damaged],
            vec![1, 1],
        );
        assert_eq!(record.to_string(), "?.# 1,1");
        assert_eq!(record.unknown_count(), 1);
    }
}

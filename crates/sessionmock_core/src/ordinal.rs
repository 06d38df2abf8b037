//! Human-readable transaction positions.

use std::fmt;

/// A 1-based position rendered as an English ordinal ("1st", "2nd", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ordinal(usize);

impl Ordinal {
    /// Creates an ordinal from a 1-based position.
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Creates an ordinal from a 0-based index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// Returns the 1-based position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    fn suffix(self) -> &'static str {
        if matches!(self.0 % 100, 11..=13) {
            return "th";
        }
        match self.0 % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.suffix())
    }
}

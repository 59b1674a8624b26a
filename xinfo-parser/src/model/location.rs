use std::fmt;

use serde::Serialize;

/// A `Location` represents the span of a single line in a descriptor.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Location {
    /// The 1-based line number.
    pub line: usize,
    /// Byte offset of the first character of the line.
    pub absolute_start: usize,
    /// Byte offset one past the last character of the line (newline excluded).
    pub absolute_end: usize,
}

impl Location {
    #[must_use]
    pub fn new(line: usize, absolute_start: usize, absolute_end: usize) -> Self {
        Self {
            line,
            absolute_start,
            absolute_end,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.absolute_end.saturating_sub(self.absolute_start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a location covering both `self` and `other`, keeping the line of `self`.
    #[must_use]
    pub(crate) fn extend_to(self, other: Location) -> Self {
        Self {
            line: self.line,
            absolute_start: self.absolute_start.min(other.absolute_start),
            absolute_end: self.absolute_end.max(other.absolute_end),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, bytes {}..{}",
            self.line, self.absolute_start, self.absolute_end
        )
    }
}

//! Position information attached to the tokens.
//!
//! `SourceRangeMixin` wraps a value with where it was written: the line and column of its first
//! character, and the byte range in the source text.

use std::ops::Range;

/// A position in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePosition {
    /// The line position, starts with 1.
    pub line: usize,
    /// The column position of char count, starts with 1. It is NOT byte count.
    pub column: usize,
    /// The byte index in the source string.
    pub index: usize,
}

/// A generic wrapper that attaches position information to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRangeMixin<T> {
    /// Wrapped content value
    content: T,
    /// Where the content starts.
    start: SourcePosition,
    /// End index in the source string (0-based, exclusive)
    end: usize,
}

impl<T> SourceRangeMixin<T> {
    /// Instances a new `SourceRangeMixin`
    pub const fn new(content: T, start: SourcePosition, end: usize) -> Self {
        Self {
            content,
            start,
            end,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Leans the content out of the wrapper.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Returns the starting position.
    pub const fn start(&self) -> SourcePosition {
        self.start
    }

    /// Returns the byte range in the source string.
    pub const fn range(&self) -> Range<usize> {
        self.start.index..self.end
    }
}

impl<T: std::fmt::Display> std::fmt::Display for SourceRangeMixin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "`{}` at line {}, col {}",
            self.content, self.start.line, self.start.column
        )
    }
}

//! Mixin types for structures.
//!
//! - `SourceLineMixin` is a generic wrapper that attaches the source line (number and byte range) to a value.

use std::ops::Range;

/// A generic wrapper that attaches the source line to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLineMixin<T> {
    /// Wrapped content value
    content: T,
    /// Line number in the source, starts with 1.
    line: usize,
    /// Byte range of the line in the source, without the line break.
    range: Range<usize>,
}

impl<T> SourceLineMixin<T> {
    /// Instances a new `SourceLineMixin`
    pub const fn new(content: T, line: usize, range: Range<usize>) -> Self {
        Self {
            content,
            line,
            range,
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

    /// Returns the line number, starts with 1.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the byte range of the line.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Maps the content of the wrapper.
    pub fn map<U, F>(self, f: F) -> SourceLineMixin<U>
    where
        F: FnOnce(T) -> U,
    {
        SourceLineMixin::new(f(self.content), self.line, self.range)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for SourceLineMixin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}", self.content, self.line)
    }
}

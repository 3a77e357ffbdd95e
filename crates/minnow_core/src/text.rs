//! Source locations.
//!
//! Every token, syntax node and diagnostic carries a [`TextSpan`] of byte
//! offsets into the fragment it came from. [`LineMap`] turns an offset back
//! into a line and column when a front end needs to show one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offset into a fragment's source text.
pub type TextPos = u32;

/// A half-open byte range `[start, start + length)` of source text.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// The span from `start` up to, not including, `end`.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        Self::new(start, end.saturating_sub(start))
    }

    /// A zero-length span at `pos`, used for tokens the parser had to invent.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self::new(pos, 0)
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The smallest span covering both `self` and `other`.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        TextSpan::from_bounds(self.start.min(other.start), self.end().max(other.end()))
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// Zero-based line and byte column of an offset.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub column: u32,
}

/// Start offsets of every line in a text, for offset to line lookups.
///
/// Lines end at `\n`; a preceding `\r` stays part of the line it ends.
#[derive(Debug, Clone)]
pub struct LineMap {
    starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i as TextPos + 1))
            .collect();
        Self { starts }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        // Index of the last line starting at or before `pos`
        let line = self.starts.partition_point(|&start| start <= pos).saturating_sub(1);
        LineAndColumn {
            line: line as u32,
            column: pos - self.starts[line],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = TextSpan::from_bounds(5, 15);
        assert_eq!(span, TextSpan::new(5, 10));
        assert_eq!(span.end(), 15);
        assert!(!span.is_empty());
        assert!(TextSpan::empty(7).is_empty());
        assert_eq!(format!("{:?} {}", span, span), "5..15 [5, 15)");
    }

    #[test]
    fn test_span_union() {
        let joined = TextSpan::new(2, 1).union(&TextSpan::new(8, 4));
        assert_eq!(joined, TextSpan::from_bounds(2, 12));
        // Order does not matter
        assert_eq!(TextSpan::new(8, 4).union(&TextSpan::new(2, 1)), joined);
    }

    #[test]
    fn test_line_map() {
        let text = "let a = 1\r\nwrite(\"x\")\nfor i = 1 to 3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);

        let at = |pos| {
            let lc = map.line_and_column_of(pos);
            (lc.line, lc.column)
        };
        assert_eq!(at(0), (0, 0));
        assert_eq!(at(10), (0, 10));
        assert_eq!(at(11), (1, 0));
        assert_eq!(at(13), (1, 2));
        assert_eq!(at(22), (2, 0));
    }

    #[test]
    fn test_line_map_trailing_newline() {
        let map = LineMap::new("x\n");
        assert_eq!(map.line_count(), 2);
        assert_eq!(map.line_and_column_of(2), LineAndColumn { line: 1, column: 0 });
    }
}

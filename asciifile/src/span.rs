//! # Input Ranges
//!
//! A `Span` describes the characters a lexeme was read from.
//!
//! The range defined by the start and end position of a `Span` is inclusive
//! on both sides. As a result, the character pointed to by the end position
//! is part of the span. This means you cannot create an empty `Span`.
use crate::Position;
use std::{
    cmp::{max, min},
    fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// position of the first char in the span.
    pub start: Position,
    /// position of the last char in the span.
    pub end: Position,
}

impl Span {
    pub fn new(a: Position, b: Position) -> Self {
        Self {
            start: min(a, b),
            end: max(a, b),
        }
    }

    pub fn from_single_position(position: Position) -> Self {
        Span {
            start: position,
            end: position,
        }
    }

    pub fn is_single_char(&self) -> bool {
        self.start == self.end
    }

    pub fn is_multiline(&self) -> bool {
        self.start.row() != self.end.row()
    }

    /// Number of bytes covered by the span
    pub fn len(&self) -> usize {
        self.end.byte_offset() - self.start.byte_offset() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The slice of `text` this span covers, if `text` is the input the
    /// positions were taken from.
    ///
    /// ```
    /// use asciifile::{Position, Span};
    ///
    /// let text = "if x then";
    /// let start = Position::new(3, 0, 3);
    /// let span = Span::from_single_position(start);
    /// assert_eq!(Some("x"), span.slice(text));
    /// ```
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start.byte_offset()..=self.end.byte_offset())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_char() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

//! A position of a character within an input.
//!
//! Rows and columns are zero indexed, the first character of an input is
//! at row 0, column 0. `Display` uses the one-based `line:column` notation
//! users expect in error messages.
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    byte_offset: usize,
    row: usize,
    col: usize,
}

impl Position {
    pub fn at_file_start() -> Self {
        Self::default()
    }

    pub fn new(byte_offset: usize, row: usize, col: usize) -> Self {
        Self {
            byte_offset,
            row,
            col,
        }
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Identical to `row() + 1`
    pub fn line_number(&self) -> usize {
        self.row + 1
    }

    /// The position of the character following `chr`, given that `chr` is
    /// the character at this position.
    ///
    /// ```
    /// use asciifile::Position;
    ///
    /// let start = Position::at_file_start();
    /// let second = start.advance('a');
    /// assert_eq!((0, 1), (second.row(), second.col()));
    ///
    /// let next_line = second.advance('\n');
    /// assert_eq!((1, 0), (next_line.row(), next_line.col()));
    /// assert_eq!(2, next_line.byte_offset());
    /// ```
    pub fn advance(self, chr: char) -> Self {
        let byte_offset = self.byte_offset + chr.len_utf8();
        if chr == '\n' {
            Self {
                byte_offset,
                row: self.row + 1,
                col: 0,
            }
        } else {
            Self {
                byte_offset,
                row: self.row,
                col: self.col + 1,
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}:{}", self.row + 1, self.col + 1)
    }
}

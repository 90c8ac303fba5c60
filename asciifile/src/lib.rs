//! Represents an input file that may only contain ASCII characters. The
//! abstractions `Position` and `Span` describe where a character,
//! respectively a range of characters, was read from. Unlike the file
//! itself they do not borrow anything, so a lexer that consumes a plain
//! character stream can still hand out positional information.
pub mod file;
pub mod position;
pub mod span;
pub mod spanned;

pub use self::{
    file::{AsciiFile, EncodingError, LineTruncation},
    position::Position,
    span::Span,
    spanned::Spanned,
};

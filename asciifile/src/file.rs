use crate::Position;
use failure::Fail;
use std::ops::Deref;

/// How much of the line before an offending character is quoted in an
/// `EncodingError`.
const ENCODING_ERROR_CONTEXT: usize = 80;

/// Source text that is guaranteed to only contain ASCII characters.
#[derive(Debug)]
pub struct AsciiFile<'m> {
    mapping: &'m [u8],
}

#[derive(Debug, Fail)]
pub enum EncodingError {
    #[fail(
        display = "non-ASCII byte at offset {} (after \"{}\")",
        position, prev
    )]
    NotAscii { position: usize, prev: String },
}

/// Whether a quoted line was cut off on one side.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum LineTruncation {
    Truncated,
    NotTruncated,
}

impl<'m> AsciiFile<'m> {
    /// Checks every byte, so this is linear in the size of the input.
    pub fn new(mapping: &'m [u8]) -> Result<AsciiFile<'m>, EncodingError> {
        match mapping.iter().position(|byte| !byte.is_ascii()) {
            None => Ok(Self { mapping }),
            Some(position) => {
                let (truncation, start) = line_start(mapping, position, ENCODING_ERROR_CONTEXT);
                let quoted = String::from_utf8_lossy(&mapping[start..position]);
                let prev = match truncation {
                    LineTruncation::Truncated => format!("...{}", quoted),
                    LineTruncation::NotTruncated => quoted.into_owned(),
                };
                Err(EncodingError::NotAscii { position, prev })
            }
        }
    }

    pub fn as_str(&self) -> &'m str {
        // ASCII is valid UTF-8
        std::str::from_utf8(self.mapping).unwrap_or_default()
    }

    /// Returns the line containing `position` without its trailing newline,
    /// together with the truncation on either side. At most
    /// `max_context_length` characters before and after the position are
    /// included.
    ///
    /// ```
    /// use asciifile::{AsciiFile, LineTruncation, Position};
    ///
    /// let file = AsciiFile::new(b"f :: Integer\nf = 1\n").unwrap();
    /// let position = file.as_str().chars().take(15).fold(Position::at_file_start(), Position::advance);
    ///
    /// let (before, line, after) = file.line_of(position, 80);
    /// assert_eq!("f = 1", line);
    /// assert_eq!(LineTruncation::NotTruncated, before);
    /// assert_eq!(LineTruncation::NotTruncated, after);
    /// ```
    pub fn line_of(
        &self,
        position: Position,
        max_context_length: usize,
    ) -> (LineTruncation, &'m str, LineTruncation) {
        let offset = position.byte_offset().min(self.mapping.len());
        let (before, start) = line_start(self.mapping, offset, max_context_length);
        let (after, end) = line_end(self.mapping, offset, max_context_length);
        (before, self.as_str().get(start..end).unwrap_or(""), after)
    }
}

/// Index of the first character of the line `offset` is on, looking back
/// at most `max_context_length` bytes. A newline belongs to the line it
/// terminates.
fn line_start(mapping: &[u8], offset: usize, max_context_length: usize) -> (LineTruncation, usize) {
    debug_assert!(offset <= mapping.len());

    let lower = offset.saturating_sub(max_context_length);
    match mapping[lower..offset].iter().rposition(|&byte| byte == b'\n') {
        Some(newline) => (LineTruncation::NotTruncated, lower + newline + 1),
        None if lower > 0 => (LineTruncation::Truncated, lower),
        None => (LineTruncation::NotTruncated, 0),
    }
}

/// Exclusive end of the line `offset` is on: its newline or the end of
/// input, looking ahead at most `max_context_length` bytes.
fn line_end(mapping: &[u8], offset: usize, max_context_length: usize) -> (LineTruncation, usize) {
    debug_assert!(offset <= mapping.len());

    let upper = offset + max_context_length;
    let (truncation, upper) = if upper < mapping.len() {
        (LineTruncation::Truncated, upper)
    } else {
        (LineTruncation::NotTruncated, mapping.len())
    };

    match mapping[offset..upper].iter().position(|&byte| byte == b'\n') {
        Some(newline) => (LineTruncation::NotTruncated, offset + newline),
        None => (truncation, upper),
    }
}

impl<'m> Deref for AsciiFile<'m> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

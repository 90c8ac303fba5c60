//! All state shared by the lexing and type checking phases.
use asciifile::AsciiFile;
use diagnostics::Diagnostics;
use termcolor::WriteColor;

pub struct Context<'m> {
    pub file: &'m AsciiFile<'m>,
    pub diagnostics: Diagnostics,
}

impl<'m> Context<'m> {
    pub fn new(file: &'m AsciiFile<'m>, writer: Box<dyn WriteColor>) -> Self {
        Self {
            file,
            diagnostics: Diagnostics::new(writer),
        }
    }

    #[cfg(test)]
    pub fn dummy(file: &'m AsciiFile<'m>) -> Self {
        Self::new(file, Box::new(dummy_writer()))
    }
}

// dummy_writer returns a WriteColor meant for use in tests.
#[cfg(test)]
pub fn dummy_writer() -> impl termcolor::WriteColor {
    termcolor::Buffer::no_color()
}

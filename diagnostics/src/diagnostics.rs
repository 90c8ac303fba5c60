//! Reporting of errors and warnings found while lexing and type checking.
//!
//! Messages are written to a `termcolor::WriteColor` as they are emitted
//! and counted per level, so that a driver can decide whether to go on
//! with the next phase. Not thread-safe.
use asciifile::{AsciiFile, LineTruncation, Spanned};
use failure::AsFail;
use std::{ascii::escape_default, cell::RefCell, collections::HashMap, io::Write};
use termcolor::{Color, ColorSpec, WriteColor};

const MAX_CONTEXT_LENGTH: usize = 80;
const TAB_WIDTH: usize = 4;
const TRUNCATION_MARKER: &str = "...";
const GUTTER_COLOR: Option<Color> = Some(Color::Cyan);

/// Single sink for all messages of a compilation.
pub struct Diagnostics {
    message_count: RefCell<HashMap<MessageLevel, usize>>,
    writer: RefCell<Box<dyn WriteColor>>,
}

impl Diagnostics {
    pub fn new(writer: Box<dyn WriteColor>) -> Self {
        Self {
            message_count: RefCell::new(HashMap::new()),
            writer: RefCell::new(writer),
        }
    }

    /// Whether at least one error was emitted. Warnings do not count.
    pub fn errored(&self) -> bool {
        self.count(MessageLevel::Error) > 0
    }

    pub fn count(&self, level: MessageLevel) -> usize {
        self.message_count
            .borrow()
            .get(&level)
            .copied()
            .unwrap_or(0)
    }

    /// Writes the closing line of a compilation, e.g.
    /// `Compilation aborted due to 2 errors`.
    pub fn write_statistics(&self) {
        let errors = self.count(MessageLevel::Error);
        let warnings = self.count(MessageLevel::Warning);

        let (color, summary) = if errors > 0 {
            (
                MessageLevel::Error.color(),
                format!(
                    "Compilation aborted due to {}",
                    counted(errors, "an error", "errors")
                ),
            )
        } else if warnings > 0 {
            (
                Some(Color::Green),
                format!(
                    "Compilation finished successfully with {}",
                    counted(warnings, "a warning", "warnings")
                ),
            )
        } else {
            (
                Some(Color::Green),
                "Compilation finished successfully without warnings".to_string(),
            )
        };

        let mut writer = self.writer.borrow_mut();
        let mut style = Style::on(&mut **writer);
        style.paint(color, true);
        writeln!(style.writer(), "{}", summary).ok();
    }

    /// Writes a message without source context.
    pub fn emit(&self, level: MessageLevel, kind: &dyn AsFail) {
        {
            let mut writer = self.writer.borrow_mut();
            let writer: &mut dyn WriteColor = &mut **writer;
            write_header(writer, level, kind);
            writeln!(writer).ok();
        }
        self.record(level);
    }

    pub fn warning(&self, kind: &dyn AsFail) {
        self.emit(MessageLevel::Warning, kind)
    }

    pub fn error(&self, kind: &dyn AsFail) {
        self.emit(MessageLevel::Error, kind)
    }

    /// Writes a message followed by the source line the span starts on,
    /// with the span marked by `^`. Spans reaching into later lines are
    /// marked up to the end of their first line.
    pub fn emit_with_source_snippet<T: AsFail>(
        &self,
        level: MessageLevel,
        file: &AsciiFile<'_>,
        spanned: &Spanned<T>,
    ) {
        {
            let mut writer = self.writer.borrow_mut();
            write_header(&mut **writer, level, &spanned.data);
            write_snippet(&mut **writer, level, file, spanned);
        }
        self.record(level);
    }

    pub fn warning_with_source_snippet<T: AsFail>(
        &self,
        file: &AsciiFile<'_>,
        spanned: &Spanned<T>,
    ) {
        self.emit_with_source_snippet(MessageLevel::Warning, file, spanned)
    }

    pub fn error_with_source_snippet<T: AsFail>(
        &self,
        file: &AsciiFile<'_>,
        spanned: &Spanned<T>,
    ) {
        self.emit_with_source_snippet(MessageLevel::Error, file, spanned)
    }

    fn record(&self, level: MessageLevel) {
        *self
            .message_count
            .borrow_mut()
            .entry(level)
            .or_insert(0) += 1;
    }
}

fn counted(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        one.to_string()
    } else {
        format!("{} {}", n, many)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MessageLevel {
    Error,
    Warning,
}

impl MessageLevel {
    /// `None` is the terminal's default color.
    fn color(self) -> Option<Color> {
        match self {
            MessageLevel::Error => Some(Color::Red),
            MessageLevel::Warning => Some(Color::Yellow),
        }
    }

    fn name(self) -> &'static str {
        match self {
            MessageLevel::Error => "error",
            MessageLevel::Warning => "warning",
        }
    }
}

/// `error: <message>` on a line of its own.
fn write_header(writer: &mut dyn WriteColor, level: MessageLevel, kind: &dyn AsFail) {
    let mut style = Style::on(writer);
    style.paint(level.color(), true);
    write!(style.writer(), "{}: ", level.name()).ok();
    style.paint(None, true);
    writeln!(style.writer(), "{}", kind.as_fail()).ok();
}

fn write_snippet<T>(
    writer: &mut dyn WriteColor,
    level: MessageLevel,
    file: &AsciiFile<'_>,
    spanned: &Spanned<T>,
) {
    let span = spanned.span;
    let line_number = span.start.line_number().to_string();
    let gutter = format!(" {} | ", " ".repeat(line_number.len()));

    let (before, line, after) = file.line_of(span.start, MAX_CONTEXT_LENGTH);
    let before_truncated = before == LineTruncation::Truncated;
    let source = SourceLine { line };

    let mut style = Style::on(writer);

    style.paint(GUTTER_COLOR, true);
    writeln!(style.writer(), "{}", gutter).ok();
    write!(style.writer(), " {} | ", line_number).ok();
    if before_truncated {
        write!(style.writer(), "{}", TRUNCATION_MARKER).ok();
    }

    style.paint(None, false);
    source.render(style.writer());

    if after == LineTruncation::Truncated {
        style.paint(GUTTER_COLOR, true);
        write!(style.writer(), "{}", TRUNCATION_MARKER).ok();
    }
    writeln!(style.writer()).ok();

    // columns within `line`
    let first = if before_truncated {
        MAX_CONTEXT_LENGTH
    } else {
        span.start.col()
    }
    .min(line.len());
    let last = if span.is_multiline() {
        line.len()
    } else {
        (first + span.len()).min(line.len())
    };

    let indent = if before_truncated {
        TRUNCATION_MARKER.len()
    } else {
        0
    } + source.width(first);
    let markers = (source.width(last) - source.width(first)).max(1);

    style.paint(GUTTER_COLOR, true);
    write!(style.writer(), "{}", gutter).ok();
    style.paint(level.color(), true);
    writeln!(
        style.writer(),
        "{}{}",
        " ".repeat(indent),
        "^".repeat(markers)
    )
    .ok();
    writeln!(style.writer()).ok();
}

/// Color and boldness applied to a borrowed writer. The writer is reset on
/// creation and when the style is dropped, so nested helpers never leak
/// their colors into each other's output. Coloring failures are ignored.
struct Style<'a> {
    writer: &'a mut dyn WriteColor,
    spec: ColorSpec,
}

impl<'a> Style<'a> {
    fn on(writer: &'a mut dyn WriteColor) -> Self {
        writer.reset().ok();
        Self {
            writer,
            spec: ColorSpec::new(),
        }
    }

    fn paint(&mut self, color: Option<Color>, bold: bool) {
        self.spec.set_fg(color).set_bold(bold);
        self.writer.set_color(&self.spec).ok();
    }

    fn writer(&mut self) -> &mut dyn WriteColor {
        self.writer
    }
}

impl<'a> Drop for Style<'a> {
    fn drop(&mut self) {
        self.writer.reset().ok();
    }
}

pub fn u8_to_printable_representation(byte: u8) -> String {
    escape_default(byte).map(char::from).collect()
}

/// A source line as it is shown in a snippet: tabs are expanded, carriage
/// returns dropped and other control characters spelled out.
struct SourceLine<'a> {
    line: &'a str,
}

impl<'a> SourceLine<'a> {
    fn render(&self, writer: &mut dyn WriteColor) {
        let mut style = Style::on(writer);
        for chr in self.line.chars() {
            let (text, color) = display_char(chr);
            style.paint(color, false);
            write!(style.writer(), "{}", text).ok();
        }
    }

    /// Number of terminal cells the first `col` characters take up.
    fn width(&self, col: usize) -> usize {
        debug_assert!(col <= self.line.len());
        self.line[..col]
            .chars()
            .map(|chr| display_char(chr).0.len())
            .sum()
    }
}

fn display_char(chr: char) -> (String, Option<Color>) {
    match chr {
        '\t' => (" ".repeat(TAB_WIDTH), None),
        '\r' => (String::new(), None),
        chr if chr.is_control() => (
            format!("{{{}}}", u8_to_printable_representation(chr as u8)),
            GUTTER_COLOR,
        ),
        chr => (chr.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asciifile::{Position, Span};
    use failure::Fail;
    use std::{cell::RefCell, io, rc::Rc};
    use termcolor::{Buffer, ColorSpec};

    #[derive(Debug, Fail)]
    #[fail(display = "no acceptor matches '{}'", _0)]
    struct TestError(char);

    /// `termcolor::Buffer` that can still be read after it was handed to
    /// `Diagnostics`
    #[derive(Clone)]
    struct SharedBuffer(Rc<RefCell<Buffer>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.borrow_mut().flush()
        }
    }

    impl WriteColor for SharedBuffer {
        fn supports_color(&self) -> bool {
            false
        }

        fn set_color(&mut self, spec: &ColorSpec) -> io::Result<()> {
            self.0.borrow_mut().set_color(spec)
        }

        fn reset(&mut self) -> io::Result<()> {
            self.0.borrow_mut().reset()
        }
    }

    fn diagnostics() -> (Diagnostics, SharedBuffer) {
        let buffer = SharedBuffer(Rc::new(RefCell::new(Buffer::no_color())));
        (Diagnostics::new(Box::new(buffer.clone())), buffer)
    }

    fn contents(buffer: &SharedBuffer) -> String {
        String::from_utf8(buffer.0.borrow().as_slice().to_vec()).unwrap()
    }

    #[test]
    fn counts_messages_per_level() {
        let (diagnostics, _) = diagnostics();
        assert!(!diagnostics.errored());

        diagnostics.warning(&TestError('#'));
        assert!(!diagnostics.errored());
        assert_eq!(diagnostics.count(MessageLevel::Warning), 1);

        diagnostics.error(&TestError('#'));
        diagnostics.error(&TestError('#'));
        assert!(diagnostics.errored());
        assert_eq!(diagnostics.count(MessageLevel::Error), 2);
    }

    #[test]
    fn renders_snippet_with_markers() {
        let (diagnostics, buffer) = diagnostics();
        let file = AsciiFile::new(b"f :: Integer\nf = 1 # 2\n").unwrap();
        let position = Position::new(19, 1, 6);
        let spanned = Spanned::new(Span::from_single_position(position), TestError('#'));

        diagnostics.error_with_source_snippet(&file, &spanned);

        let output = contents(&buffer);
        assert_eq!(
            output,
            "error: no acceptor matches '#'\n   | \n 2 | f = 1 # 2\n   |       ^\n\n"
        );
    }

    #[test]
    fn warnings_render_snippets_without_erroring() {
        let (diagnostics, buffer) = diagnostics();
        let file = AsciiFile::new(b"x = 1 ;").unwrap();
        let start = Position::new(4, 0, 4);
        let end = Position::new(6, 0, 6);
        let spanned = Spanned::new(Span::new(start, end), TestError(';'));

        diagnostics.warning_with_source_snippet(&file, &spanned);

        assert!(!diagnostics.errored());
        assert_eq!(diagnostics.count(MessageLevel::Warning), 1);
        assert_eq!(
            contents(&buffer),
            "warning: no acceptor matches ';'\n   | \n 1 | x = 1 ;\n   |     ^^^\n\n"
        );
    }

    #[test]
    fn statistics() {
        let (diagnostics, buffer) = diagnostics();
        diagnostics.write_statistics();
        diagnostics.error(&TestError('?'));
        diagnostics.write_statistics();

        let output = contents(&buffer);
        assert!(output.contains("Compilation finished successfully without warnings"));
        assert!(output.ends_with("Compilation aborted due to an error\n"));
    }

    #[test]
    fn printable_representation() {
        assert_eq!(u8_to_printable_representation(b'\t'), "\\t");
        assert_eq!(u8_to_printable_representation(b'a'), "a");
    }
}

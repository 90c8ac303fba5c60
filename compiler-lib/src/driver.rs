use crate::context::Context;
use asciifile::AsciiFile;
use ast::Program;
use failure::Error;
use lexer::{AcceptorSet, CheckedSymbolLexer, Lexer, Token, TokenResult};
use std::io;
use termcolor::{ColorChoice, StandardStream, WriteColor};
use type_checking::ExpEnv;

/// Runs the front end phases on a source file and reports the first error
/// of each phase through the context's diagnostics.
pub struct Driver {
    /// error output. Defaults to stderr. Handed to the first context
    /// created by this driver.
    writer_err: Option<Box<dyn WriteColor>>,
    /// if true, symbolic operators are checked against the operators of
    /// MH and classified by their text.
    check_symbols: bool,
    acceptors: AcceptorSet,
}

impl Default for Driver {
    fn default() -> Self {
        Self {
            writer_err: None,
            check_symbols: false,
            acceptors: AcceptorSet::micro_haskell(),
        }
    }
}

impl Driver {
    pub fn set_writer_err(mut self, writer: Box<dyn WriteColor>) -> Self {
        self.writer_err = Some(writer);
        self
    }

    pub fn check_symbols(mut self, check_symbols: bool) -> Self {
        self.check_symbols = check_symbols;
        self
    }

    pub fn acceptors(mut self, acceptors: AcceptorSet) -> Self {
        self.acceptors = acceptors;
        self
    }

    /// Validates `code` as ASCII.
    pub fn load(code: &[u8]) -> Result<AsciiFile<'_>, Error> {
        let file = AsciiFile::new(code)?;
        log::debug!("loaded {} bytes", code.len());
        Ok(file)
    }

    pub fn context<'m>(&mut self, file: &'m AsciiFile<'m>) -> Context<'m> {
        let writer = self
            .writer_err
            .take()
            .unwrap_or_else(|| Box::new(StandardStream::stderr(ColorChoice::Auto)));
        Context::new(file, writer)
    }

    fn token_stream<'a>(
        &'a self,
        file: &'a AsciiFile<'_>,
    ) -> Box<dyn Iterator<Item = TokenResult> + 'a> {
        let lexer = Lexer::new(file.chars(), &self.acceptors);
        if self.check_symbols {
            Box::new(CheckedSymbolLexer::new(lexer))
        } else {
            Box::new(lexer)
        }
    }

    /// Lexes the whole file. Returns `None` if a lexical error was
    /// reported.
    pub fn lex(&self, context: &Context<'_>) -> Option<Vec<Token>> {
        match self.token_stream(context.file).collect::<Result<Vec<Token>, _>>() {
            Ok(tokens) => {
                log::debug!("lexed {} tokens", tokens.len());
                Some(tokens)
            }
            Err(err) => {
                context
                    .diagnostics
                    .error_with_source_snippet(context.file, &err);
                None
            }
        }
    }

    /// Type checks `program`. Returns `None` if a check error was reported.
    pub fn check(&self, context: &Context<'_>, program: &Program) -> Option<ExpEnv> {
        match type_checking::check(program) {
            Ok(env) => Some(env),
            Err(err) => {
                context.diagnostics.error(&err);
                None
            }
        }
    }

    /// Writes one token per line, in the format `"else" of class "else"`.
    pub fn write_lextest(&self, context: &Context<'_>, out: &mut dyn io::Write) -> Result<(), Error> {
        if let Some(tokens) = self.lex(context) {
            for token in &tokens {
                writeln!(out, "{}", token.data)?;
            }
        }
        Ok(())
    }
}

/// Print error objects in a format intended for end users
pub fn print_error(writer: &mut dyn io::Write, err: &Error) -> Result<(), Error> {
    writeln!(writer, "error: {}", err.as_fail())?;
    for cause in err.iter_causes() {
        writeln!(writer, "caused by: {}", cause)?;
    }
    Ok(())
}

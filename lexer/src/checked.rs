//! Restricts the generic `SYM` class to the operators MH actually has.
use crate::{ErrorKind, Lexeme, LexicalError, Token, TokenResult, SYM};

/// Operators of the MH language. A symbolic token is reclassified with its
/// own text as class, any other symbol is a lexical error.
pub const MH_SYMBOLS: [&str; 7] = ["::", "->", "=", "==", "<=", "+", "-"];

/// Wraps a token stream and checks every `SYM` token against
/// [`MH_SYMBOLS`]. Like the lexer itself it stops after the first error.
pub struct CheckedSymbolLexer<L> {
    tokens: L,
    finished: bool,
}

impl<L> CheckedSymbolLexer<L>
where
    L: Iterator<Item = TokenResult>,
{
    pub fn new(tokens: L) -> Self {
        Self {
            tokens,
            finished: false,
        }
    }
}

impl<L> Iterator for CheckedSymbolLexer<L>
where
    L: Iterator<Item = TokenResult>,
{
    type Item = TokenResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let checked = self.tokens.next()?.and_then(check_symbol);
        if checked.is_err() {
            self.finished = true;
        }
        Some(checked)
    }
}

fn check_symbol(token: Token) -> TokenResult {
    if token.class != SYM {
        return Ok(token);
    }

    if MH_SYMBOLS.contains(&token.text.as_str()) {
        Ok(token.map(|lexeme| Lexeme::new(&lexeme.text, &lexeme.text)))
    } else {
        Err(LexicalError::new(
            token.span,
            ErrorKind::UnknownSymbol(token.data.text),
        ))
    }
}

#![warn(rust_2018_idioms)]
#![warn(clippy::print_stdout)]
#[macro_use]
extern crate derive_more;

pub mod acceptor;
pub mod acceptors;
pub mod char_types;
pub mod checked;

pub use self::{
    acceptor::{Acceptor, AcceptorSet, State, START},
    acceptors::{BOOLEAN, DISCARDED, NUM, SYM, VAR},
    checked::CheckedSymbolLexer,
};
use asciifile::{Position, Span, Spanned};
use failure::Fail;
use std::{collections::VecDeque, fmt, result::Result};

pub type TokenResult = Result<Token, LexicalError>;

pub type Token = Spanned<Lexeme>;
pub type LexicalError = Spanned<ErrorKind>;

/// A piece of source text together with the lexical class it was
/// recognized as.
#[derive(Debug, PartialEq, Eq, Clone, Hash, Display)]
#[display(fmt = "\"{}\" of class \"{}\"", text, class)]
pub struct Lexeme {
    pub text: String,
    pub class: String,
}

impl Lexeme {
    pub fn new(text: &str, class: &str) -> Self {
        Self {
            text: text.to_string(),
            class: class.to_string(),
        }
    }

    pub fn is_discarded(&self) -> bool {
        self.class == DISCARDED
    }
}

#[derive(Debug, Fail)]
pub enum ErrorKind {
    UnexpectedCharacter(char),
    UnknownSymbol(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedCharacter(chr) => fmt_unexpected_character(f, *chr),
            ErrorKind::UnknownSymbol(symbol) => write!(f, "Unknown symbol `{}`", symbol),
        }
    }
}

fn fmt_unexpected_character(f: &mut fmt::Formatter<'_>, chr: char) -> fmt::Result {
    match chr {
        '\n' => write!(f, "Unexpected newline"),
        '\\' => write!(f, "Unexpected backslash"),
        '\'' => write!(f, "Unexpected single quote"),
        '"' => write!(f, "Unexpected double quote"),
        chr if chr.is_whitespace() => {
            write!(f, "Unexpected whitespace '{}'", chr.escape_default())
        }
        chr if chr.is_control() => {
            write!(f, "Unexpected control character '{}'", chr.escape_default())
        }
        _ => write!(f, "Unexpected character '{}'", chr.escape_default()),
    }
}

/// Turns a stream of characters into a stream of tokens by running all
/// acceptors of an `AcceptorSet` in lock-step.
///
/// Every token is the longest prefix of the remaining input any acceptor
/// accepts. If several acceptors accept a prefix of that length, the one
/// that comes first in the set wins. Lexemes of a discarded class
/// (whitespace, comments) are skipped unless `keep_discarded` was called.
///
/// The lexer stops after the first lexical error.
pub struct Lexer<'a, I>
where
    I: Iterator<Item = char>,
{
    input: I,
    /// Characters read from `input` that are not part of a token yet.
    lookahead: VecDeque<char>,
    /// Position of the first character in `lookahead`.
    position: Position,
    acceptors: &'a AcceptorSet,
    keep_discarded: bool,
    finished: bool,
}

impl<'a, I> Lexer<'a, I>
where
    I: Iterator<Item = char>,
{
    pub fn new(input: I, acceptors: &'a AcceptorSet) -> Self {
        Self {
            input,
            lookahead: VecDeque::new(),
            position: Position::at_file_start(),
            acceptors,
            keep_discarded: false,
            finished: false,
        }
    }

    /// Also yield lexemes of discarded classes.
    pub fn keep_discarded(mut self) -> Self {
        self.keep_discarded = true;
        self
    }

    /// Position of the next character that is not part of a token yet.
    pub fn position(&self) -> Position {
        self.position
    }

    fn lex_lexeme(&mut self) -> Option<TokenResult> {
        let first = self.peek_nth(0)?;

        Some(match self.longest_match() {
            Some((len, class)) => {
                let (text, span) = self.consume(len);
                let token = Token::new(span, Lexeme::new(&text, class));
                log::debug!("lexed {} at {}", token.data, span);
                Ok(token)
            }
            None => Err(LexicalError::new(
                Span::from_single_position(self.position),
                ErrorKind::UnexpectedCharacter(first),
            )),
        })
    }

    /// Feeds characters to all acceptors until every acceptor is dead or
    /// the input ends. Returns the length of the longest accepted prefix and
    /// the class of the acceptor with the highest priority accepting it.
    fn longest_match(&mut self) -> Option<(usize, &'a str)> {
        let acceptors = self.acceptors;
        let mut states = vec![START; acceptors.len()];
        let mut best = None;
        let mut read = 0;

        while let Some(c) = self.peek_nth(read) {
            read += 1;

            let mut all_dead = true;
            for (state, acceptor) in states.iter_mut().zip(acceptors) {
                *state = acceptor.next(*state, c);
                all_dead &= acceptor.is_dead(*state);
            }

            let accepting = states
                .iter()
                .zip(acceptors)
                .find(|&(&state, acceptor)| acceptor.is_accepting(state));
            if let Some((_, acceptor)) = accepting {
                best = Some((read, acceptor.lex_class()));
            }

            if all_dead {
                break;
            }
        }

        best
    }

    fn peek_nth(&mut self, n: usize) -> Option<char> {
        while self.lookahead.len() <= n {
            let c = self.input.next()?;
            self.lookahead.push_back(c);
        }
        self.lookahead.get(n).cloned()
    }

    /// Removes the first `len` characters from the lookahead. The rest is
    /// left for the next lexeme.
    fn consume(&mut self, len: usize) -> (String, Span) {
        debug_assert!(len >= 1 && len <= self.lookahead.len());

        let start = self.position;
        let mut end = start;
        let mut text = String::with_capacity(len);

        for c in self.lookahead.drain(..len) {
            end = self.position;
            self.position = self.position.advance(c);
            text.push(c);
        }

        (text, Span::new(start, end))
    }
}

impl<'a, I> Iterator for Lexer<'a, I>
where
    I: Iterator<Item = char>,
{
    type Item = TokenResult;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            match self.lex_lexeme() {
                None => self.finished = true,
                Some(Err(err)) => {
                    self.finished = true;
                    return Some(Err(err));
                }
                Some(Ok(ref token)) if token.is_discarded() && !self.keep_discarded => {}
                Some(Ok(token)) => return Some(Ok(token)),
            }
        }

        None
    }
}

/// Lexes all of `source`, stopping at the first lexical error.
pub fn tokenize(source: &str, acceptors: &AcceptorSet) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source.chars(), acceptors).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn lex(input: &str) -> Vec<(String, String)> {
        tokenize(input, &AcceptorSet::micro_haskell())
            .unwrap_or_else(|err| panic!("{} in {:?}", err, input))
            .into_iter()
            .map(|token| (token.data.text, token.data.class))
            .collect()
    }

    fn lex_all(input: &str) -> Vec<Token> {
        let acceptors = AcceptorSet::micro_haskell();
        Lexer::new(input.chars(), &acceptors)
            .keep_discarded()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    macro_rules! tokens {
        ($(($text:expr, $class:expr)),* $(,)?) => {
            vec![$(($text.to_string(), $class.to_string())),*] as Vec<(String, String)>
        };
    }

    #[test]
    fn tie_goes_to_earliest_acceptor() {
        let variable_first = AcceptorSet::new()
            .with(acceptors::Variable)
            .with(acceptors::FixedString::new("if"));
        let keyword_first = AcceptorSet::new()
            .with(acceptors::FixedString::new("if"))
            .with(acceptors::Variable);

        let class_of = |set: &AcceptorSet| {
            tokenize("if", set)
                .unwrap()
                .into_iter()
                .map(|token| token.data.class)
                .collect::<Vec<_>>()
        };
        assert_eq!(class_of(&variable_first), vec![VAR]);
        assert_eq!(class_of(&keyword_first), vec!["if"]);
    }

    #[test]
    fn keyword_then_symbol() {
        assert_eq!(lex("else++"), tokens![("else", "else"), ("++", SYM)]);
    }

    #[test]
    fn longest_match_beats_keyword() {
        assert_eq!(lex("else1+"), tokens![("else1", VAR), ("+", SYM)]);
    }

    #[test]
    fn punctuation_beats_nothing() {
        assert_eq!(lex("()"), tokens![("(", "("), (")", ")")]);
    }

    #[test]
    fn symbol_longer_than_comment() {
        assert_eq!(
            lex_all("---+ ")
                .into_iter()
                .map(|token| token.data)
                .collect::<Vec<_>>(),
            vec![Lexeme::new("---+", SYM), Lexeme::new(" ", DISCARDED)]
        );
    }

    #[test]
    fn comments_are_discarded() {
        assert_eq!(lex("--  "), tokens![]);
        assert_eq!(lex("--"), tokens![]);
        assert_eq!(lex_all("--").len(), 1);
        assert_eq!(lex_all("--  ")[0].text, "--  ");
    }

    #[test]
    fn symbol_number_variable() {
        assert_eq!(
            lex("+13fy"),
            tokens![("+", SYM), ("13", NUM), ("fy", VAR)]
        );
    }

    #[test]
    fn leading_zero_is_split() {
        assert_eq!(lex("04"), tokens![("0", NUM), ("4", NUM)]);
    }

    #[test]
    fn booleans_and_type_keywords() {
        assert_eq!(
            lex("True Falsey Integer Bool Integers"),
            tokens![
                ("True", BOOLEAN),
                ("False", BOOLEAN),
                ("y", VAR),
                ("Integer", "Integer"),
                ("Bool", "Bool"),
                ("Integer", "Integer"),
                ("s", VAR),
            ]
        );
    }

    #[test]
    fn declaration() {
        assert_eq!(
            lex("f :: Integer -> Bool ;\nf x = if x <= 0 then True else False ;"),
            tokens![
                ("f", VAR),
                ("::", SYM),
                ("Integer", "Integer"),
                ("->", SYM),
                ("Bool", "Bool"),
                (";", ";"),
                ("f", VAR),
                ("x", VAR),
                ("=", SYM),
                ("if", "if"),
                ("x", VAR),
                ("<=", SYM),
                ("0", NUM),
                ("then", "then"),
                ("True", BOOLEAN),
                ("else", "else"),
                ("False", BOOLEAN),
                (";", ";"),
            ]
        );
    }

    #[test]
    fn comment_until_end_of_line() {
        assert_eq!(
            lex("x -- the argument\ny"),
            tokens![("x", VAR), ("y", VAR)]
        );
        let all = lex_all("x -- the argument\ny");
        assert_eq!(all[2].text, "-- the argument\n");
    }

    #[test]
    fn round_trip() {
        let input = "fib :: Integer -> Integer ;\n-- naive\nfib n = if n <= 1 then n\n  else fib (n - 1) + fib (n-2) ;\n---\n";
        let lexemes = lex_all(input);
        assert_eq!(lexemes.iter().map(|token| token.text.as_str()).join(""), input);
    }

    #[test]
    fn spans_track_lines_and_columns() {
        let tokens = tokenize("f\n  xs'", &AcceptorSet::micro_haskell()).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].span.start, Position::new(4, 1, 2));
        assert_eq!(tokens[1].span.end, Position::new(6, 1, 4));
    }

    #[test]
    fn unknown_character_is_an_error() {
        let acceptors = AcceptorSet::micro_haskell();
        let mut lexer = Lexer::new("x ,y".chars(), &acceptors);

        assert_eq!(lexer.next().unwrap().unwrap().text, "x");
        let err = lexer.next().unwrap().unwrap_err();
        assert_matches_unexpected(&err.data, ',');
        assert_eq!(err.span.start, Position::new(2, 0, 2));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    fn assert_matches_unexpected(kind: &ErrorKind, expected: char) {
        match kind {
            ErrorKind::UnexpectedCharacter(chr) => assert_eq!(*chr, expected),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(lex(""), tokens![]);
        let acceptors = AcceptorSet::micro_haskell();
        let mut lexer = Lexer::new("".chars(), &acceptors);
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn empty_acceptor_set_rejects_everything() {
        let acceptors = AcceptorSet::new();
        let err = tokenize("x", &acceptors).unwrap_err();
        assert_matches_unexpected(&err.data, 'x');
    }

    #[test]
    fn reads_input_lazily() {
        let acceptors = AcceptorSet::micro_haskell();
        let mut read = 0;
        {
            let input = "ab cd ef".chars().inspect(|_| read += 1);
            let mut lexer = Lexer::new(input, &acceptors);
            assert_eq!(lexer.next().unwrap().unwrap().text, "ab");
        }
        // "ab" plus the space that killed every acceptor
        assert_eq!(read, 3);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ErrorKind::UnexpectedCharacter(',').to_string(),
            "Unexpected character ','"
        );
        assert_eq!(
            ErrorKind::UnexpectedCharacter('"').to_string(),
            "Unexpected double quote"
        );
        assert_eq!(
            Lexeme::new("else", "else").to_string(),
            "\"else\" of class \"else\""
        );
    }
}

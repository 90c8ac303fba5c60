//! The acceptors of the MH language. Every acceptor is a small hand written
//! state machine; comments give the regular expression it recognizes.
use crate::{
    acceptor::{Acceptor, AcceptorSet, State},
    char_types::*,
};

pub const VAR: &str = "VAR";
pub const NUM: &str = "NUM";
pub const BOOLEAN: &str = "BOOLEAN";
pub const SYM: &str = "SYM";
pub const DISCARDED: &str = "";

/// small (small + large + digit + ')*
#[derive(Debug, Default, Clone, Copy)]
pub struct Variable;

impl Acceptor for Variable {
    fn lex_class(&self) -> &str {
        VAR
    }

    fn number_of_states(&self) -> usize {
        3
    }

    fn next(&self, state: State, c: char) -> State {
        match state {
            0 if is_small(c) => 1,
            1 if is_small(c) || is_large(c) || is_digit(c) || c == '\'' => 1,
            _ => 2,
        }
    }

    fn is_accepting(&self, state: State) -> bool {
        state == 1
    }

    fn dead(&self) -> State {
        2
    }
}

/// 0 + nonZeroDigit digit*
///
/// A lone zero and a run of digits are distinct accepting states, only the
/// latter may be extended.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericLiteral;

impl Acceptor for NumericLiteral {
    fn lex_class(&self) -> &str {
        NUM
    }

    fn number_of_states(&self) -> usize {
        4
    }

    fn next(&self, state: State, c: char) -> State {
        match state {
            0 if c == '0' => 1,
            0 if is_digit(c) => 2,
            2 if is_digit(c) => 2,
            _ => 3,
        }
    }

    fn is_accepting(&self, state: State) -> bool {
        state == 1 || state == 2
    }

    fn dead(&self) -> State {
        3
    }
}

/// True + False
///
/// Both branches share the chain ending in the accepting state 4: `Fals`
/// continues in state 3, the state reached by `Tru`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanLiteral;

impl Acceptor for BooleanLiteral {
    fn lex_class(&self) -> &str {
        BOOLEAN
    }

    fn number_of_states(&self) -> usize {
        9
    }

    fn next(&self, state: State, c: char) -> State {
        match (state, c) {
            (0, 'T') => 1,
            (1, 'r') => 2,
            (2, 'u') => 3,
            (3, 'e') => 4,
            (0, 'F') => 5,
            (5, 'a') => 6,
            (6, 'l') => 7,
            (7, 's') => 3,
            _ => 8,
        }
    }

    fn is_accepting(&self, state: State) -> bool {
        state == 4
    }

    fn dead(&self) -> State {
        8
    }
}

/// symbolic symbolic*
#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolicOperator;

impl Acceptor for SymbolicOperator {
    fn lex_class(&self) -> &str {
        SYM
    }

    fn number_of_states(&self) -> usize {
        3
    }

    fn next(&self, state: State, c: char) -> State {
        match state {
            0 | 1 if is_symbolic(c) => 1,
            _ => 2,
        }
    }

    fn is_accepting(&self, state: State) -> bool {
        state == 1
    }

    fn dead(&self) -> State {
        2
    }
}

/// whitespace whitespace*
#[derive(Debug, Default, Clone, Copy)]
pub struct Whitespace;

impl Acceptor for Whitespace {
    fn lex_class(&self) -> &str {
        DISCARDED
    }

    fn number_of_states(&self) -> usize {
        3
    }

    fn next(&self, state: State, c: char) -> State {
        match state {
            0 | 1 if is_whitespace(c) => 1,
            _ => 2,
        }
    }

    fn is_accepting(&self, state: State) -> bool {
        state == 1
    }

    fn dead(&self) -> State {
        2
    }
}

/// - - -* (nonSymbolNewline nonNewline* + ε)
///
/// A newline ending the comment text moves to state 4, which still accepts
/// but cannot be extended. A newline directly after the dashes is not part
/// of the comment.
#[derive(Debug, Default, Clone, Copy)]
pub struct Comment;

impl Acceptor for Comment {
    fn lex_class(&self) -> &str {
        DISCARDED
    }

    fn number_of_states(&self) -> usize {
        6
    }

    fn next(&self, state: State, c: char) -> State {
        match state {
            0 if c == '-' => 1,
            1 if c == '-' => 2,
            2 if c == '-' => 2,
            2 if !is_symbolic(c) && !is_newline(c) => 3,
            3 if !is_newline(c) => 3,
            3 => 4,
            _ => 5,
        }
    }

    fn is_accepting(&self, state: State) -> bool {
        state == 2 || state == 3 || state == 4
    }

    fn dead(&self) -> State {
        5
    }
}

/// Matches exactly one literal string, e.g. a keyword or a punctuation
/// character. The literal is also the token class.
///
/// State `n` means the first `n` characters of the literal were matched;
/// `len + 1` is the dead state.
#[derive(Debug, Clone)]
pub struct FixedString {
    tok: String,
    chars: Vec<char>,
}

impl FixedString {
    pub fn new(tok: &str) -> Self {
        debug_assert!(!tok.is_empty());
        Self {
            tok: tok.to_string(),
            chars: tok.chars().collect(),
        }
    }
}

impl Acceptor for FixedString {
    fn lex_class(&self) -> &str {
        &self.tok
    }

    fn number_of_states(&self) -> usize {
        self.chars.len() + 2
    }

    fn next(&self, state: State, c: char) -> State {
        match self.chars.get(state) {
            Some(&expected) if expected == c => state + 1,
            _ => self.dead(),
        }
    }

    fn is_accepting(&self, state: State) -> bool {
        state == self.chars.len()
    }

    fn dead(&self) -> State {
        self.chars.len() + 1
    }
}

pub const KEYWORDS: [&str; 5] = ["Integer", "Bool", "if", "then", "else"];
pub const PUNCTUATION: [&str; 3] = ["(", ")", ";"];

impl AcceptorSet {
    /// All acceptors of the MH language in priority order: keywords and
    /// punctuation come first so they win against identifiers and
    /// operators of the same length.
    pub fn micro_haskell() -> Self {
        KEYWORDS
            .iter()
            .chain(PUNCTUATION.iter())
            .fold(AcceptorSet::new(), |set, tok| set.with(FixedString::new(tok)))
            .with(Variable)
            .with(Whitespace)
            .with(Comment)
            .with(SymbolicOperator)
            .with(NumericLiteral)
            .with(BooleanLiteral)
    }
}

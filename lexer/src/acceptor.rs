//! The contract every finite-state recognizer of the lexer implements.
//!
//! An acceptor is an immutable description of a deterministic finite
//! automaton. Its states are plain indices, the start state is always
//! [`START`]. The transition function must be total and the state returned
//! by [`Acceptor::dead`] must be absorbing and never accepting. The engine
//! only ever talks to acceptors through this trait.
use std::fmt;

pub type State = usize;

pub const START: State = 0;

pub trait Acceptor: fmt::Debug {
    /// The token class this acceptor recognizes. An empty class marks
    /// lexemes that are recognized but discarded.
    fn lex_class(&self) -> &str;

    fn number_of_states(&self) -> usize;

    fn next(&self, state: State, c: char) -> State;

    fn is_accepting(&self, state: State) -> bool;

    fn dead(&self) -> State;

    fn is_dead(&self, state: State) -> bool {
        state == self.dead()
    }

    fn is_discarded(&self) -> bool {
        self.lex_class().is_empty()
    }

    /// The state reached after feeding all of `input` from the start state.
    fn run(&self, input: &str) -> State {
        input.chars().fold(START, |state, c| self.next(state, c))
    }

    fn accepts(&self, input: &str) -> bool {
        self.is_accepting(self.run(input))
    }
}

/// An ordered set of acceptors. The order is the priority used to break
/// ties between acceptors that match lexemes of the same length.
#[derive(Debug, Default)]
pub struct AcceptorSet {
    acceptors: Vec<Box<dyn Acceptor>>,
}

impl AcceptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `acceptor` with a lower priority than all acceptors already
    /// in the set.
    pub fn with<A>(mut self, acceptor: A) -> Self
    where
        A: Acceptor + 'static,
    {
        self.acceptors.push(Box::new(acceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.acceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acceptors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn Acceptor>> {
        self.acceptors.iter()
    }
}

impl<'a> IntoIterator for &'a AcceptorSet {
    type Item = &'a Box<dyn Acceptor>;
    type IntoIter = std::slice::Iter<'a, Box<dyn Acceptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

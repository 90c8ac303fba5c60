use crate::errors::CheckError;
use ast::Exp;
use itertools::Itertools;
use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
};

/// A top-level name together with its closure-converted definition.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{} = {}", name, exp)]
pub struct NamedExp {
    pub name: String,
    pub exp: Exp,
}

impl NamedExp {
    pub fn new(name: &str, exp: Exp) -> Self {
        Self {
            name: name.to_string(),
            exp,
        }
    }
}

/// The checked program: top-level bindings in declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpEnv {
    bindings: Vec<NamedExp>,
    index: HashMap<String, usize>,
}

impl ExpEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, binding: NamedExp) -> Result<(), CheckError> {
        match self.index.entry(binding.name.clone()) {
            Entry::Occupied(_) => Err(CheckError::DuplicatedVariable { name: binding.name }),
            Entry::Vacant(e) => {
                e.insert(self.bindings.len());
                self.bindings.push(binding);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Exp> {
        self.index.get(name).map(|&idx| &self.bindings[idx].exp)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|binding| binding.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedExp> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExpEnv {
    type Item = &'a NamedExp;
    type IntoIter = std::slice::Iter<'a, NamedExp>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ExpEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bindings.iter().join("\n"))
    }
}

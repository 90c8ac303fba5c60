//! Syntax tree of MH programs, as produced by a parser and consumed by the
//! type checker.
#![warn(rust_2018_idioms)]
use itertools::Itertools;
use std::fmt;
use strum_macros::{Display, EnumDiscriminants};

/// This is the top-level AST node. It stores all declarations of the
/// program in source order.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Program {
    pub decls: Vec<Decl>,
}

impl Program {
    pub fn new(decls: Vec<Decl>) -> Self {
        Self { decls }
    }

    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.decls.iter().map(|decl| &decl.signature)
    }
}

/// A declaration pairs a type signature `f :: Integer -> Integer ;` with
/// an implementation `f x = x + 1 ;`. The parser does not check that both
/// use the same name.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Decl {
    pub signature: Signature,
    pub implementation: Implementation,
}

impl Decl {
    pub fn new(signature: Signature, implementation: Implementation) -> Self {
        Self {
            signature,
            implementation,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Signature {
    pub name: String,
    pub ty: TypeExpr,
}

impl Signature {
    pub fn new(name: &str, ty: TypeExpr) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Implementation {
    pub name: String,
    pub args: Vec<String>,
    pub body: Exp,
}

impl Implementation {
    pub fn new(name: &str, args: &[&str], body: Exp) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            body,
        }
    }
}

/// A type as written in a signature. `->` associates to the right, so
/// `Integer -> Integer -> Bool` is `Function(Integer, Function(Integer,
/// Bool))`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TypeExpr {
    Integer,
    Bool,
    Function(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    pub fn function(arg: TypeExpr, result: TypeExpr) -> Self {
        TypeExpr::Function(Box::new(arg), Box::new(result))
    }
}

/// Expressions. `Lambda` is never produced by a parser, the type checker
/// introduces it when it turns declarations with arguments into closures.
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone)]
#[strum_discriminants(name(ExpKind), derive(Display, Hash))]
pub enum Exp {
    Var(String),
    Num(String),
    Boolean(String),
    App(Box<Exp>, Box<Exp>),
    Infix(String, Box<Exp>, Box<Exp>),
    If(Box<Exp>, Box<Exp>, Box<Exp>),
    Lambda(String, Box<Exp>),
}

impl Exp {
    pub fn var(name: &str) -> Self {
        Exp::Var(name.to_string())
    }

    pub fn num(digits: &str) -> Self {
        Exp::Num(digits.to_string())
    }

    pub fn boolean(text: &str) -> Self {
        Exp::Boolean(text.to_string())
    }

    pub fn app(function: Exp, arg: Exp) -> Self {
        Exp::App(Box::new(function), Box::new(arg))
    }

    /// Applies `function` to all `args` from left to right.
    pub fn apply<I>(function: Exp, args: I) -> Self
    where
        I: IntoIterator<Item = Exp>,
    {
        args.into_iter().fold(function, Exp::app)
    }

    pub fn infix(op: &str, lhs: Exp, rhs: Exp) -> Self {
        Exp::Infix(op.to_string(), Box::new(lhs), Box::new(rhs))
    }

    pub fn cond(cond: Exp, then: Exp, otherwise: Exp) -> Self {
        Exp::If(Box::new(cond), Box::new(then), Box::new(otherwise))
    }

    pub fn lambda(arg: &str, body: Exp) -> Self {
        Exp::Lambda(arg.to_string(), Box::new(body))
    }

    pub fn kind(&self) -> ExpKind {
        ExpKind::from(self)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Integer => write!(f, "Integer"),
            TypeExpr::Bool => write!(f, "Bool"),
            TypeExpr::Function(arg, result) => match **arg {
                TypeExpr::Function(..) => write!(f, "({}) -> {}", arg, result),
                _ => write!(f, "{} -> {}", arg, result),
            },
        }
    }
}

/// Fully parenthesized, meant for log and error messages.
impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exp::Var(text) | Exp::Num(text) | Exp::Boolean(text) => write!(f, "{}", text),
            Exp::App(function, arg) => write!(f, "({} {})", function, arg),
            Exp::Infix(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            Exp::If(cond, then, otherwise) => {
                write!(f, "(if {} then {} else {})", cond, then, otherwise)
            }
            Exp::Lambda(arg, body) => write!(f, "(\\{} -> {})", arg, body),
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} :: {} ;", self.signature.name, self.signature.ty)?;
        let implementation = &self.implementation;
        if implementation.args.is_empty() {
            write!(f, "{} = {} ;", implementation.name, implementation.body)
        } else {
            write!(
                f,
                "{} {} = {} ;",
                implementation.name,
                implementation.args.iter().join(" "),
                implementation.body
            )
        }
    }
}

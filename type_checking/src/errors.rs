use crate::type_system::MhType;
use ast::ExpKind;
use failure::Fail;

#[derive(Debug, Fail, PartialEq, Clone)]
pub enum CheckError {
    #[fail(display = "type error: {}", _0)]
    TypeError(#[cause] TypeErrorKind),
    #[fail(display = "unknown variable '{}'", name)]
    UnknownVariable { name: String },
    #[fail(display = "variable '{}' is already defined", name)]
    DuplicatedVariable { name: String },
    #[fail(
        display = "type signature for '{}' is followed by a definition of '{}'",
        sig_name, impl_name
    )]
    NameMismatch { sig_name: String, impl_name: String },
}

#[derive(Debug, Fail, PartialEq, Clone)]
pub enum TypeErrorKind {
    #[fail(display = "non-digit character '{}' found in '{}'", chr, literal)]
    NonDigitInNumeral { literal: String, chr: char },
    #[fail(display = "'{}' is not a boolean", literal)]
    NotABoolean { literal: String },
    #[fail(display = "expression of type {} cannot be applied", ty)]
    NotAFunction { ty: MhType },
    #[fail(display = "expected argument of type {}, found {}", expected, found)]
    ArgumentMismatch { expected: MhType, found: MhType },
    #[fail(
        display = "operands of '{}' must be of type Integer, found {} and {}",
        op, left, right
    )]
    OperandsNotInteger {
        op: String,
        left: MhType,
        right: MhType,
    },
    #[fail(display = "infix operator '{}' is not in the language", op)]
    UnknownOperator { op: String },
    #[fail(display = "condition must be of type Bool, found {}", found)]
    ConditionNotBool { found: MhType },
    #[fail(display = "branches have different types {} and {}", then, otherwise)]
    BranchMismatch { then: MhType, otherwise: MhType },
    #[fail(display = "too many function arguments ({}) for type {}", count, ty)]
    TooManyArguments { count: usize, ty: MhType },
    #[fail(
        display = "right-hand side of '{}' has type {}, expected {}",
        name, found, expected
    )]
    WrongResultType {
        name: String,
        expected: MhType,
        found: MhType,
    },
    #[fail(display = "expression is malformed ({})", kind)]
    Malformed { kind: ExpKind },
}

impl From<TypeErrorKind> for CheckError {
    fn from(kind: TypeErrorKind) -> Self {
        CheckError::TypeError(kind)
    }
}

use ast::TypeExpr;
use std::fmt;

/// The types of MH. Two types are the same iff they are structurally equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MhType {
    Integer,
    Bool,
    Function(Box<MhType>, Box<MhType>),
}

impl MhType {
    pub fn function(arg: MhType, result: MhType) -> Self {
        MhType::Function(Box::new(arg), Box::new(result))
    }

    pub fn from_type_expr(expr: &TypeExpr) -> Self {
        match expr {
            TypeExpr::Integer => MhType::Integer,
            TypeExpr::Bool => MhType::Bool,
            TypeExpr::Function(arg, result) => {
                MhType::function(Self::from_type_expr(arg), Self::from_type_expr(result))
            }
        }
    }

    pub fn is_integer(&self) -> bool {
        *self == MhType::Integer
    }

    pub fn is_bool(&self) -> bool {
        *self == MhType::Bool
    }

    pub fn is_fun(&self) -> bool {
        match self {
            MhType::Function(..) => true,
            _ => false,
        }
    }

    pub fn arg(&self) -> Option<&MhType> {
        match self {
            MhType::Function(arg, _) => Some(&**arg),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&MhType> {
        match self {
            MhType::Function(_, result) => Some(&**result),
            _ => None,
        }
    }
}

impl fmt::Display for MhType {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        use self::MhType::*;
        match self {
            Integer => write!(f, "Integer"),
            Bool => write!(f, "Bool"),
            Function(arg, result) if arg.is_fun() => write!(f, "({}) -> {}", arg, result),
            Function(arg, result) => write!(f, "{} -> {}", arg, result),
        }
    }
}

#![warn(rust_2018_idioms)]
#[macro_use]
extern crate derive_more;

pub mod checker;
pub mod env;
pub mod errors;
pub mod exp_env;
pub mod type_system;

pub use self::{
    checker::{
        build_closure, check, compile_type_env, compute_type, typecheck_decl, typecheck_prog,
    },
    env::TypeEnv,
    errors::{CheckError, TypeErrorKind},
    exp_env::{ExpEnv, NamedExp},
    type_system::MhType,
};

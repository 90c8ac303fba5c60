#![warn(rust_2018_idioms)]
#![warn(clippy::print_stdout)]

pub mod context;
pub mod driver;

pub use self::{
    context::Context,
    driver::{print_error, Driver},
};

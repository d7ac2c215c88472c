//! Term, literal and clause definitions shared by every Datalog crate.

mod ast;

pub use ast::*;

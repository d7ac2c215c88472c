//! Query Engine
//!
//! Answers a query literal against a [`datalog_storage::Database`] by
//! computing, bottom-up, every ground consequence of the rules the query
//! depends on.

pub mod evaluation;
pub mod grounding;
pub mod program;
pub mod query;
pub mod relation;
pub mod substitution;

// Re-export evaluation
pub use evaluation::*;

// Re-export query
pub use query::QueryResult;

pub use program::{Primitives, Program};
pub use relation::{Extensions, Relation};
pub use substitution::Substitution;

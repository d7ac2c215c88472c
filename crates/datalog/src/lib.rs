//! Datalog Engine
//!
//! An embeddable Datalog engine: a knowledge base of facts and safe rules
//! over interned predicates, answered by bottom-up fixpoint evaluation.
//! Parsing is left to the embedding application, which drives the engine
//! with [`Command`]s or calls [`Database`] and [`ask`] directly.
//!
//! # Features
//!
//! - **Safe rules**: every head variable must be bound by the body
//! - **Recursion**: semi-naive fixpoint evaluation, always terminating
//! - **Primitives**: built-in comparison predicates plus your own via [`FnPrimitive`]
//! - **Pluggable storage**: bring your own clause store via the [`ClauseStore`] trait
//!
//! # Example
//!
//! ```ignore
//! use datalog::{apply_all, render_results, Command, Database, LiteralTemplate, Term};
//!
//! let mut db = Database::new();
//! let results = apply_all(&[
//!     Command::fact(LiteralTemplate::new("parent", vec![Term::atom("tom"), Term::atom("bob")])),
//!     Command::query(LiteralTemplate::new("parent", vec![Term::variable("X"), Term::variable("Y")])),
//! ], &mut db)?;
//!
//! print!("{}", render_results(&results));
//! ```

mod render;

pub use render::render_results;

pub use datalog_ast::{
    sym, Clause, ClauseId, Literal, PredicateKey, Symbol, Term, Tuple, Value, ANONYMOUS,
};
pub use datalog_builtins::{FnPrimitive, Primitive, PrimitiveRef, PrimitiveSet};
pub use datalog_commands::{
    apply, apply_all, apply_all_with, apply_with, ApplyError, Command, CommandError,
    LiteralTemplate,
};
pub use datalog_eval::{
    ask, ask_instrumented, ask_with, EvalOptions, EvaluationError, EvaluationStats, QueryResult,
    Strategy,
};
pub use datalog_safety::{check_clause_safety, is_safe, SafetyError};
pub use datalog_storage::{
    ClauseStore, Clauses, Database, DatabaseError, MemoryClauseStore, StorageError,
    StorageResult,
};

// Re-export underlying crates for advanced usage
pub use datalog_ast;
pub use datalog_builtins;
pub use datalog_commands;
pub use datalog_eval;
pub use datalog_safety;
pub use datalog_storage;

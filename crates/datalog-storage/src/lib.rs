//! Clause Storage and Database
//!
//! This crate defines the clause store interface, an in-memory implementation,
//! the predicate table that interns predicates by (name, arity), and the
//! database that guards what may be stored.

mod database;
mod engine;
mod memory;
mod predicate_table;

pub use database::{Database, DatabaseError};
pub use engine::{ClauseStore, Clauses, StorageError, StorageResult};
pub use memory::MemoryClauseStore;
pub use predicate_table::{Backing, Predicate, PredicateTable};

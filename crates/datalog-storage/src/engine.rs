//! Clause store trait definition

use datalog_ast::{Clause, ClauseId};
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Clause store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store failed to carry out an operation
    #[error("clause store backend failure: {message}")]
    Backend { message: String },
}

/// A fresh, finite enumeration of stored clauses.
///
/// Dropping it early has no side effects.
pub type Clauses<'a> = Box<dyn Iterator<Item = &'a Clause> + 'a>;

/// Trait for pluggable per-predicate clause stores
///
/// Entries are keyed by [`ClauseId`], so inserting a structurally identical
/// clause twice leaves one entry.
pub trait ClauseStore: Default + std::fmt::Debug + Send + Sync {
    /// Insert a clause, replacing any entry with the same identity
    fn insert(&mut self, id: ClauseId, clause: Clause) -> StorageResult<()>;

    /// Delete the entry with this identity; no-op if absent
    fn delete(&mut self, id: &ClauseId) -> StorageResult<()>;

    /// Number of stored clauses
    fn size(&self) -> StorageResult<usize>;

    /// Enumerate every stored clause exactly once, in unspecified order
    fn clauses(&self) -> StorageResult<Clauses<'_>>;
}

//! The knowledge base: predicate table plus the safety guard
//!
//! `assert` stores a clause under its head predicate once it passes the safety
//! check. `retract` removes the structurally matching clause and drops the
//! predicate from the table when no clauses remain.

use crate::engine::{ClauseStore, Clauses, StorageError, StorageResult};
use crate::memory::MemoryClauseStore;
use crate::predicate_table::{Predicate, PredicateTable};
use datalog_ast::{Clause, PredicateKey};
use datalog_builtins::PrimitiveSet;
use datalog_safety::{check_clause_safety, SafetyError};
use thiserror::Error;
use tracing::debug;

/// Errors from mutating a database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatabaseError {
    /// The clause has head variables its body does not bind
    #[error("cannot assert {0}")]
    UnsafeClause(#[from] SafetyError),

    /// Built-in predicates are not user-mutable
    #[error("cannot assert on primitive predicate {0}")]
    PrimitiveTarget(PredicateKey),

    /// A clause store operation failed. State left behind by the failed
    /// operation is not rolled back.
    #[error("clause store for {predicate} failed: {source}")]
    InternalInconsistency {
        predicate: PredicateKey,
        #[source]
        source: StorageError,
    },
}

/// A Datalog knowledge base
#[derive(Debug, Default)]
pub struct Database<S: ClauseStore = MemoryClauseStore> {
    predicates: PredicateTable<S>,
}

impl Database<MemoryClauseStore> {
    /// Create an empty in-memory database without primitives
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ClauseStore> Database<S> {
    /// Create an empty database with the given primitive predicates installed
    pub fn with_primitives(primitives: PrimitiveSet) -> Self {
        let mut predicates = PredicateTable::new();
        for (key, primitive) in primitives {
            predicates.register_primitive(key, primitive);
        }
        Database { predicates }
    }

    /// Intern a predicate by name and arity
    pub fn new_predicate(&mut self, name: impl Into<String>, arity: usize) -> PredicateKey {
        self.predicates.intern(PredicateKey::new(name, arity)).key()
    }

    /// Store a clause under its head predicate.
    ///
    /// Storing a structurally identical clause again is a no-op.
    pub fn assert(&mut self, clause: Clause) -> Result<(), DatabaseError> {
        check_clause_safety(&clause)?;

        let key = clause.head.predicate;
        let Some(store) = self.predicates.intern(key).store_mut() else {
            return Err(DatabaseError::PrimitiveTarget(key));
        };

        debug!(predicate = %key, clause = %clause, "asserting clause");
        store
            .insert(clause.id(), clause)
            .map_err(|source| inconsistency(key, source))
    }

    /// Remove the structurally matching clause if present.
    ///
    /// Retracting an absent clause is not an error. Retracting against a
    /// primitive predicate is accepted and changes nothing.
    pub fn retract(&mut self, clause: &Clause) -> Result<(), DatabaseError> {
        let key = clause.head.predicate;
        let Some(predicate) = self.predicates.get_mut(&key) else {
            return Ok(());
        };
        let Some(store) = predicate.store_mut() else {
            debug!(predicate = %key, "ignoring retract on primitive predicate");
            return Ok(());
        };

        debug!(predicate = %key, clause = %clause, "retracting clause");
        store
            .delete(&clause.id())
            .map_err(|source| inconsistency(key, source))?;
        let remaining = store.size().map_err(|source| inconsistency(key, source))?;

        if remaining == 0 {
            debug!(predicate = %key, "removing empty predicate");
            self.predicates.remove(&key);
        }
        Ok(())
    }

    pub fn predicate(&self, key: &PredicateKey) -> Option<&Predicate<S>> {
        self.predicates.get(key)
    }

    pub fn contains_predicate(&self, key: &PredicateKey) -> bool {
        self.predicates.contains(key)
    }

    /// Number of predicates in the table, primitives included
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Predicate<S>> {
        self.predicates.iter()
    }

    /// Number of clauses stored for `key` (0 if the predicate is absent)
    pub fn clause_count(&self, key: &PredicateKey) -> StorageResult<usize> {
        match self.predicates.get(key) {
            Some(predicate) => predicate.clause_count(),
            None => Ok(0),
        }
    }

    /// Enumerate the clauses stored for `key`
    pub fn clauses(&self, key: &PredicateKey) -> StorageResult<Clauses<'_>> {
        match self.predicates.get(key) {
            Some(predicate) => predicate.clauses(),
            None => Ok(Box::new(std::iter::empty())),
        }
    }
}

fn inconsistency(predicate: PredicateKey, source: StorageError) -> DatabaseError {
    DatabaseError::InternalInconsistency { predicate, source }
}

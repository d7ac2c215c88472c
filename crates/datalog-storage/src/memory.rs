//! In-memory clause store implementation

use crate::engine::{ClauseStore, Clauses, StorageResult};
use datalog_ast::{Clause, ClauseId};
use std::collections::HashMap;

/// In-memory clause store
#[derive(Debug, Default, Clone)]
pub struct MemoryClauseStore {
    clauses: HashMap<ClauseId, Clause>,
}

impl MemoryClauseStore {
    /// Create a new empty in-memory clause store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClauseStore for MemoryClauseStore {
    fn insert(&mut self, id: ClauseId, clause: Clause) -> StorageResult<()> {
        self.clauses.insert(id, clause);
        Ok(())
    }

    fn delete(&mut self, id: &ClauseId) -> StorageResult<()> {
        self.clauses.remove(id);
        Ok(())
    }

    fn size(&self) -> StorageResult<usize> {
        Ok(self.clauses.len())
    }

    fn clauses(&self) -> StorageResult<Clauses<'_>> {
        Ok(Box::new(self.clauses.values()))
    }
}

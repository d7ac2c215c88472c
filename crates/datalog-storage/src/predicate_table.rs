//! Predicate interning
//!
//! Every literal refers to its predicate by [`PredicateKey`]. The table maps
//! each key to the single [`Predicate`] that owns its clauses, so clauses
//! built independently still share one clause set.

use crate::engine::{ClauseStore, Clauses, StorageResult};
use datalog_ast::{PredicateKey, Symbol};
use datalog_builtins::PrimitiveRef;
use std::collections::HashMap;

/// What answers for a predicate: stored clauses or a primitive
#[derive(Debug)]
pub enum Backing<S> {
    Clauses(S),
    Primitive(PrimitiveRef),
}

/// A named, fixed-arity relation
#[derive(Debug)]
pub struct Predicate<S> {
    key: PredicateKey,
    backing: Backing<S>,
}

impl<S: ClauseStore> Predicate<S> {
    fn empty(key: PredicateKey) -> Self {
        Predicate {
            key,
            backing: Backing::Clauses(S::default()),
        }
    }

    pub fn key(&self) -> PredicateKey {
        self.key
    }

    pub fn name(&self) -> Symbol {
        self.key.name
    }

    pub fn arity(&self) -> usize {
        self.key.arity
    }

    pub fn backing(&self) -> &Backing<S> {
        &self.backing
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.backing, Backing::Primitive(_))
    }

    pub fn primitive(&self) -> Option<&PrimitiveRef> {
        match &self.backing {
            Backing::Primitive(primitive) => Some(primitive),
            Backing::Clauses(_) => None,
        }
    }

    pub fn store(&self) -> Option<&S> {
        match &self.backing {
            Backing::Clauses(store) => Some(store),
            Backing::Primitive(_) => None,
        }
    }

    pub fn store_mut(&mut self) -> Option<&mut S> {
        match &mut self.backing {
            Backing::Clauses(store) => Some(store),
            Backing::Primitive(_) => None,
        }
    }

    /// Number of stored clauses (always 0 for primitives)
    pub fn clause_count(&self) -> StorageResult<usize> {
        match &self.backing {
            Backing::Clauses(store) => store.size(),
            Backing::Primitive(_) => Ok(0),
        }
    }

    /// Enumerate stored clauses (none for primitives)
    pub fn clauses(&self) -> StorageResult<Clauses<'_>> {
        match &self.backing {
            Backing::Clauses(store) => store.clauses(),
            Backing::Primitive(_) => Ok(Box::new(std::iter::empty())),
        }
    }
}

/// Table of predicates keyed by (name, arity)
#[derive(Debug)]
pub struct PredicateTable<S> {
    predicates: HashMap<PredicateKey, Predicate<S>>,
}

impl<S> Default for PredicateTable<S> {
    fn default() -> Self {
        PredicateTable {
            predicates: HashMap::new(),
        }
    }
}

impl<S: ClauseStore> PredicateTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the predicate for `key`, creating an empty one if needed
    pub fn intern(&mut self, key: PredicateKey) -> &mut Predicate<S> {
        self.predicates
            .entry(key)
            .or_insert_with(|| Predicate::empty(key))
    }

    /// Install a primitive under `key`, replacing whatever was there
    pub fn register_primitive(&mut self, key: PredicateKey, primitive: PrimitiveRef) {
        self.predicates.insert(
            key,
            Predicate {
                key,
                backing: Backing::Primitive(primitive),
            },
        );
    }

    pub fn get(&self, key: &PredicateKey) -> Option<&Predicate<S>> {
        self.predicates.get(key)
    }

    pub fn get_mut(&mut self, key: &PredicateKey) -> Option<&mut Predicate<S>> {
        self.predicates.get_mut(key)
    }

    /// Remove the entry if present
    pub fn remove(&mut self, key: &PredicateKey) -> Option<Predicate<S>> {
        self.predicates.remove(key)
    }

    pub fn contains(&self, key: &PredicateKey) -> bool {
        self.predicates.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate<S>> {
        self.predicates.values()
    }
}

//! Extensions: the working sets of ground tuples during evaluation
//!
//! A [`Relation`] keeps insertion order for stable output and a hash index
//! for duplicate detection.

use datalog_ast::{PredicateKey, Tuple};
use std::collections::{HashMap, HashSet};

/// Known ground tuples, keyed by predicate
pub type Extensions = HashMap<PredicateKey, Relation>;

/// A duplicate-free set of ground tuples
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relation {
    tuples: Vec<Tuple>,
    index: HashSet<Tuple>,
}

impl Relation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tuple, returning true if it was not already present
    pub fn insert(&mut self, tuple: Tuple) -> bool {
        if self.index.contains(&tuple) {
            return false;
        }
        self.index.insert(tuple.clone());
        self.tuples.push(tuple);
        true
    }

    pub fn contains(&self, tuple: &[datalog_ast::Value]) -> bool {
        self.index.contains(tuple)
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tuple> {
        self.tuples.iter()
    }

    pub fn into_tuples(self) -> Vec<Tuple> {
        self.tuples
    }
}

impl FromIterator<Tuple> for Relation {
    fn from_iter<I: IntoIterator<Item = Tuple>>(iter: I) -> Self {
        let mut relation = Relation::new();
        for tuple in iter {
            relation.insert(tuple);
        }
        relation
    }
}

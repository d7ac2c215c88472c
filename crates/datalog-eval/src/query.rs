//! Query results
//!
//! A [`QueryResult`] holds the distinct ground tuples of the query predicate
//! that match the query literal. Answers carry the full tuple of the
//! predicate, not a projection onto the query's variables.

use crate::relation::Relation;
use crate::substitution::Substitution;
use datalog_ast::{Literal, PredicateKey, Symbol, Tuple};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The answers to one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub name: Symbol,
    pub arity: usize,
    pub answers: Vec<Tuple>,
}

impl QueryResult {
    /// A result with no answers
    pub fn empty(predicate: PredicateKey) -> Self {
        QueryResult {
            name: predicate.name,
            arity: predicate.arity,
            answers: Vec::new(),
        }
    }

    /// Keep the tuples of `relation` that match the query pattern.
    ///
    /// Constants must be equal and repeated variables must agree.
    pub fn matching(query: &Literal, relation: &Relation) -> Self {
        let pattern = Substitution::new();
        let answers = relation
            .iter()
            .filter(|tuple| pattern.match_tuple(&query.terms, tuple).is_some())
            .cloned()
            .collect();
        QueryResult {
            name: query.predicate.name,
            arity: query.predicate.arity,
            answers,
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// One line per answer: `name(t1, t2).`, or `name.` for arity 0
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tuple in &self.answers {
            write!(f, "{}", self.name.as_str())?;
            if !tuple.is_empty() {
                let terms: Vec<String> = tuple.iter().map(|v| v.to_string()).collect();
                write!(f, "({})", terms.join(", "))?;
            }
            writeln!(f, ".")?;
        }
        Ok(())
    }
}

//! The slice of a database one query needs
//!
//! Starting from the query predicate, follow the body literals of every rule
//! of every reachable predicate. Only predicates reached this way can
//! contribute answers, so only their clauses are loaded.

use crate::evaluation::EvaluationError;
use crate::relation::Extensions;
use datalog_ast::{Clause, PredicateKey};
use datalog_builtins::PrimitiveRef;
use datalog_storage::{ClauseStore, Database};
use std::collections::{HashMap, HashSet};

/// Primitive predicates reachable from the query
pub type Primitives = HashMap<PredicateKey, PrimitiveRef>;

/// Rules, initial facts and primitives reachable from one predicate
#[derive(Debug)]
pub struct Program<'a> {
    pub reachable: HashSet<PredicateKey>,
    pub rules: Vec<&'a Clause>,
    pub facts: Extensions,
    pub primitives: Primitives,
}

impl<'a> Program<'a> {
    /// Compute the dependency closure of `root` over `db`
    pub fn collect<S: ClauseStore>(
        db: &'a Database<S>,
        root: PredicateKey,
    ) -> Result<Self, EvaluationError> {
        let mut program = Program {
            reachable: HashSet::from([root]),
            rules: Vec::new(),
            facts: Extensions::new(),
            primitives: Primitives::new(),
        };
        let mut pending = vec![root];

        while let Some(key) = pending.pop() {
            // Referenced but never interned: contributes nothing.
            let Some(predicate) = db.predicate(&key) else {
                continue;
            };

            if let Some(primitive) = predicate.primitive() {
                program.primitives.insert(key, primitive.clone());
                continue;
            }

            let clauses = predicate
                .clauses()
                .map_err(|source| EvaluationError::Storage {
                    predicate: key,
                    source,
                })?;

            for clause in clauses {
                if clause.is_fact() {
                    if let Some(tuple) = clause.head.to_tuple() {
                        program.facts.entry(key).or_default().insert(tuple);
                    }
                    continue;
                }

                for literal in &clause.body {
                    if program.reachable.insert(literal.predicate) {
                        pending.push(literal.predicate);
                    }
                }
                program.rules.push(clause);
            }
        }

        Ok(program)
    }
}

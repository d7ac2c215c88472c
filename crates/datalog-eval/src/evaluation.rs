//! Datalog evaluation
//!
//! This module provides the entry points for answering a query. It uses
//! bottom-up fixpoint evaluation over the predicates the query depends on,
//! with semi-naive differencing by default.
//!
//! # Example
//!
//! ```ignore
//! use datalog_eval::ask;
//!
//! let result = ask(&db, &Literal::new("path", vec![Term::atom("a"), Term::variable("Y")]))?;
//! ```

use crate::grounding::{ground_rule, ground_rule_with_delta};
use crate::program::{Primitives, Program};
use crate::query::QueryResult;
use crate::relation::{Extensions, Relation};
use datalog_ast::{Clause, Literal, PredicateKey};
use datalog_storage::{ClauseStore, Database, StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// A clause store failed while its clauses were being read
    #[error("clause store for {predicate} failed during evaluation: {source}")]
    Storage {
        predicate: PredicateKey,
        #[source]
        source: StorageError,
    },
}

/// Fixpoint strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Only join against tuples that are new since the previous pass
    #[default]
    SemiNaive,
    /// Re-evaluate every rule against every tuple on each pass
    Naive,
}

/// Options controlling query evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    pub strategy: Strategy,
}

/// Statistics about evaluation performance
///
/// Used by `ask_instrumented` to provide insight into evaluation behavior.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvaluationStats {
    /// Number of fixed-point iterations performed
    pub iterations: usize,
    /// Total number of rule applications (rule evaluated once = 1 application)
    pub rule_applications: usize,
    /// Number of new facts derived (not counting duplicates)
    pub facts_derived: usize,
}

/// Answer a query with the default options.
///
/// An unknown predicate yields an empty result, not an error.
pub fn ask<S: ClauseStore>(
    db: &Database<S>,
    query: &Literal,
) -> Result<QueryResult, EvaluationError> {
    ask_with(db, query, &EvalOptions::default())
}

/// Answer a query with explicit options
pub fn ask_with<S: ClauseStore>(
    db: &Database<S>,
    query: &Literal,
    options: &EvalOptions,
) -> Result<QueryResult, EvaluationError> {
    ask_instrumented(db, query, options).map(|(result, _)| result)
}

/// Answer a query and report evaluation statistics.
///
/// This is identical to `ask_with()` but also returns `EvaluationStats`
/// with the iteration count, rule applications, and facts derived.
///
/// ```ignore
/// let (result, stats) = ask_instrumented(&db, &query, &EvalOptions::default())?;
/// println!("Iterations: {}, Facts derived: {}", stats.iterations, stats.facts_derived);
/// ```
pub fn ask_instrumented<S: ClauseStore>(
    db: &Database<S>,
    query: &Literal,
    options: &EvalOptions,
) -> Result<(QueryResult, EvaluationStats), EvaluationError> {
    debug!(query = %query, strategy = ?options.strategy, "evaluating query");

    let program = Program::collect(db, query.predicate)?;
    let Program {
        reachable,
        rules,
        facts,
        primitives,
    } = program;
    debug!(
        query = %query,
        predicates = reachable.len(),
        rules = rules.len(),
        "collected dependencies"
    );

    let result = if let Some(primitive) = primitives.get(&query.predicate) {
        let answers: Relation = primitive.solve(&query.terms).into_iter().collect();
        (QueryResult::matching(query, &answers), EvaluationStats::default())
    } else {
        let (extensions, stats) = match options.strategy {
            Strategy::SemiNaive => semi_naive_evaluate(&rules, &primitives, facts),
            Strategy::Naive => naive_evaluate(&rules, &primitives, facts),
        };
        let result = match extensions.get(&query.predicate) {
            Some(relation) => QueryResult::matching(query, relation),
            None => QueryResult::empty(query.predicate),
        };
        (result, stats)
    };

    debug!(
        query = %query,
        answers = result.0.answers.len(),
        iterations = result.1.iterations,
        "query answered"
    );
    Ok(result)
}

/// Fixed-point evaluation with semi-naive differencing.
///
/// The first pass grounds every rule against all known tuples. After that, a
/// rule is re-grounded once per body position whose predicate gained tuples
/// in the previous pass, with that position reading only those new tuples.
fn semi_naive_evaluate(
    rules: &[&Clause],
    primitives: &Primitives,
    initial_facts: Extensions,
) -> (Extensions, EvaluationStats) {
    let mut full = initial_facts;
    let mut delta = Extensions::new();
    let mut first_iteration = true;
    let mut stats = EvaluationStats::default();

    loop {
        let mut new_delta = Extensions::new();
        let derived_before = stats.facts_derived;
        stats.iterations += 1;

        for rule in rules {
            let mut derived = Vec::new();
            if first_iteration {
                stats.rule_applications += 1;
                derived = ground_rule(rule, &full, primitives);
            } else {
                for (position, literal) in rule.body.iter().enumerate() {
                    if delta.get(&literal.predicate).is_some_and(|r| !r.is_empty()) {
                        stats.rule_applications += 1;
                        derived.extend(ground_rule_with_delta(
                            rule, position, &delta, &full, primitives,
                        ));
                    }
                }
            }

            let head = rule.head.predicate;
            for tuple in derived {
                if full.entry(head).or_default().insert(tuple.clone()) {
                    // Only truly new tuples go into the next iteration's delta
                    new_delta.entry(head).or_default().insert(tuple);
                    stats.facts_derived += 1;
                }
            }
        }

        trace!(
            iteration = stats.iterations,
            new_facts = stats.facts_derived - derived_before,
            "semi-naive pass"
        );
        first_iteration = false;

        // Fixed point reached when no new facts are derived
        if new_delta.is_empty() {
            break;
        }
        delta = new_delta;
    }

    (full, stats)
}

/// Naive evaluation: repeatedly apply all rules until fixed point.
///
/// Re-grounds every rule against all tuples on each pass. Produces the same
/// extensions as `semi_naive_evaluate`, with more redundant work.
fn naive_evaluate(
    rules: &[&Clause],
    primitives: &Primitives,
    initial_facts: Extensions,
) -> (Extensions, EvaluationStats) {
    let mut full = initial_facts;
    let mut stats = EvaluationStats::default();
    let mut changed = true;

    while changed {
        changed = false;
        stats.iterations += 1;

        for rule in rules {
            stats.rule_applications += 1;
            let head = rule.head.predicate;
            for tuple in ground_rule(rule, &full, primitives) {
                if full.entry(head).or_default().insert(tuple) {
                    changed = true;
                    stats.facts_derived += 1;
                }
            }
        }

        trace!(iteration = stats.iterations, "naive pass");
    }

    (full, stats)
}

//! Safety checking for Datalog clauses
//!
//! This module checks that all variables in a clause head are "safe" - i.e.,
//! they also appear in some body literal. This bounds what a clause can
//! derive to the constants already reachable through its body.
//!
//! # Safety Rules
//!
//! A clause is safe if every variable in the head occurs in at least one body
//! literal. A fact (empty body) is therefore safe only when its head is ground.
//! The anonymous variable `_` never binds, so it does not count as a body
//! occurrence, and in the head it is always unsafe.
//!
//! # Example
//!
//! ```ignore
//! // Safe: ancestor(X, Y) :- parent(X, Y).
//! // Safe: parent(john, mary).
//! // Unsafe: p(X).
//! // Unsafe: p(X, Y) :- q(X).
//! ```

use datalog_ast::{Clause, Symbol, ANONYMOUS};
use std::collections::HashSet;
use thiserror::Error;

/// Error indicating a clause is unsafe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafetyError {
    /// Head variables that no body literal binds
    #[error("unsafe clause '{clause}': head variables {} do not appear in the body", format_vars(.variables))]
    UnboundHeadVariables {
        clause: String,
        variables: Vec<Symbol>,
    },
}

/// Check if a clause is safe
pub fn is_safe(clause: &Clause) -> bool {
    check_clause_safety(clause).is_ok()
}

/// Check if a clause is safe, reporting the offending head variables
pub fn check_clause_safety(clause: &Clause) -> Result<(), SafetyError> {
    let body_vars: HashSet<Symbol> = clause
        .body
        .iter()
        .flat_map(|literal| literal.variables())
        .filter(|v| v.as_str() != ANONYMOUS)
        .collect();

    let mut unbound: Vec<Symbol> = Vec::new();
    for var in clause.head.variables() {
        if !body_vars.contains(&var) && !unbound.contains(&var) {
            unbound.push(var);
        }
    }

    if unbound.is_empty() {
        Ok(())
    } else {
        Err(SafetyError::UnboundHeadVariables {
            clause: clause.to_string(),
            variables: unbound,
        })
    }
}

fn format_vars(vars: &[Symbol]) -> String {
    vars.iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

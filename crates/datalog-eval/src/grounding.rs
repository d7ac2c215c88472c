//! Rule grounding - deriving head tuples from rule bodies
//!
//! A body is evaluated left to right as a chain of joins: start from one empty
//! substitution, and for each literal extend every surviving substitution with
//! each compatible tuple of that literal's predicate.
//!
//! # Key Functions
//!
//! - `ground_rule`: All head tuples a rule derives from the full extensions
//! - `ground_rule_with_delta`: Same, with one body position reading the delta
//! - `satisfy_body`: All substitutions that satisfy a rule body
//!
//! # Example
//!
//! ```ignore
//! // Given rule: grandparent(X, Z) :- parent(X, Y), parent(Y, Z)
//! // And facts: parent(tom, bob), parent(bob, ann)
//! // Produces: (tom, ann)
//! let derived = ground_rule(&rule, &full, &primitives);
//! ```

use crate::program::Primitives;
use crate::relation::Extensions;
use crate::substitution::Substitution;
use datalog_ast::{Clause, Literal, Tuple};
use tracing::warn;

/// Ground a rule against the full extensions
pub fn ground_rule(rule: &Clause, full: &Extensions, primitives: &Primitives) -> Vec<Tuple> {
    instantiate_head(rule, satisfy_body(&rule.body, full, None, primitives))
}

/// Ground a rule with the body literal at `position` reading `delta`
/// instead of the full extensions
pub fn ground_rule_with_delta(
    rule: &Clause,
    position: usize,
    delta: &Extensions,
    full: &Extensions,
    primitives: &Primitives,
) -> Vec<Tuple> {
    instantiate_head(
        rule,
        satisfy_body(&rule.body, full, Some((position, delta)), primitives),
    )
}

fn instantiate_head(rule: &Clause, substitutions: Vec<Substitution>) -> Vec<Tuple> {
    // Safety guarantees every head variable is bound once the body is satisfied.
    substitutions
        .iter()
        .filter_map(|subst| subst.instantiate(&rule.head))
        .collect()
}

/// Find all substitutions that satisfy a conjunction of literals
pub fn satisfy_body(
    body: &[Literal],
    full: &Extensions,
    delta: Option<(usize, &Extensions)>,
    primitives: &Primitives,
) -> Vec<Substitution> {
    let mut substitutions = vec![Substitution::new()];

    for (index, literal) in body.iter().enumerate() {
        let mut extended = Vec::new();

        if let Some(primitive) = primitives.get(&literal.predicate) {
            for subst in &substitutions {
                let bound = subst.apply_terms(&literal.terms);
                for tuple in primitive.solve(&bound) {
                    if tuple.len() != literal.terms.len() {
                        warn!(
                            predicate = %literal.predicate,
                            returned = tuple.len(),
                            "primitive returned a tuple of the wrong arity"
                        );
                        continue;
                    }
                    if let Some(next) = subst.match_tuple(&literal.terms, &tuple) {
                        extended.push(next);
                    }
                }
            }
        } else {
            let source = match delta {
                Some((position, delta)) if position == index => delta,
                _ => full,
            };
            let Some(relation) = source.get(&literal.predicate) else {
                return Vec::new();
            };
            for subst in &substitutions {
                for tuple in relation.iter() {
                    if let Some(next) = subst.match_tuple(&literal.terms, tuple) {
                        extended.push(next);
                    }
                }
            }
        }

        if extended.is_empty() {
            return extended;
        }
        substitutions = extended;
    }

    substitutions
}

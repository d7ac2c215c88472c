//! Variable bindings and tuple matching
//!
//! Every tuple the engine handles is ground, so matching a literal against a
//! tuple is one-sided: constants must be equal, bound variables must agree,
//! and free variables take the tuple's value.
//!
//! # Example
//!
//! ```ignore
//! // Match parent(X, mary) against (john, mary)
//! // Result: X=john
//! let subst = Substitution::new().match_tuple(&pattern.terms, &tuple);
//! ```

use datalog_ast::{Literal, Symbol, Term, Tuple, Value, ANONYMOUS};
use std::collections::HashMap;

/// A substitution maps variables to constants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: HashMap<Symbol, Value>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable to a value
    pub fn bind(&mut self, var: Symbol, value: Value) {
        self.bindings.insert(var, value);
    }

    /// Get the binding for a variable
    pub fn get(&self, var: &Symbol) -> Option<&Value> {
        self.bindings.get(var)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Apply substitution to a term; unbound variables stay as they are
    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Variable(var) => match self.get(var) {
                Some(value) => Term::Constant(value.clone()),
                None => term.clone(),
            },
            Term::Constant(_) => term.clone(),
        }
    }

    /// Apply substitution to every term of a literal
    pub fn apply_terms(&self, terms: &[Term]) -> Vec<Term> {
        terms.iter().map(|t| self.apply(t)).collect()
    }

    /// Ground a literal into a tuple. Returns None if a variable is unbound
    pub fn instantiate(&self, literal: &Literal) -> Option<Tuple> {
        literal
            .terms
            .iter()
            .map(|term| match term {
                Term::Variable(var) => self.get(var).cloned(),
                Term::Constant(value) => Some(value.clone()),
            })
            .collect()
    }

    /// Extend this substitution so that `terms` matches `tuple`.
    ///
    /// Returns None on arity mismatch, a differing constant, or a variable
    /// (bound earlier or repeated within `terms`) that would need two values.
    /// The anonymous variable `_` matches anything and never binds.
    pub fn match_tuple(&self, terms: &[Term], tuple: &[Value]) -> Option<Substitution> {
        if terms.len() != tuple.len() {
            return None;
        }

        let mut extended = self.clone();
        for (term, value) in terms.iter().zip(tuple) {
            match term {
                Term::Constant(constant) => {
                    if constant != value {
                        return None;
                    }
                }
                Term::Variable(var) if var.as_str() == ANONYMOUS => {}
                Term::Variable(var) => match extended.get(var) {
                    Some(bound) if bound != value => return None,
                    Some(_) => {}
                    None => extended.bind(*var, value.clone()),
                },
            }
        }
        Some(extended)
    }
}

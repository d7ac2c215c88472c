//! Built-in (primitive) predicates
//!
//! A primitive predicate has no stored clauses. Instead, it is asked for the
//! ground tuples that satisfy it given a partially bound literal.
//!
//! # Supported Built-ins
//!
//! - **Equality**: `=`/2 (binds the free side when one side is bound)
//! - **Comparisons**: `!=`, `<`, `>`, `<=`, `>=` (filters, both sides bound)
//! - **Control**: `true`/0, `fail`/0
//!
//! # Usage
//!
//! Built-ins can appear in rule bodies:
//! ```ignore
//! // adult(P) :- age(P, A), >=(A, 18).
//! ```
//!
//! None of the standard built-ins produces a value that was not part of its
//! input, so they never grow the set of constants a program can derive.

use datalog_ast::{PredicateKey, Term, Tuple, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A predicate evaluated by code instead of stored clauses.
///
/// `solve` receives the literal's terms with every variable already bound by
/// the surrounding join replaced by its constant. It returns the ground tuples
/// satisfying the relation for that binding pattern. Implementations must be
/// pure and return a finite set; callers re-check each tuple against the
/// literal, so returning extra tuples is harmless.
pub trait Primitive: fmt::Debug + Send + Sync {
    fn solve(&self, terms: &[Term]) -> Vec<Tuple>;
}

/// Shared handle to a primitive implementation
pub type PrimitiveRef = Arc<dyn Primitive>;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompOp {
    Eq,  // =
    Neq, // !=
    Lt,  // <
    Gt,  // >
    Lte, // <=
    Gte, // >=
}

impl CompOp {
    /// The predicate name this operator is registered under
    pub fn symbol(self) -> &'static str {
        match self {
            CompOp::Eq => "=",
            CompOp::Neq => "!=",
            CompOp::Lt => "<",
            CompOp::Gt => ">",
            CompOp::Lte => "<=",
            CompOp::Gte => ">=",
        }
    }

    /// Evaluate the operator on two constants.
    /// Returns None if the values cannot be compared
    pub fn holds(self, left: &Value, right: &Value) -> Option<bool> {
        match self {
            CompOp::Eq => Some(left == right),
            CompOp::Neq => Some(left != right),
            CompOp::Lt => left.compare(right).map(|o| o == Ordering::Less),
            CompOp::Gt => left.compare(right).map(|o| o == Ordering::Greater),
            CompOp::Lte => left.compare(right).map(|o| o != Ordering::Greater),
            CompOp::Gte => left.compare(right).map(|o| o != Ordering::Less),
        }
    }
}

/// Binary comparison built-in: `<(X, Y)` and friends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub op: CompOp,
}

impl Primitive for Comparison {
    fn solve(&self, terms: &[Term]) -> Vec<Tuple> {
        let [left, right] = terms else {
            return vec![];
        };

        match (left.as_value(), right.as_value()) {
            (Some(l), Some(r)) => match self.op.holds(l, r) {
                Some(true) => vec![vec![l.clone(), r.clone()]],
                _ => vec![],
            },
            // Equality can bind the free side; other operators only filter.
            (Some(v), None) | (None, Some(v)) if self.op == CompOp::Eq => {
                vec![vec![v.clone(), v.clone()]]
            }
            _ => vec![],
        }
    }
}

/// `true`/0 succeeds once, `fail`/0 never succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    pub succeeds: bool,
}

impl Primitive for Constant {
    fn solve(&self, terms: &[Term]) -> Vec<Tuple> {
        if self.succeeds && terms.is_empty() {
            vec![Vec::new()]
        } else {
            vec![]
        }
    }
}

/// A primitive backed by a closure
pub struct FnPrimitive<F> {
    name: String,
    solve: F,
}

impl<F> FnPrimitive<F>
where
    F: Fn(&[Term]) -> Vec<Tuple> + Send + Sync,
{
    pub fn new(name: impl Into<String>, solve: F) -> Self {
        FnPrimitive {
            name: name.into(),
            solve,
        }
    }
}

impl<F> fmt::Debug for FnPrimitive<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPrimitive")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> Primitive for FnPrimitive<F>
where
    F: Fn(&[Term]) -> Vec<Tuple> + Send + Sync,
{
    fn solve(&self, terms: &[Term]) -> Vec<Tuple> {
        (self.solve)(terms)
    }
}

/// Registry of primitive predicates keyed by (name, arity)
#[derive(Debug, Clone, Default)]
pub struct PrimitiveSet {
    primitives: HashMap<PredicateKey, PrimitiveRef>,
}

impl PrimitiveSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The comparison and control built-ins
    pub fn standard() -> Self {
        let mut set = PrimitiveSet::new();
        for op in [
            CompOp::Eq,
            CompOp::Neq,
            CompOp::Lt,
            CompOp::Gt,
            CompOp::Lte,
            CompOp::Gte,
        ] {
            set.register(PredicateKey::new(op.symbol(), 2), Comparison { op });
        }
        set.register(PredicateKey::new("true", 0), Constant { succeeds: true });
        set.register(PredicateKey::new("fail", 0), Constant { succeeds: false });
        set
    }

    /// Register a primitive, replacing any previous one under the same key
    pub fn register(&mut self, key: PredicateKey, primitive: impl Primitive + 'static) {
        self.primitives.insert(key, Arc::new(primitive));
    }

    pub fn get(&self, key: &PredicateKey) -> Option<&PrimitiveRef> {
        self.primitives.get(key)
    }

    pub fn contains(&self, key: &PredicateKey) -> bool {
        self.primitives.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PredicateKey, &PrimitiveRef)> {
        self.primitives.iter()
    }
}

impl IntoIterator for PrimitiveSet {
    type Item = (PredicateKey, PrimitiveRef);
    type IntoIter = std::collections::hash_map::IntoIter<PredicateKey, PrimitiveRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.into_iter()
    }
}

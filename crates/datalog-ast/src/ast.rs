//! Data definitions for Datalog knowledge bases
//!
//! This module defines the vocabulary every other crate operates on.
//!
//! # Key Components
//!
//! - **Value**: Constant values (atoms, strings, integers, booleans)
//! - **Term**: Variables or constants
//! - **PredicateKey**: A predicate identified by (name, arity)
//! - **Literal**: Predicate applied to terms (e.g., `parent(john, mary)`)
//! - **Clause**: A head literal and an optional body; a fact when the body is empty
//! - **ClauseId**: Structural identity of a clause, used for deduplication
//!
//! # Syntax Examples
//!
//! - **Facts**: `parent(john, mary).`
//! - **Rules**: `ancestor(X, Z) :- parent(X, Y), ancestor(Y, Z).`

use internment::Intern;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Interned string for efficient storage and comparison
pub type Symbol = Intern<String>;

/// A ground row of values, one per argument position
pub type Tuple = Vec<Value>;

/// Name of the anonymous variable
pub const ANONYMOUS: &str = "_";

/// Intern a string as a [`Symbol`]
pub fn sym(name: impl Into<String>) -> Symbol {
    Intern::new(name.into())
}

/// Constant values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Atom (lowercase identifier used as a constant)
    Atom(Symbol),
    String(Symbol),
    Integer(i64),
    Boolean(bool),
}

/// A term is either a variable or a constant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// Variable, scoped to one clause. `_` is anonymous.
    Variable(Symbol),
    Constant(Value),
}

/// A predicate is identified by its name and arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateKey {
    pub name: Symbol,
    pub arity: usize,
}

/// A predicate applied to an ordered list of terms: `parent(john, mary)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: PredicateKey,
    pub terms: Vec<Term>,
}

/// A head literal justified by a (possibly empty) body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    pub head: Literal,
    pub body: Vec<Literal>,
}

/// Canonical structural identity of a clause.
///
/// Derived from predicate and term content only. Variables are numbered by
/// first occurrence, so alpha-variants of a clause share one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClauseId(String);

impl Value {
    /// Create an atom constant
    pub fn atom(name: impl Into<String>) -> Self {
        Value::Atom(sym(name))
    }

    /// Create a string constant
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(sym(text))
    }

    /// Compare two values of the same kind.
    ///
    /// Returns `None` when the values are of different kinds.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Atom(a), Value::Atom(b)) | (Value::String(a), Value::String(b)) => {
                Some(a.as_str().cmp(b.as_str()))
            }
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl Term {
    pub fn variable(name: impl Into<String>) -> Self {
        Term::Variable(sym(name))
    }

    pub fn atom(name: impl Into<String>) -> Self {
        Term::Constant(Value::atom(name))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Term::Constant(Value::string(text))
    }

    pub fn integer(n: i64) -> Self {
        Term::Constant(Value::Integer(n))
    }

    /// Check if this term is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Check if this is the anonymous variable `_`
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Term::Variable(v) if v.as_str() == ANONYMOUS)
    }

    /// Check if this term is ground (contains no variables)
    pub fn is_ground(&self) -> bool {
        matches!(self, Term::Constant(_))
    }

    /// The constant value, if this term is ground
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Term::Constant(value) => Some(value),
            Term::Variable(_) => None,
        }
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Constant(value)
    }
}

impl PredicateKey {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        PredicateKey {
            name: sym(name),
            arity,
        }
    }
}

impl Literal {
    /// Create a literal; the predicate arity is the number of terms
    pub fn new(predicate: impl Into<String>, terms: Vec<Term>) -> Self {
        Literal {
            predicate: PredicateKey::new(predicate, terms.len()),
            terms,
        }
    }

    /// Check if every term is a constant
    pub fn is_ground(&self) -> bool {
        self.terms.iter().all(Term::is_ground)
    }

    /// Named variables of this literal, in order of occurrence (may repeat)
    pub fn variables(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.terms.iter().filter_map(|term| match term {
            Term::Variable(v) => Some(*v),
            Term::Constant(_) => None,
        })
    }

    /// The ground tuple of this literal, if it has no variables
    pub fn to_tuple(&self) -> Option<Tuple> {
        self.terms
            .iter()
            .map(|term| term.as_value().cloned())
            .collect()
    }
}

impl Clause {
    pub fn new(head: Literal, body: Vec<Literal>) -> Self {
        Clause { head, body }
    }

    /// A clause with an empty body
    pub fn fact(head: Literal) -> Self {
        Clause {
            head,
            body: Vec::new(),
        }
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }

    /// Compute the structural identity of this clause
    pub fn id(&self) -> ClauseId {
        let mut vars = HashMap::new();
        let mut key = String::new();
        encode_literal(&self.head, &mut vars, &mut key);
        key.push_str(":-");
        for (i, literal) in self.body.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            encode_literal(literal, &mut vars, &mut key);
        }
        ClauseId(key)
    }
}

impl ClauseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn encode_literal(literal: &Literal, vars: &mut HashMap<Symbol, usize>, key: &mut String) {
    key.push_str(&format!(
        "{:?}/{}(",
        literal.predicate.name.as_str(),
        literal.predicate.arity
    ));
    for (i, term) in literal.terms.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        match term {
            Term::Variable(v) if v.as_str() == ANONYMOUS => key.push('_'),
            Term::Variable(v) => {
                let next = vars.len();
                let n = *vars.entry(*v).or_insert(next);
                key.push_str(&format!("V{}", n));
            }
            Term::Constant(Value::Atom(a)) => key.push_str(&format!("a{:?}", a.as_str())),
            Term::Constant(Value::String(s)) => key.push_str(&format!("s{:?}", s.as_str())),
            Term::Constant(Value::Integer(n)) => key.push_str(&format!("i{}", n)),
            Term::Constant(Value::Boolean(b)) => key.push_str(&format!("b{}", b)),
        }
    }
    key.push(')');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Atom(a) => write!(f, "{}", a.as_str()),
            Value::String(s) => write!(f, "{}", s.as_str()),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v.as_str()),
            Term::Constant(value) => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for PredicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name.as_str(), self.arity)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.predicate.name.as_str())?;
        if !self.terms.is_empty() {
            let terms: Vec<String> = self.terms.iter().map(|t| t.to_string()).collect();
            write!(f, "({})", terms.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.body.is_empty() {
            let body: Vec<String> = self.body.iter().map(|l| l.to_string()).collect();
            write!(f, " :- {}", body.join(", "))?;
        }
        write!(f, ".")
    }
}

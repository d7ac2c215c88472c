//! Shared helpers for building databases in tests

use datalog::{Clause, Literal, Term, Tuple, Value};
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness; safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn var(name: &str) -> Term {
    Term::variable(name)
}

pub fn atom(name: &str) -> Term {
    Term::atom(name)
}

pub fn lit(pred: &str, terms: Vec<Term>) -> Literal {
    Literal::new(pred, terms)
}

pub fn fact(pred: &str, args: &[&str]) -> Clause {
    Clause::fact(lit(pred, args.iter().map(|a| atom(a)).collect()))
}

pub fn rule(head: Literal, body: Vec<Literal>) -> Clause {
    Clause::new(head, body)
}

pub fn row(args: &[&str]) -> Tuple {
    args.iter().map(|a| Value::atom(*a)).collect()
}

/// Sort answers so results can be compared regardless of order
pub fn sorted(mut answers: Vec<Tuple>) -> Vec<Tuple> {
    answers.sort_by_key(|tuple| tuple.iter().map(|v| v.to_string()).collect::<Vec<_>>());
    answers
}

/// `path` as the transitive closure of `edge`
pub fn path_rules() -> Vec<Clause> {
    vec![
        rule(
            lit("path", vec![var("X"), var("Y")]),
            vec![lit("edge", vec![var("X"), var("Y")])],
        ),
        rule(
            lit("path", vec![var("X"), var("Z")]),
            vec![
                lit("edge", vec![var("X"), var("Y")]),
                lit("path", vec![var("Y"), var("Z")]),
            ],
        ),
    ]
}

//! Property-based tests for the engine using proptest
//!
//! These generate random edge sets and rule programs over a small domain and
//! check evaluation against a reference closure and against itself under
//! database growth and strategy changes.

use crate::support::*;
use datalog::{
    ask, ask_with, Clause, Database, EvalOptions, Literal, PredicateKey, Strategy as EvalStrategy,
    Term, Tuple,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

const NODES: &[&str] = &["a", "b", "c", "d", "e", "f"];

/// Generate a random edge between two domain nodes
fn edge_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0..NODES.len(), 0..NODES.len())
}

fn edges_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec(edge_strategy(), 0..12)
}

fn edge_fact((from, to): (usize, usize)) -> Clause {
    fact("edge", &[NODES[from], NODES[to]])
}

fn term_strategy() -> impl Strategy<Value = Term> {
    prop_oneof![
        prop::sample::select(vec!["X", "Y", "Z"]).prop_map(Term::variable),
        prop::sample::select(NODES.to_vec()).prop_map(Term::atom),
    ]
}

/// A random body literal over `edge/2` or `r/2`
fn body_literal_strategy() -> impl Strategy<Value = Literal> {
    (
        prop::sample::select(vec!["edge", "r"]),
        term_strategy(),
        term_strategy(),
    )
        .prop_map(|(pred, a, b)| Literal::new(pred, vec![a, b]))
}

/// A random rule defining `r/2`, safe by construction
fn rule_strategy() -> impl Strategy<Value = Clause> {
    prop::collection::vec(body_literal_strategy(), 1..4).prop_map(|body| {
        let bound: Vec<Term> = body
            .iter()
            .flat_map(|literal| literal.variables())
            .map(Term::Variable)
            .collect();
        // Head variables are drawn from the body, falling back to constants.
        let pick = |i: usize| {
            bound
                .get(i)
                .cloned()
                .unwrap_or_else(|| Term::atom(NODES[i % NODES.len()]))
        };
        Clause::new(Literal::new("r", vec![pick(0), pick(1)]), body)
    })
}

fn reference_closure(edges: &[(usize, usize)]) -> BTreeSet<(usize, usize)> {
    let mut reach: BTreeSet<(usize, usize)> = edges.iter().copied().collect();
    loop {
        let before = reach.len();
        let snapshot: Vec<_> = reach.iter().copied().collect();
        for (x, y) in snapshot {
            for &(y2, z) in edges {
                if y == y2 {
                    reach.insert((x, z));
                }
            }
        }
        if reach.len() == before {
            return reach;
        }
    }
}

fn answers(db: &Database, query: &Literal) -> HashSet<Tuple> {
    ask(db, query).unwrap().answers.into_iter().collect()
}

fn path_db(edges: &[(usize, usize)]) -> Database {
    let mut db = Database::new();
    for clause in path_rules() {
        db.assert(clause).unwrap();
    }
    for edge in edges {
        db.assert(edge_fact(*edge)).unwrap();
    }
    db
}

fn all_paths() -> Literal {
    lit("path", vec![var("X"), var("Y")])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn test_closure_matches_reference(edges in edges_strategy()) {
        let db = path_db(&edges);

        let expected: HashSet<Tuple> = reference_closure(&edges)
            .into_iter()
            .map(|(x, y)| row(&[NODES[x], NODES[y]]))
            .collect();

        prop_assert_eq!(answers(&db, &all_paths()), expected);
    }

    #[test]
    fn test_answers_are_duplicate_free(edges in edges_strategy()) {
        let db = path_db(&edges);
        let result = ask(&db, &all_paths()).unwrap();
        let distinct: HashSet<_> = result.answers.iter().cloned().collect();
        prop_assert_eq!(distinct.len(), result.answers.len());
    }

    #[test]
    fn test_monotonic_under_assert(
        edges in edges_strategy(),
        extra in edge_strategy(),
        rules in prop::collection::vec(rule_strategy(), 0..3),
    ) {
        let mut db = path_db(&edges);
        for rule in &rules {
            db.assert(rule.clone()).unwrap();
        }
        let query = lit("r", vec![var("X"), var("Y")]);
        let before_paths = answers(&db, &all_paths());
        let before_r = answers(&db, &query);

        db.assert(edge_fact(extra)).unwrap();

        prop_assert!(before_paths.is_subset(&answers(&db, &all_paths())));
        prop_assert!(before_r.is_subset(&answers(&db, &query)));
    }

    #[test]
    fn test_naive_and_semi_naive_agree(
        edges in edges_strategy(),
        rules in prop::collection::vec(rule_strategy(), 1..4),
    ) {
        let mut db = path_db(&edges);
        for rule in &rules {
            db.assert(rule.clone()).unwrap();
        }
        let query = lit("r", vec![var("X"), var("Y")]);
        let naive = EvalOptions { strategy: EvalStrategy::Naive };
        let semi = EvalOptions { strategy: EvalStrategy::SemiNaive };

        let naive_answers: HashSet<_> =
            ask_with(&db, &query, &naive).unwrap().answers.into_iter().collect();
        let semi_answers: HashSet<_> =
            ask_with(&db, &query, &semi).unwrap().answers.into_iter().collect();

        prop_assert_eq!(naive_answers, semi_answers);
    }

    #[test]
    fn test_duplicate_asserts_are_idempotent(edges in edges_strategy()) {
        let once = path_db(&edges);
        let mut twice = path_db(&edges);
        for edge in &edges {
            twice.assert(edge_fact(*edge)).unwrap();
        }

        let key = PredicateKey::new("edge", 2);
        prop_assert_eq!(
            once.clause_count(&key).unwrap(),
            twice.clause_count(&key).unwrap()
        );
        prop_assert_eq!(answers(&once, &all_paths()), answers(&twice, &all_paths()));
    }

    #[test]
    fn test_assert_retract_round_trip(edges in edges_strategy(), extra in edge_strategy()) {
        let mut db = path_db(&edges);
        let key = PredicateKey::new("edge", 2);
        let already_present = edges.contains(&extra);
        let count_before = db.clause_count(&key).unwrap();

        db.assert(edge_fact(extra)).unwrap();
        db.retract(&edge_fact(extra)).unwrap();

        if already_present {
            // The retract also removed the copy asserted earlier.
            prop_assert_eq!(db.clause_count(&key).unwrap(), count_before - 1);
        } else if count_before == 0 {
            prop_assert!(!db.contains_predicate(&key));
        } else {
            prop_assert_eq!(db.clause_count(&key).unwrap(), count_before);
        }
    }

    #[test]
    fn test_generated_rules_are_safe(rule in rule_strategy()) {
        prop_assert!(datalog::is_safe(&rule));
    }
}

//! Deterministic simulation of assert/retract workloads
//!
//! Random command sequences are applied to a database and, in lockstep, to
//! a plain set of edges. After every step the database must agree with the
//! model on both the stored facts and their transitive closure.

use crate::support::*;
use datalog::{ask, Database, PredicateKey, Tuple};
use std::collections::{BTreeSet, HashSet};

/// A deterministic random number generator for simulation
struct SimRng {
    seed: u64,
}

impl SimRng {
    fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn next(&mut self) -> u64 {
        // Simple LCG PRNG
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.seed
    }

    fn next_range(&mut self, max: u64) -> u64 {
        (self.next() >> 33) % max
    }
}

const NODES: &[&str] = &["a", "b", "c", "d", "e"];

#[derive(Debug, Clone, Copy)]
enum SimOp {
    Assert(usize, usize),
    Retract(usize, usize),
}

fn generate_operations(rng: &mut SimRng, num_ops: usize) -> Vec<SimOp> {
    let nodes = NODES.len() as u64;
    (0..num_ops)
        .map(|_| {
            let from = rng.next_range(nodes) as usize;
            let to = rng.next_range(nodes) as usize;
            // Bias towards asserts so the graph grows.
            if rng.next_range(3) == 0 {
                SimOp::Retract(from, to)
            } else {
                SimOp::Assert(from, to)
            }
        })
        .collect()
}

/// Reference transitive closure over the model's edges
fn closure(edges: &HashSet<(usize, usize)>) -> BTreeSet<(usize, usize)> {
    let mut reach: BTreeSet<(usize, usize)> = edges.iter().copied().collect();
    loop {
        let mut added = Vec::new();
        for &(x, y) in &reach {
            for &(y2, z) in edges {
                if y == y2 && !reach.contains(&(x, z)) {
                    added.push((x, z));
                }
            }
        }
        if added.is_empty() {
            return reach;
        }
        reach.extend(added);
    }
}

fn as_pairs(answers: Vec<Tuple>) -> BTreeSet<(usize, usize)> {
    answers
        .iter()
        .map(|tuple| {
            let index = |i: usize| {
                NODES
                    .iter()
                    .position(|n| tuple[i].to_string() == *n)
                    .unwrap()
            };
            (index(0), index(1))
        })
        .collect()
}

fn run_simulation(seed: u64, num_ops: usize) {
    let mut rng = SimRng::new(seed);
    let ops = generate_operations(&mut rng, num_ops);
    let mut db = Database::new();
    for clause in path_rules() {
        db.assert(clause).unwrap();
    }
    let mut model = HashSet::new();
    let edge_key = PredicateKey::new("edge", 2);

    for (step, op) in ops.iter().enumerate() {
        match *op {
            SimOp::Assert(from, to) => {
                db.assert(fact("edge", &[NODES[from], NODES[to]])).unwrap();
                model.insert((from, to));
            }
            SimOp::Retract(from, to) => {
                db.retract(&fact("edge", &[NODES[from], NODES[to]])).unwrap();
                model.remove(&(from, to));
            }
        }

        assert_eq!(
            db.clause_count(&edge_key).unwrap(),
            model.len(),
            "seed {seed} step {step}: clause count diverged after {op:?}"
        );
        assert_eq!(
            db.contains_predicate(&edge_key),
            !model.is_empty(),
            "seed {seed} step {step}: predicate collection diverged after {op:?}"
        );

        let paths = ask(&db, &lit("path", vec![var("X"), var("Y")])).unwrap();
        assert_eq!(
            as_pairs(paths.answers),
            closure(&model),
            "seed {seed} step {step}: closure diverged after {op:?}"
        );
    }

    tracing::debug!(seed, edges = model.len(), "simulation finished");
}

#[test]
fn test_simulation_small_workloads() {
    init_tracing();
    for seed in 0..20 {
        run_simulation(seed, 15);
    }
}

#[test]
fn test_simulation_long_workload() {
    init_tracing();
    run_simulation(0xDA7A_106, 120);
}

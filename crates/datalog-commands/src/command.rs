//! Commands and their application to a database
//!
//! A command names predicates by (name, terms) instead of holding live
//! predicate references, so the same command list can be applied to any
//! database. Applying a command interns every literal it mentions, then
//! dispatches to `Database::assert`, `Database::retract` or the query engine.

use datalog_ast::{sym, Clause, Literal, Symbol, Term};
use datalog_eval::{ask_with, EvalOptions, EvaluationError, QueryResult};
use datalog_storage::{ClauseStore, Database, DatabaseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A literal not yet bound to any database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralTemplate {
    pub predicate: Symbol,
    pub terms: Vec<Term>,
}

impl LiteralTemplate {
    pub fn new(predicate: impl Into<String>, terms: Vec<Term>) -> Self {
        LiteralTemplate {
            predicate: sym(predicate),
            terms,
        }
    }

    /// Intern the predicate in `db` and build the literal
    pub fn resolve<S: ClauseStore>(&self, db: &mut Database<S>) -> Literal {
        Literal {
            predicate: db.new_predicate(self.predicate.as_str(), self.terms.len()),
            terms: self.terms.clone(),
        }
    }
}

/// A command to mutate or query a database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    Assert {
        head: LiteralTemplate,
        #[serde(default)]
        body: Vec<LiteralTemplate>,
    },
    Query {
        head: LiteralTemplate,
    },
    Retract {
        head: LiteralTemplate,
        #[serde(default)]
        body: Vec<LiteralTemplate>,
    },
}

impl Command {
    /// Assert a fact: `head.`
    pub fn fact(head: LiteralTemplate) -> Self {
        Command::Assert {
            head,
            body: Vec::new(),
        }
    }

    /// Assert a rule: `head :- body.`
    pub fn rule(head: LiteralTemplate, body: Vec<LiteralTemplate>) -> Self {
        Command::Assert { head, body }
    }

    pub fn query(head: LiteralTemplate) -> Self {
        Command::Query { head }
    }

    pub fn retract(head: LiteralTemplate, body: Vec<LiteralTemplate>) -> Self {
        Command::Retract { head, body }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Command::Assert { .. } => "assert",
            Command::Query { .. } => "query",
            Command::Retract { .. } => "retract",
        }
    }
}

/// Error from applying a single command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// A command list stopped at the first failing command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command {index} failed after {} result(s): {error}", .results.len())]
pub struct ApplyError {
    /// Position of the failing command
    pub index: usize,
    /// Query results produced before the failure, in command order
    pub results: Vec<QueryResult>,
    #[source]
    pub error: CommandError,
}

/// Apply one command with default evaluation options
pub fn apply<S: ClauseStore>(
    cmd: &Command,
    db: &mut Database<S>,
) -> Result<Option<QueryResult>, CommandError> {
    apply_with(cmd, db, &EvalOptions::default())
}

/// Apply one command. Only queries produce a result.
pub fn apply_with<S: ClauseStore>(
    cmd: &Command,
    db: &mut Database<S>,
    options: &EvalOptions,
) -> Result<Option<QueryResult>, CommandError> {
    match cmd {
        Command::Assert { head, body } => {
            let clause = build_clause(head, body, db);
            db.assert(clause)?;
            Ok(None)
        }
        Command::Query { head } => {
            let query = head.resolve(db);
            Ok(Some(ask_with(db, &query, options)?))
        }
        Command::Retract { head, body } => {
            let clause = build_clause(head, body, db);
            db.retract(&clause)?;
            Ok(None)
        }
    }
}

/// Apply commands in order with default evaluation options
pub fn apply_all<S: ClauseStore>(
    cmds: &[Command],
    db: &mut Database<S>,
) -> Result<Vec<QueryResult>, ApplyError> {
    apply_all_with(cmds, db, &EvalOptions::default())
}

/// Apply commands in order, accumulating query results.
///
/// Stops at the first failing command; the error carries the results
/// gathered up to that point.
pub fn apply_all_with<S: ClauseStore>(
    cmds: &[Command],
    db: &mut Database<S>,
    options: &EvalOptions,
) -> Result<Vec<QueryResult>, ApplyError> {
    let mut results = Vec::new();

    for (index, cmd) in cmds.iter().enumerate() {
        debug!(index, kind = cmd.kind(), "applying command");
        match apply_with(cmd, db, options) {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {}
            Err(error) => {
                debug!(index, error = %error, "command failed, stopping");
                return Err(ApplyError {
                    index,
                    results,
                    error,
                });
            }
        }
    }

    Ok(results)
}

fn build_clause<S: ClauseStore>(
    head: &LiteralTemplate,
    body: &[LiteralTemplate],
    db: &mut Database<S>,
) -> Clause {
    let head = head.resolve(db);
    let body = body.iter().map(|template| template.resolve(db)).collect();
    Clause::new(head, body)
}

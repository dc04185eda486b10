/*!
The context --- to which constraints are added and within which solves and optimisation take
place.

A [Context] bundles a [clause store](crate::db::clause::ClauseDb), a variable counter, a
sticky infeasibility flag, and a solver [backend](crate::backends::SolveBackend).
Constraints are built through the connective methods and committed
with [require](Context::require) / [prevent](Context::prevent); models are requested with
[solve](Context::solve) or, with an objective, [minimize](Context::minimize).

# State

The clause store supports an explicit stack discipline: [save_state](Context::save_state)
marks the current end and [restore_state](Context::restore_state) discards everything appended
since the mark.
Marks may be nested; restoring to an older mark discards any newer ones.

The variable counter is *not* restored --- a caller who rolls back clauses is responsible for
dropping its own references to variables allocated after the mark.
The optimiser relies on exactly this split when it backs out speculative bounds.

# Example

```rust
# use clausal::{config::Config, context::Context};
let mut ctx = Context::from_config(Config::default()).unwrap();

let p = ctx.fresh_var();
let q = ctx.fresh_var();
ctx.add_clause(vec![p, q]);

let saved = ctx.save_state();
ctx.add_clause(vec![-p]);
ctx.add_clause(vec![-q]);
assert!(ctx.solve().unwrap().is_none());

ctx.restore_state(saved);
assert!(ctx.solve().unwrap().is_some());
```
*/

mod combinators;
mod linear;
mod minimize;

pub use linear::lb_preprocess;

use crate::{
    backends::{self, SolveBackend},
    config::Config,
    db::clause::{ClauseDb, StateToken},
    misc::log::targets,
    structures::{
        clause::Clause,
        literal::{Literal, FALSE, TRUE},
    },
    types::err::{BackendError, ConfigError},
};

/// The context in which constraints are built and solved.
pub struct Context {
    /// The configuration the context was built from.
    pub config: Config,

    /// The clause store.
    clause_db: ClauseDb,

    /// The bound solver backend.
    backend: Box<dyn SolveBackend>,

    /// The highest allocated variable.
    m: Literal,

    /// Whether a constraint has already collapsed to a contradiction.
    ///
    /// Sticky: once set, solves return no solution without consulting the backend.
    unsat: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("m", &self.m)
            .field("unsat", &self.unsat)
            .finish()
    }
}

impl Context {
    /// Creates a context from some given configuration.
    ///
    /// Fails when the configured backend name is not compiled into this build.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let backend = backends::backend_from_name(&config.backend)?;
        Ok(Self::with_backend(backend, config))
    }

    /// Creates a context around a caller-supplied backend.
    ///
    /// The configured backend name is ignored; everything else applies as usual.
    pub fn with_backend(backend: Box<dyn SolveBackend>, config: Config) -> Self {
        Context {
            clause_db: ClauseDb::new(config.storage),
            backend,
            m: config.initial_vars,
            unsat: false,
            config,
        }
    }

    /// Allocates a fresh variable, as a positive literal.
    pub fn fresh_var(&mut self) -> Literal {
        self.m += 1;
        self.m
    }

    /// The highest allocated variable.
    pub fn var_count(&self) -> Literal {
        self.m
    }

    /// Whether a constraint has already collapsed to a contradiction.
    pub fn is_unsat(&self) -> bool {
        self.unsat
    }

    /// Appends a clause to the store.
    pub fn add_clause(&mut self, clause: Clause) {
        self.clause_db.append(clause);
    }

    /// Appends each clause of an iterator to the store.
    pub fn add_clauses<I: IntoIterator<Item = Clause>>(&mut self, clauses: I) {
        self.clause_db.extend(clauses);
    }

    /// The number of stored clauses.
    pub fn clause_count(&self) -> usize {
        self.clause_db.clause_count()
    }

    /// The stored clauses, materialised.
    pub fn clauses(&self) -> Vec<Clause> {
        self.clause_db.to_vecs()
    }

    /// Read access to the clause store.
    pub fn clause_db(&self) -> &ClauseDb {
        &self.clause_db
    }

    /// A mark for the current end of the clause store.
    ///
    /// The variable counter is not part of the mark; see the module documentation.
    pub fn save_state(&self) -> StateToken {
        self.clause_db.save_state()
    }

    /// Discards every clause appended since a mark.
    pub fn restore_state(&mut self, token: StateToken) {
        self.clause_db.restore_state(token);
    }

    /// Searches for a model of the current clause set.
    ///
    /// Returns `Ok(None)` when the clauses are unsatisfiable.
    pub fn solve(&mut self) -> Result<Option<Vec<Literal>>, BackendError> {
        self.solve_with(&[], false, 0)
    }

    /// Searches for a model of the current clause set plus `additional` clauses.
    ///
    /// The additional clauses are first simplified: constant-false literals are dropped, a
    /// clause containing constant true is discarded as satisfied, and a clause emptied by the
    /// simplification makes the whole query infeasible without touching the store.
    ///
    /// The simplified clauses are appended for the duration of the call.
    /// They are kept afterwards only when a model was found *and* `include_if` is set,
    /// giving probe and commit semantics in a single call; with no additional clauses
    /// `include_if` has no effect.
    ///
    /// A nonzero `limit` caps backend search effort where supported; an exceeded budget
    /// reads as no model.
    pub fn solve_with(
        &mut self,
        additional: &[Clause],
        include_if: bool,
        limit: usize,
    ) -> Result<Option<Vec<Literal>>, BackendError> {
        if self.unsat {
            return Ok(None);
        }
        if self.m == 0 {
            return Ok(Some(Vec::new()));
        }

        let mut extra: Vec<Clause> = Vec::with_capacity(additional.len());
        for clause in additional {
            let mut kept = Vec::with_capacity(clause.len());
            let mut satisfied = false;
            for &literal in clause {
                if literal == FALSE {
                    continue;
                }
                if literal == TRUE {
                    satisfied = true;
                    break;
                }
                kept.push(literal);
            }
            if satisfied {
                continue;
            }
            if kept.is_empty() {
                return Ok(None);
            }
            extra.push(kept);
        }

        let added = !extra.is_empty();
        let saved = self.clause_db.save_state();
        if added {
            self.clause_db.extend(extra);
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                target: targets::SOLVE,
                "invoking sat backend with {} clauses over {} variables",
                self.clause_count(),
                self.m,
            );
        }

        match self.backend.solve(&self.clause_db, self.m, limit) {
            Ok(solution) => {
                if added && (solution.is_none() || !include_if) {
                    self.clause_db.restore_state(saved);
                }
                Ok(solution)
            }
            Err(e) => {
                if added {
                    self.clause_db.restore_state(saved);
                }
                Err(e)
            }
        }
    }
}

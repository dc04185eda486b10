/*!
A uniform interface over external SAT solvers.

The context never searches for models itself --- on each [solve](crate::context::Context::solve)
it hands its clause store and variable count to a [SolveBackend] and reads back either a model
(every variable as a signed literal) or the absence of one.

Concrete backends are compiled in behind cargo features, one module per solver, and chosen by
name at construction via [backend_from_name]; see [Config](crate::config::Config).
A backend which cannot be produced is a configuration error raised before any clause is built.
Runtime failures are reported per call and leave the caller's state untouched: a backend is
given the clause store read-only and must not retain or mutate it.

The `limit` argument caps search effort where a solver supports budgets; a backend with no
budget hook ignores it, and an exceeded budget is reported as the absence of a model rather
than an error.
*/

#[cfg(feature = "splr")]
mod splr;
#[cfg(feature = "splr")]
pub use self::splr::SplrBackend;

#[cfg(feature = "varisat")]
mod varisat;
#[cfg(feature = "varisat")]
pub use self::varisat::VarisatBackend;

use crate::{
    db::clause::ClauseDb,
    structures::literal::Literal,
    types::err::{BackendError, ConfigError},
};

/// An external solver able to decide a clause store.
pub trait SolveBackend {
    /// Searches for a model of the stored clauses over variables `1..=var_count`.
    ///
    /// Returns `Ok(Some(model))` with one signed literal per variable, `Ok(None)` when the
    /// clauses are unsatisfiable or the effort budget was exceeded, and an error only for
    /// internal solver failures.
    fn solve(
        &mut self,
        clauses: &ClauseDb,
        var_count: Literal,
        limit: usize,
    ) -> Result<Option<Vec<Literal>>, BackendError>;
}

/// The backend bound when a [Config](crate::config::Config) is left at its default.
#[cfg(feature = "splr")]
pub const DEFAULT_BACKEND: &str = "splr";

/// The backend bound when a [Config](crate::config::Config) is left at its default.
#[cfg(all(feature = "varisat", not(feature = "splr")))]
pub const DEFAULT_BACKEND: &str = "varisat";

/// The backend bound when a [Config](crate::config::Config) is left at its default.
#[cfg(not(any(feature = "splr", feature = "varisat")))]
pub const DEFAULT_BACKEND: &str = "";

/// The backend names recognised by this build.
pub fn available_backends() -> &'static [&'static str] {
    &[
        #[cfg(feature = "splr")]
        "splr",
        #[cfg(feature = "varisat")]
        "varisat",
    ]
}

/// Produces the backend registered under a name.
pub fn backend_from_name(name: &str) -> Result<Box<dyn SolveBackend>, ConfigError> {
    match name {
        #[cfg(feature = "splr")]
        "splr" => Ok(Box::new(SplrBackend)),

        #[cfg(feature = "varisat")]
        "varisat" => Ok(Box::new(VarisatBackend)),

        "" => Err(ConfigError::NoBackend),

        _ => Err(ConfigError::UnknownBackend(name.to_owned())),
    }
}

/// Extends a model with negated literals for variables the solver never saw.
///
/// Solvers size their models by the variables mentioned in the clauses; the context promises
/// callers a value for every allocated variable.
#[allow(dead_code)]
fn pad_model(mut model: Vec<Literal>, var_count: Literal) -> Vec<Literal> {
    let seen = model.iter().map(|l| l.abs()).max().unwrap_or(0);
    model.extend((seen + 1..=var_count).map(|v| -v));
    model
}

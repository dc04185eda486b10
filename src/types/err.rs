/*!
Error types used in the library.

Two kinds of failure are surfaced:

- [ConfigError] at [context](crate::context::Context) construction, when the requested solver
  backend cannot be produced.
  Nothing is built and nothing needs unwinding.
- [BackendError] from a solve, when the backend itself fails (memory, internal limits).
  The context remains usable and its clause store is left exactly as it was before the call.

Infeasibility is not an error: an unsatisfiable formula is reported as the absence of a
solution (`Ok(None)`).
Misuse of the state stack (restoring to a discarded mark, mismatched nesting) is caught by
debug assertions rather than error values.
*/

use thiserror::Error;

/// An error when constructing a context.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The named backend is not compiled into this build.
    #[error("unknown sat backend '{0}'")]
    UnknownBackend(String),

    /// No backend is compiled into this build at all.
    #[error("no sat backend was compiled into this build")]
    NoBackend,
}

/// A runtime failure inside a solver backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend reported an internal error.
    #[error("sat backend failure: {0}")]
    Failure(String),
}

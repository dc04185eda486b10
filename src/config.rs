/*!
Configuration of a context.

A configuration is read once, when the context is built.
The backend is named rather than typed so a deployment can switch solvers through
configuration alone; [available_backends](crate::backends::available_backends) lists the names
recognised by this build.
*/

use crate::{
    backends::DEFAULT_BACKEND,
    db::clause::Storage,
    structures::literal::Literal,
};

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The name of the solver backend to bind at construction.
    pub backend: String,

    /// The storage layout of the clause store.
    pub storage: Storage,

    /// How many variables are considered allocated before the first
    /// [fresh_var](crate::context::Context::fresh_var) call.
    ///
    /// Useful when the caller has already numbered its variables.
    pub initial_vars: Literal,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: DEFAULT_BACKEND.to_owned(),
            storage: Storage::List,
            initial_vars: 0,
        }
    }
}

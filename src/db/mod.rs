//! Databases owned by a context.
//!
//! For the moment this is the clause store alone --- valuations live entirely in the backend.

pub mod clause;

pub use clause::{ClauseDb, StateToken, Storage};

//! The abstract elements of a formula: literals, clauses, and deferred encodings.

pub mod clause;
pub mod encoding;
pub mod literal;

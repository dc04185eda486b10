//! Clauses are non-empty sequences of literals, read as disjunctions.
//!
//! A formula is a conjunction of clauses.
//! The order of literals within a clause has no logical significance, though stored clause
//! order is preserved to keep state rollback cheap (see [ClauseDb](crate::db::clause::ClauseDb)).

use crate::structures::literal::Literal;

/// A disjunction of literals.
pub type Clause = Vec<Literal>;

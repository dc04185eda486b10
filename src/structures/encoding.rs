//! The result of evaluating a connective.
//!
//! A connective either collapses to a literal --- a constant, an operand, or a fresh variable
//! when clauses were emitted eagerly --- or defers its clauses until the caller decides how the
//! value will be used.
//!
//! A deferred value carries two clause sets.
//! `pos` holds the clauses to emit if the value is required true, `neg` the clauses to emit if
//! it is required false.
//! Emitting one set constrains the formula in that direction only; binding both sets to a
//! fresh variable through [assign](crate::context::Context::assign) produces a literal
//! equivalent to the connective.
//! A set may be empty when the requested [Polarity](crate::structures::literal::Polarity)
//! excluded it.

use crate::structures::{clause::Clause, literal::Literal};

/// A literal, or clauses deferred until the required polarity is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// The connective collapsed to a literal.
    Lit(Literal),

    /// Clauses for each direction of use.
    Deferred {
        /// Clauses active when the value is required true.
        pos: Vec<Clause>,
        /// Clauses active when the value is required false.
        neg: Vec<Clause>,
    },
}

impl Encoding {
    /// The literal, if the connective collapsed to one.
    pub fn as_lit(&self) -> Option<Literal> {
        match self {
            Encoding::Lit(literal) => Some(*literal),
            Encoding::Deferred { .. } => None,
        }
    }
}

impl From<Literal> for Encoding {
    fn from(literal: Literal) -> Self {
        Encoding::Lit(literal)
    }
}

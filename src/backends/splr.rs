//! A backend over the [splr](https://crates.io/crates/splr) CDCL solver.

use ::splr::Certificate;

use super::{pad_model, SolveBackend};
use crate::{db::clause::ClauseDb, structures::literal::Literal, types::err::BackendError};

/// The splr solver, driven through its on-memory certificate interface.
///
/// splr exposes no propagation budget on this interface, so a nonzero `limit` is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplrBackend;

impl SolveBackend for SplrBackend {
    fn solve(
        &mut self,
        clauses: &ClauseDb,
        var_count: Literal,
        _limit: usize,
    ) -> Result<Option<Vec<Literal>>, BackendError> {
        let cnf = clauses.to_vecs();
        if cnf.is_empty() {
            // An empty formula never reaches splr, which sizes itself from the clauses.
            return Ok(Some(pad_model(Vec::new(), var_count)));
        }
        match Certificate::try_from(cnf) {
            Ok(Certificate::SAT(model)) => Ok(Some(pad_model(model, var_count))),
            Ok(Certificate::UNSAT) => Ok(None),
            Err(e) => Err(BackendError::Failure(format!("{e:?}"))),
        }
    }
}

//! A backend over the [varisat](https://crates.io/crates/varisat) CDCL solver.

use ::varisat::{ExtendFormula, Lit, Solver};

use super::{pad_model, SolveBackend};
use crate::{db::clause::ClauseDb, structures::literal::Literal, types::err::BackendError};

/// The varisat solver, fed clause by clause.
///
/// varisat exposes no propagation budget on this interface, so a nonzero `limit` is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct VarisatBackend;

impl SolveBackend for VarisatBackend {
    fn solve(
        &mut self,
        clauses: &ClauseDb,
        var_count: Literal,
        _limit: usize,
    ) -> Result<Option<Vec<Literal>>, BackendError> {
        let mut solver = Solver::new();
        let mut buffer: Vec<Lit> = Vec::new();
        for clause in clauses.iter() {
            buffer.clear();
            buffer.extend(clause.iter().map(|&l| Lit::from_dimacs(l as isize)));
            solver.add_clause(&buffer);
        }
        match solver.solve() {
            Ok(true) => {
                let model = solver.model().unwrap_or_default();
                let literals = model.iter().map(|l| l.to_dimacs() as Literal).collect();
                Ok(Some(pad_model(literals, var_count)))
            }
            Ok(false) => Ok(None),
            Err(e) => Err(BackendError::Failure(format!("{e:?}"))),
        }
    }
}

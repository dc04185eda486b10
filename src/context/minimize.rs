/*!
Multi-objective minimisation of a weighted objective by bisection.

Given `Σ cᵢ·xᵢ` over literals of an already-satisfiable context, the optimiser minimises two
measures in order: the *peak* (largest coefficient of any active literal), then the *sum* of
active coefficients.

Both phases bisect on an upper bound.
A probe at bound `mid` adds speculative constraints --- during peak minimisation a veto on every
literal above the bound (plus a demand for one inside the window, since some peak must be
active); during sum minimisation a [linear bound](super::Context::linear_bound) --- and
re-solves.
A successful probe tightens `hi` to the measured objective of the new model; a failed probe
raises `lo` past the bound.
After every probe short of the last the clause store is rolled back to its pre-probe mark, the
variable counter is rewound, and the sticky infeasibility flag is cleared.
The constraints of the final successful probe are deliberately kept: they pin the store to the
optimum found, so later solves cannot drift away from it.

Between the phases every term whose coefficient exceeds the minimal peak is dropped --- no such
term can be active --- and the sum phase starts with `lo` at the peak value, which some active
term is known to reach.
*/

use std::collections::HashMap;

use super::{lb_preprocess, Context};
use crate::{
    misc::log::targets,
    structures::literal::Literal,
    types::err::BackendError,
};

/// The largest coefficient of any active literal.
fn peak_val(solution: &[Literal], objective: &HashMap<Literal, i64>) -> i64 {
    solution
        .iter()
        .map(|s| objective.get(s).copied().unwrap_or(0))
        .max()
        .unwrap_or(0)
}

/// The sum of coefficients of all active literals.
fn sum_val(solution: &[Literal], objective: &HashMap<Literal, i64>) -> i64 {
    solution
        .iter()
        .map(|s| objective.get(s).copied().unwrap_or(0))
        .sum()
}

impl Context {
    /// Minimises the objective `Σ coeffs·literals`: first its peak, then its sum.
    ///
    /// `initial` seeds the search with a known model; it is recomputed when absent or when
    /// it does not cover every allocated variable.
    /// With `try_max` set the sum phase probes `hi − 1` first, a good guess when the seed is
    /// suspected to be optimal or nearly so.
    ///
    /// Returns the best model found and its objective value.
    /// When the hard constraints are unsatisfiable the solution is `None` and the value is
    /// the sentinel `Σ|cᵢ| + 1`, above any achievable objective.
    pub fn minimize(
        &mut self,
        literals: &[Literal],
        coeffs: &[i64],
        initial: Option<Vec<Literal>>,
        try_max: bool,
    ) -> Result<(Option<Vec<Literal>>, i64), BackendError> {
        let infeasible_cost = if coeffs.is_empty() {
            1
        } else {
            coeffs.iter().map(|c| c.abs()).sum::<i64>() + 1
        };

        let mut bestsol = match initial {
            Some(solution) if solution.len() >= self.m as usize => solution,
            _ => {
                log::debug!(target: targets::MINIMIZE, "clauses added, recomputing solution");
                match self.solve()? {
                    Some(solution) => solution,
                    None => {
                        log::debug!(target: targets::MINIMIZE, "constraints are unsatisfiable");
                        return Ok((None, infeasible_cost));
                    }
                }
            }
        };
        if self.unsat {
            log::debug!(target: targets::MINIMIZE, "constraints are unsatisfiable");
            return Ok((Some(bestsol), infeasible_cost));
        }
        if coeffs.is_empty() {
            log::debug!(target: targets::MINIMIZE, "empty objective, trivial solution");
            return Ok((Some(bestsol), 0));
        }

        let (mut literals, mut coeffs, _offset) = lb_preprocess(literals, coeffs);
        let maxval = coeffs.last().copied().unwrap_or(0);

        let mut lo: i64 = 0;
        let mut try0: Option<i64> = Some(0);
        let mut bestval: i64 = 0;

        let phases: &[bool] = if maxval > 1 { &[true, false] } else { &[false] };
        for &peak in phases {
            if peak {
                log::trace!(target: targets::MINIMIZE, "beginning peak minimization");
            } else {
                log::trace!(target: targets::MINIMIZE, "beginning sum minimization");
            }
            let objval: fn(&[Literal], &HashMap<Literal, i64>) -> i64 =
                if peak { peak_val } else { sum_val };

            let objective: HashMap<Literal, i64> = literals
                .iter()
                .copied()
                .zip(coeffs.iter().copied())
                .collect();
            bestval = objval(&bestsol, &objective);

            // Even a lucky optimal seed passes through the loop once, so that the bound
            // constraints pinning the optimum are generated.
            let mut hi = bestval;
            let m_orig = self.m;
            let nz = if log::log_enabled!(log::Level::Trace) {
                self.clause_count()
            } else {
                0
            };
            let saved = self.save_state();
            if try_max && !peak {
                try0 = Some(hi - 1);
            }

            log::trace!(target: targets::MINIMIZE, "initial range ({lo},{hi})");
            loop {
                let mid = match try0 {
                    Some(guess) => guess,
                    None => (lo + hi) / 2,
                };

                if peak {
                    let too_high: Vec<Literal> = coeffs
                        .iter()
                        .zip(&literals)
                        .filter(|&(&c, _)| c > mid)
                        .map(|(_, &l)| l)
                        .collect();
                    let in_window: Vec<Literal> = coeffs
                        .iter()
                        .zip(&literals)
                        .filter(|&(&c, _)| lo <= c && c <= mid)
                        .map(|(_, &l)| l)
                        .collect();
                    self.prevent(|ctx, pol| ctx.any(too_high.iter().copied(), pol));
                    if !in_window.is_empty() {
                        self.require(|ctx, pol| ctx.any(in_window.iter().copied(), pol));
                    }
                } else {
                    self.require(|ctx, pol| {
                        ctx.linear_bound(&literals, &coeffs, lo, mid, false, pol)
                    });
                }

                if log::log_enabled!(log::Level::Trace) {
                    log::trace!(
                        target: targets::MINIMIZE,
                        "bisection attempt ({lo},{mid}), ({nz}+{}) clauses",
                        self.clause_count() - nz,
                    );
                }
                let newsol = match self.solve() {
                    Ok(solution) => solution,
                    Err(e) => {
                        self.m = m_orig;
                        if self.save_state() != saved {
                            self.restore_state(saved);
                        }
                        self.unsat = false;
                        return Err(e);
                    }
                };

                match newsol {
                    None => {
                        lo = mid + 1;
                        log::trace!(
                            target: targets::MINIMIZE,
                            "bisection failure, new range ({lo},{hi})",
                        );
                        if lo > hi {
                            // A solution with objective hi is known, so the probe at hi was
                            // misreported --- possible only under an effort budget.
                            log::error!(
                                target: targets::MINIMIZE,
                                "bisection bounds crossed ({lo},{hi})",
                            );
                            debug_assert!(false, "bisection bounds crossed");
                            break;
                        }
                    }
                    Some(solution) => {
                        let done = lo == mid;
                        bestsol = solution;
                        bestval = objval(&bestsol, &objective);
                        hi = bestval;
                        log::trace!(
                            target: targets::MINIMIZE,
                            "bisection success, new range ({lo},{hi})",
                        );
                        if done {
                            break;
                        }
                    }
                }

                self.m = m_orig;
                // Clauses are only ever added, and only removed by restore, so an equality
                // test on the marks suffices.
                if self.save_state() != saved {
                    self.restore_state(saved);
                }
                self.unsat = false;
                try0 = None;
            }

            log::debug!(
                target: targets::MINIMIZE,
                "final {} objective: {bestval}",
                if peak { "peak" } else { "sum" },
            );
            if bestval == 0 {
                break;
            }
            if peak {
                // With the peak minimised, no term above it can be active: drop them all and
                // start the sum phase at the peak, which some active term attains.
                try0 = Some(sum_val(&bestsol, &objective));
                lo = bestval;
                let kept: Vec<(i64, Literal)> = coeffs
                    .into_iter()
                    .zip(literals)
                    .filter(|&(c, _)| c <= bestval)
                    .collect();
                coeffs = kept.iter().map(|&(c, _)| c).collect();
                literals = kept.iter().map(|&(_, l)| l).collect();
            } else {
                log::debug!(
                    target: targets::MINIMIZE,
                    "new peak objective: {}",
                    peak_val(&bestsol, &objective),
                );
            }
        }

        Ok((Some(bestsol), bestval))
    }
}

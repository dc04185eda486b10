/*!
Encoding of pseudo-boolean bounds: `lo ≤ Σ cᵢ·xᵢ ≤ hi`.

The encoder follows the translation of Eén and Sörensson ("Translating Pseudo-Boolean
Constraints into SAT"): the sorted equation is reduced term by term from the largest
coefficient down, each step an if-then-else on the term's variable between the two
subproblems, with memoisation collapsing subproblems reached with the same committed sum.
The resulting diagram is emitted eagerly through the connectives' `emit` path.

Construction is iterative over an explicit stack: on large dependency problems the diagram
reaches depths that would overflow native recursion.

[lb_preprocess] normalises an equation before encoding: constant literals fold into an
offset, negative coefficients flip their literal, zero terms vanish, and the remainder is
sorted by ascending coefficient --- the order the reduction depends on.
*/

use std::collections::HashMap;

use super::Context;
use crate::{
    misc::log::targets,
    structures::{
        encoding::Encoding,
        literal::{Literal, Polarity, FALSE, TRUE},
    },
};

/// Normalises an equation for the bound encoder.
///
/// Returns the surviving literals, their coefficients sorted ascending, and the constant
/// offset absorbed along the way; callers shift their bounds by the offset.
/// Applying the function to its own output changes nothing further.
pub fn lb_preprocess(literals: &[Literal], coeffs: &[i64]) -> (Vec<Literal>, Vec<i64>, i64) {
    let mut equation: Vec<(i64, Literal)> = Vec::with_capacity(literals.len());
    let mut offset = 0;
    for (&coeff, &literal) in coeffs.iter().zip(literals) {
        if literal == TRUE {
            offset += coeff;
            continue;
        }
        if literal == FALSE || coeff == 0 {
            continue;
        }
        if coeff < 0 {
            offset += coeff;
            equation.push((-coeff, -literal));
        } else {
            equation.push((coeff, literal));
        }
    }
    equation.sort_unstable();
    let (coeffs, literals): (Vec<i64>, Vec<Literal>) = equation.into_iter().unzip();
    (literals, coeffs, offset)
}

impl Context {
    /// Encodes `lo ≤ Σ coeffs·literals ≤ hi`.
    ///
    /// With `preprocess` set the equation is normalised first and the bounds are tightened
    /// to the representable range; without it the equation must already be normalised (as
    /// [lb_preprocess] leaves it), which the optimiser exploits to preprocess once across
    /// many probes.
    ///
    /// Terms whose coefficient alone exceeds `hi` cannot be active in any satisfying model;
    /// they are cut from the diagram and forced false alongside it.
    pub fn linear_bound(
        &mut self,
        literals: &[Literal],
        coeffs: &[i64],
        lo: i64,
        hi: i64,
        preprocess: bool,
        polarity: Polarity,
    ) -> Encoding {
        let (literals, coeffs, mut lo, mut hi) = if preprocess {
            let (literals, coeffs, offset) = lb_preprocess(literals, coeffs);
            (literals, coeffs, lo - offset, hi - offset)
        } else {
            (literals.to_vec(), coeffs.to_vec(), lo, hi)
        };

        let mut nterms = coeffs.len();
        let nprune = if nterms > 0 && coeffs[nterms - 1] > hi {
            let nprune = coeffs.iter().filter(|&&c| c > hi).count();
            log::trace!(
                target: targets::ENCODE,
                "eliminating {nprune}/{nterms} terms for bound violation",
            );
            nterms -= nprune;
            nprune
        } else {
            0
        };

        let total: i64 = coeffs[..nterms].iter().sum();
        if preprocess {
            lo = lo.max(0);
            hi = hi.min(total);
        }
        if lo > hi {
            return Encoding::Lit(FALSE);
        }

        let result = if nterms == 0 {
            Encoding::Lit(if lo == 0 { TRUE } else { FALSE })
        } else {
            Encoding::Lit(self.bdd(&literals, &coeffs, nterms, lo, hi, polarity))
        };

        if nprune > 0 {
            let pruned = self.all(literals[nterms..].iter().map(|&l| -l), polarity);
            self.combine(vec![result, pruned], polarity)
        } else {
            result
        }
    }

    /// Builds the decision diagram for a normalised equation, emitting clauses as it goes.
    ///
    /// The equation is sorted by ascending coefficient, which admits the recurrence
    ///
    /// ```none
    ///              lo      ≤ S + c·x ≤ hi
    ///  =  if x:    lo − c  ≤ S       ≤ hi − c
    ///     else:    lo      ≤ S       ≤ hi
    /// ```
    ///
    /// on the last (largest) term.
    /// A state is `(terms remaining, sum committed true, sum still undecided)`; memoisation
    /// merges states reached along different paths.
    /// The memo is only meaningful within one call and is dropped on return.
    fn bdd(
        &mut self,
        literals: &[Literal],
        coeffs: &[i64],
        nterms: usize,
        lo: i64,
        hi: i64,
        polarity: Polarity,
    ) -> Literal {
        let total: i64 = coeffs[..nterms].iter().sum();
        let target = (nterms, 0, total);
        let mut memo: HashMap<(usize, i64, i64), Literal> = HashMap::new();
        let mut stack = vec![target];

        while let Some(&state) = stack.last() {
            let (ndx, csum, total) = state;
            let lower_limit = lo - csum;
            let upper_limit = hi - csum;
            if lower_limit <= 0 && upper_limit >= total {
                stack.pop();
                memo.insert(state, TRUE);
                continue;
            }
            if lower_limit > total || upper_limit < 0 {
                stack.pop();
                memo.insert(state, FALSE);
                continue;
            }

            let literal = literals[ndx - 1];
            let coeff = coeffs[ndx - 1];
            let rest = total - coeff;

            // A negated literal contributes its coefficient when the variable is false.
            let hi_key = (
                ndx - 1,
                if literal < 0 { csum } else { csum + coeff },
                rest,
            );
            let Some(&hi_child) = memo.get(&hi_key) else {
                stack.push(hi_key);
                continue;
            };
            let lo_key = (
                ndx - 1,
                if literal < 0 { csum + coeff } else { csum },
                rest,
            );
            let Some(&lo_child) = memo.get(&lo_key) else {
                stack.push(lo_key);
                continue;
            };

            let node = self.ite_var(literal.abs(), hi_child, lo_child, polarity);
            stack.pop();
            memo.insert(state, node);
        }

        memo[&target]
    }

    /// An if-then-else on a variable with clauses emitted eagerly.
    fn ite_var(&mut self, c: Literal, t: Literal, f: Literal, polarity: Polarity) -> Literal {
        match self.ite(c, t, f, polarity, true) {
            Encoding::Lit(literal) => literal,
            Encoding::Deferred { .. } => unreachable!("emitting connectives return a literal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_sorts_ascending() {
        let (literals, coeffs, offset) = lb_preprocess(&[1, 2, 3], &[3, 1, 2]);
        assert_eq!(literals, vec![2, 3, 1]);
        assert_eq!(coeffs, vec![1, 2, 3]);
        assert_eq!(offset, 0);
    }

    #[test]
    fn preprocess_absorbs_negative_coefficients() {
        let (literals, coeffs, offset) = lb_preprocess(&[4, 5], &[-2, 3]);
        assert_eq!(literals, vec![-4, 5]);
        assert_eq!(coeffs, vec![2, 3]);
        assert_eq!(offset, -2);
    }

    #[test]
    fn preprocess_folds_constants() {
        let (literals, coeffs, offset) = lb_preprocess(&[TRUE, 7, FALSE, 8], &[5, 1, 9, 0]);
        assert_eq!(literals, vec![7]);
        assert_eq!(coeffs, vec![1]);
        assert_eq!(offset, 5);
    }

    #[test]
    fn preprocess_idempotent() {
        let literals = [3, -1, TRUE, 2];
        let coeffs = [2, -4, 6, 0];
        let (l1, c1, o1) = lb_preprocess(&literals, &coeffs);
        assert_eq!(o1, 2);
        let (l2, c2, o2) = lb_preprocess(&l1, &c1);
        assert_eq!(l1, l2);
        assert_eq!(c1, c2);
        assert_eq!(o2, 0);
    }
}

/*!
Logical connectives over literals, and the machinery turning their results into clauses.

Every connective first tries to collapse: constants, repeated operands, and complementary
operands reduce to a literal without emitting anything.
Otherwise the result is a [deferred encoding](Encoding) carrying the clause sets for each
direction of use, filtered by the requested [Polarity].

Three consumers exist for an encoding:

- [require](Context::require) / [prevent](Context::prevent) emit it as a hard constraint at a
  single polarity.
- [assign](Context::assign) binds it to a fresh variable (the Tseitin step), prefixing the
  negated variable onto each positive clause and the variable onto each negative clause.
- The binary connectives themselves, when called with `emit` set, perform the binding inline
  and return the fresh variable directly.
  This is the hot path of the pseudo-boolean encoder, which builds towers of if-then-else
  nodes and cannot afford to shuttle clause vectors around for each one.

The if-then-else connective emits a third, logically redundant clause per direction
(`{t, f}` / `{−t, −f}`); it lets unit propagation fire as soon as the two branches agree,
before the condition is decided, and measurably narrows the search.
*/

use std::collections::HashSet;

use super::Context;
use crate::structures::{
    encoding::Encoding,
    literal::{Literal, Polarity, FALSE, TRUE},
};

impl Context {
    /// Binds a deferred encoding to a fresh variable and returns it.
    ///
    /// Literal encodings pass through unchanged.
    /// When both clause sets are present the fresh variable is equivalent to the encoded
    /// value; with a single set only the corresponding implication holds.
    pub fn assign(&mut self, value: Encoding) -> Literal {
        match value {
            Encoding::Lit(literal) => literal,
            Encoding::Deferred { pos, neg } => {
                let x = self.fresh_var();
                for clause in pos {
                    let mut bound = Vec::with_capacity(clause.len() + 1);
                    bound.push(-x);
                    bound.extend(clause);
                    self.add_clause(bound);
                }
                for clause in neg {
                    let mut bound = Vec::with_capacity(clause.len() + 1);
                    bound.push(x);
                    bound.extend(clause);
                    self.add_clause(bound);
                }
                x
            }
        }
    }

    /// Emits the encoding built by `build` as a hard constraint: the value must hold.
    ///
    /// A value which collapses to constant false makes the context permanently
    /// unsatisfiable.
    pub fn require<F>(&mut self, build: F)
    where
        F: FnOnce(&mut Self, Polarity) -> Encoding,
    {
        self.evaluate(build, true);
    }

    /// Emits the encoding built by `build` as a hard constraint: the value must not hold.
    ///
    /// A value which collapses to constant true makes the context permanently unsatisfiable.
    pub fn prevent<F>(&mut self, build: F)
    where
        F: FnOnce(&mut Self, Polarity) -> Encoding,
    {
        self.evaluate(build, false);
    }

    fn evaluate<F>(&mut self, build: F, positive: bool)
    where
        F: FnOnce(&mut Self, Polarity) -> Encoding,
    {
        let polarity = if positive {
            Polarity::Positive
        } else {
            Polarity::Negative
        };
        let saved = self.clause_db.save_state();
        match build(self, polarity) {
            Encoding::Deferred { pos, neg } => {
                // One of the two sets is empty, having been filtered by the polarity.
                self.add_clauses(pos);
                self.add_clauses(neg);
            }
            Encoding::Lit(value) if value != TRUE && value != FALSE => {
                self.add_clause(vec![if positive { value } else { -value }]);
            }
            Encoding::Lit(value) => {
                // Constant: discard whatever building emitted along the way.
                self.clause_db.restore_state(saved);
                self.unsat = self.unsat || (value == TRUE) != positive;
            }
        }
    }

    /// Conjunction of two literals.
    pub fn and(&mut self, f: Literal, g: Literal, polarity: Polarity, emit: bool) -> Encoding {
        if f == FALSE || g == FALSE {
            return Encoding::Lit(FALSE);
        }
        if f == TRUE {
            return Encoding::Lit(g);
        }
        if g == TRUE {
            return Encoding::Lit(f);
        }
        if f == g {
            return Encoding::Lit(f);
        }
        if f == -g {
            return Encoding::Lit(FALSE);
        }
        let (f, g) = if g < f { (g, f) } else { (f, g) };

        if emit {
            let x = self.fresh_var();
            if polarity.wants_positive() {
                self.add_clauses([vec![-x, f], vec![-x, g]]);
            }
            if polarity.wants_negative() {
                self.add_clause(vec![x, -f, -g]);
            }
            return Encoding::Lit(x);
        }
        let pos = if polarity.wants_positive() {
            vec![vec![f], vec![g]]
        } else {
            Vec::new()
        };
        let neg = if polarity.wants_negative() {
            vec![vec![-f, -g]]
        } else {
            Vec::new()
        };
        Encoding::Deferred { pos, neg }
    }

    /// Disjunction of two literals.
    pub fn or(&mut self, f: Literal, g: Literal, polarity: Polarity, emit: bool) -> Encoding {
        if f == TRUE || g == TRUE {
            return Encoding::Lit(TRUE);
        }
        if f == FALSE {
            return Encoding::Lit(g);
        }
        if g == FALSE {
            return Encoding::Lit(f);
        }
        if f == g {
            return Encoding::Lit(f);
        }
        if f == -g {
            return Encoding::Lit(TRUE);
        }
        let (f, g) = if g < f { (g, f) } else { (f, g) };

        if emit {
            let x = self.fresh_var();
            if polarity.wants_positive() {
                self.add_clause(vec![-x, f, g]);
            }
            if polarity.wants_negative() {
                self.add_clauses([vec![x, -f], vec![x, -g]]);
            }
            return Encoding::Lit(x);
        }
        let pos = if polarity.wants_positive() {
            vec![vec![f, g]]
        } else {
            Vec::new()
        };
        let neg = if polarity.wants_negative() {
            vec![vec![-f], vec![-g]]
        } else {
            Vec::new()
        };
        Encoding::Deferred { pos, neg }
    }

    /// Exclusive disjunction of two literals.
    pub fn xor(&mut self, f: Literal, g: Literal, polarity: Polarity, emit: bool) -> Encoding {
        if f == FALSE {
            return Encoding::Lit(g);
        }
        if f == TRUE {
            return Encoding::Lit(-g);
        }
        if g == FALSE {
            return Encoding::Lit(f);
        }
        if g == TRUE {
            return Encoding::Lit(-f);
        }
        if f == g {
            return Encoding::Lit(FALSE);
        }
        if f == -g {
            return Encoding::Lit(TRUE);
        }
        let (f, g) = if g < f { (g, f) } else { (f, g) };

        if emit {
            let x = self.fresh_var();
            if polarity.wants_positive() {
                self.add_clauses([vec![-x, f, g], vec![-x, -f, -g]]);
            }
            if polarity.wants_negative() {
                self.add_clauses([vec![x, -f, g], vec![x, f, -g]]);
            }
            return Encoding::Lit(x);
        }
        let pos = if polarity.wants_positive() {
            vec![vec![f, g], vec![-f, -g]]
        } else {
            Vec::new()
        };
        let neg = if polarity.wants_negative() {
            vec![vec![-f, g], vec![f, -g]]
        } else {
            Vec::new()
        };
        Encoding::Deferred { pos, neg }
    }

    /// If-then-else over three literals: `c ? t : f`.
    pub fn ite(
        &mut self,
        c: Literal,
        t: Literal,
        f: Literal,
        polarity: Polarity,
        emit: bool,
    ) -> Encoding {
        if c == TRUE {
            return Encoding::Lit(t);
        }
        if c == FALSE {
            return Encoding::Lit(f);
        }
        if t == TRUE {
            return self.or(c, f, polarity, emit);
        }
        if t == FALSE {
            return self.and(-c, f, polarity, emit);
        }
        if f == FALSE {
            return self.and(c, t, polarity, emit);
        }
        if f == TRUE {
            return self.or(t, -c, polarity, emit);
        }
        if t == c {
            return self.or(c, f, polarity, emit);
        }
        if t == -c {
            return self.and(-c, f, polarity, emit);
        }
        if f == c {
            return self.and(c, t, polarity, emit);
        }
        if f == -c {
            return self.or(t, -c, polarity, emit);
        }
        if t == f {
            return Encoding::Lit(t);
        }
        if t == -f {
            return self.xor(c, f, polarity, emit);
        }
        let (c, t, f) = if t < f { (-c, f, t) } else { (c, t, f) };

        // c ? t : f is (c ∧ t) ∨ (¬c ∧ f). The third clause in each group is redundant but
        // assists unit propagation in the solver.
        if emit {
            let x = self.fresh_var();
            if polarity.wants_positive() {
                self.add_clauses([vec![-x, -c, t], vec![-x, c, f], vec![-x, t, f]]);
            }
            if polarity.wants_negative() {
                self.add_clauses([vec![x, -c, -t], vec![x, c, -f], vec![x, -t, -f]]);
            }
            return Encoding::Lit(x);
        }
        let pos = if polarity.wants_positive() {
            vec![vec![-c, t], vec![c, f], vec![t, f]]
        } else {
            Vec::new()
        };
        let neg = if polarity.wants_negative() {
            vec![vec![-c, -t], vec![c, -f], vec![-t, -f]]
        } else {
            Vec::new()
        };
        Encoding::Deferred { pos, neg }
    }

    /// Conjunction of arbitrarily many literals.
    ///
    /// Deduplicates, and collapses to constant false on a complementary pair.
    pub fn all<I>(&self, literals: I, polarity: Polarity) -> Encoding
    where
        I: IntoIterator<Item = Literal>,
    {
        let mut seen: HashSet<Literal> = HashSet::new();
        let mut vals: Vec<Literal> = Vec::new();
        for v in literals {
            if v == TRUE {
                continue;
            }
            if v == FALSE || seen.contains(&-v) {
                return Encoding::Lit(FALSE);
            }
            if seen.insert(v) {
                vals.push(v);
            }
        }
        match vals.len() {
            0 => Encoding::Lit(TRUE),
            1 => Encoding::Lit(vals[0]),
            _ => {
                let pos = if polarity.wants_positive() {
                    vals.iter().map(|&v| vec![v]).collect()
                } else {
                    Vec::new()
                };
                let neg = if polarity.wants_negative() {
                    vec![vals.iter().map(|&v| -v).collect()]
                } else {
                    Vec::new()
                };
                Encoding::Deferred { pos, neg }
            }
        }
    }

    /// Disjunction of arbitrarily many literals.
    ///
    /// Deduplicates, and collapses to constant true on a complementary pair.
    /// An empty disjunction is constant false, so requiring one makes the context
    /// unsatisfiable.
    pub fn any<I>(&self, literals: I, polarity: Polarity) -> Encoding
    where
        I: IntoIterator<Item = Literal>,
    {
        let mut seen: HashSet<Literal> = HashSet::new();
        let mut vals: Vec<Literal> = Vec::new();
        for v in literals {
            if v == FALSE {
                continue;
            }
            if v == TRUE || seen.contains(&-v) {
                return Encoding::Lit(TRUE);
            }
            if seen.insert(v) {
                vals.push(v);
            }
        }
        match vals.len() {
            0 => Encoding::Lit(FALSE),
            1 => Encoding::Lit(vals[0]),
            _ => {
                let pos = if polarity.wants_positive() {
                    vec![vals.clone()]
                } else {
                    Vec::new()
                };
                let neg = if polarity.wants_negative() {
                    vals.iter().map(|&v| vec![-v]).collect()
                } else {
                    Vec::new()
                };
                Encoding::Deferred { pos, neg }
            }
        }
    }

    /// Conjunction of arbitrarily many already-built encodings.
    ///
    /// Deferred operands are merged clause set by clause set; a mix of deferred and literal
    /// operands is assigned to fresh variables first and conjoined with [all](Context::all).
    /// A merged result is faithful at the polarity the operands were built for --- callers
    /// needing a two-sided binding assign the operands themselves first.
    pub fn combine(&mut self, values: Vec<Encoding>, polarity: Polarity) -> Encoding {
        if values.iter().any(|v| matches!(v, Encoding::Lit(FALSE))) {
            return Encoding::Lit(FALSE);
        }
        let mut values: Vec<Encoding> = values
            .into_iter()
            .filter(|v| !matches!(v, Encoding::Lit(TRUE)))
            .collect();
        match values.len() {
            0 => Encoding::Lit(TRUE),
            1 => values.swap_remove(0),
            _ => {
                if values.iter().all(|v| matches!(v, Encoding::Deferred { .. })) {
                    let mut pos = Vec::new();
                    let mut neg = Vec::new();
                    for value in values {
                        if let Encoding::Deferred { pos: p, neg: n } = value {
                            pos.extend(p);
                            neg.extend(n);
                        }
                    }
                    Encoding::Deferred { pos, neg }
                } else {
                    let literals: Vec<Literal> =
                        values.into_iter().map(|v| self.assign(v)).collect();
                    self.all(literals, polarity)
                }
            }
        }
    }

    /// At most one of the literals, as pairwise exclusions.
    ///
    /// Quadratic in the number of literals; suited to small sets.
    /// The merged exclusions are faithful at the requested polarity; the cardinality form
    /// is the one to bind two-sided.
    pub fn at_most_one_pairwise<I>(&mut self, literals: I, polarity: Polarity) -> Encoding
    where
        I: IntoIterator<Item = Literal>,
    {
        let vals: Vec<Literal> = literals.into_iter().collect();
        let mut exclusions = Vec::with_capacity(vals.len() * vals.len().saturating_sub(1) / 2);
        for i in 0..vals.len() {
            for j in i + 1..vals.len() {
                exclusions.push(self.or(-vals[i], -vals[j], polarity, false));
            }
        }
        self.combine(exclusions, polarity)
    }

    /// At most one of the literals, as a cardinality bound.
    ///
    /// Linear-sized via the decision-diagram encoder; preferred for larger sets.
    pub fn at_most_one_bdd(&mut self, literals: &[Literal], polarity: Polarity) -> Encoding {
        let coeffs = vec![1; literals.len()];
        self.linear_bound(literals, &coeffs, 0, 1, true, polarity)
    }

    /// At most one of the literals, dispatching on the size of the set.
    pub fn at_most_one<I>(&mut self, literals: I, polarity: Polarity) -> Encoding
    where
        I: IntoIterator<Item = Literal>,
    {
        let vals: Vec<Literal> = literals.into_iter().collect();
        if vals.len() <= PAIRWISE_LIMIT {
            self.at_most_one_pairwise(vals, polarity)
        } else {
            self.at_most_one_bdd(&vals, polarity)
        }
    }

    /// Exactly one of the literals, as pairwise exclusions plus a disjunction.
    pub fn exactly_one_pairwise<I>(&mut self, literals: I, polarity: Polarity) -> Encoding
    where
        I: IntoIterator<Item = Literal>,
    {
        let vals: Vec<Literal> = literals.into_iter().collect();
        let at_most = self.at_most_one_pairwise(vals.iter().copied(), polarity);
        let at_least = self.any(vals, polarity);
        self.combine(vec![at_most, at_least], polarity)
    }

    /// Exactly one of the literals, as a cardinality bound.
    pub fn exactly_one_bdd(&mut self, literals: &[Literal], polarity: Polarity) -> Encoding {
        let coeffs = vec![1; literals.len()];
        self.linear_bound(literals, &coeffs, 1, 1, true, polarity)
    }

    /// Exactly one of the literals, dispatching on the size of the set.
    pub fn exactly_one<I>(&mut self, literals: I, polarity: Polarity) -> Encoding
    where
        I: IntoIterator<Item = Literal>,
    {
        let vals: Vec<Literal> = literals.into_iter().collect();
        if vals.len() <= PAIRWISE_LIMIT {
            self.exactly_one_pairwise(vals, polarity)
        } else {
            self.exactly_one_bdd(&vals, polarity)
        }
    }
}

/// Largest set for which the quadratic pairwise encodings beat the decision diagram.
const PAIRWISE_LIMIT: usize = 5;

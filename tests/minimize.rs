use clausal::{config::Config, context::Context};
use rand::Rng;

mod common;

fn fresh_context() -> Context {
    Context::from_config(Config::default()).expect("a bundled backend")
}

/// The largest weight active under an assignment.
fn peak_of(assignment: &[i32], literals: &[i32], coeffs: &[i64]) -> i64 {
    literals
        .iter()
        .zip(coeffs)
        .filter(|&(&literal, _)| common::literal_true(assignment, literal))
        .map(|(_, &coeff)| coeff)
        .max()
        .unwrap_or(0)
}

/// The sum of weights active under an assignment.
fn sum_of(assignment: &[i32], literals: &[i32], coeffs: &[i64]) -> i64 {
    literals
        .iter()
        .zip(coeffs)
        .filter(|&(&literal, _)| common::literal_true(assignment, literal))
        .map(|(_, &coeff)| coeff)
        .sum()
}

#[test]
fn drops_expensive_alternatives() {
    let mut ctx = fresh_context();
    let vars: Vec<i32> = (0..4).map(|_| ctx.fresh_var()).collect();
    ctx.add_clause(vec![vars[0], vars[2]]);
    ctx.add_clause(vec![vars[1], vars[3]]);

    let coeffs = [1, 1, 5, 5];
    let (solution, cost) = ctx.minimize(&vars, &coeffs, None, false).unwrap();
    let solution = solution.expect("satisfiable");

    assert_eq!(cost, 2);
    assert_eq!(peak_of(&solution, &vars, &coeffs), 1);
    assert!(common::literal_true(&solution, vars[0]));
    assert!(common::literal_true(&solution, vars[1]));
    assert!(common::literal_true(&solution, -vars[2]));
    assert!(common::literal_true(&solution, -vars[3]));
}

#[test]
fn empty_objective_returns_zero() {
    let mut ctx = fresh_context();
    let a = ctx.fresh_var();
    ctx.add_clause(vec![a]);

    let (solution, cost) = ctx.minimize(&[], &[], None, false).unwrap();
    assert!(solution.is_some());
    assert_eq!(cost, 0);
}

#[test]
fn infeasible_constraints_report_sentinel_cost() {
    let mut ctx = fresh_context();
    let a = ctx.fresh_var();
    ctx.add_clause(vec![a]);
    ctx.add_clause(vec![-a]);

    let (solution, cost) = ctx.minimize(&[a], &[3], None, false).unwrap();
    assert_eq!(solution, None);
    assert_eq!(cost, 4);
}

#[test]
fn optimum_already_at_zero() {
    let mut ctx = fresh_context();
    let a = ctx.fresh_var();
    let b = ctx.fresh_var();
    ctx.add_clause(vec![a, b]);

    // Activating b alone satisfies everything and costs nothing.
    let (solution, cost) = ctx.minimize(&[a], &[7], None, false).unwrap();
    let solution = solution.expect("satisfiable");
    assert_eq!(cost, 0);
    assert!(common::literal_true(&solution, -a));
}

/// A random instance: clauses over a handful of variables plus a weight per variable.
struct Instance {
    var_count: i32,
    clauses: Vec<Vec<i32>>,
    literals: Vec<i32>,
    coeffs: Vec<i64>,
}

impl Instance {
    fn random(rng: &mut common::MinimalPcg32) -> Self {
        let var_count: i32 = rng.gen_range(3..=5);
        let clause_count: usize = rng.gen_range(3..=5);
        let mut clauses = Vec::with_capacity(clause_count);
        for _ in 0..clause_count {
            let width: usize = rng.gen_range(2..=3);
            let mut clause = Vec::with_capacity(width);
            while clause.len() < width {
                let var = rng.gen_range(1..=var_count);
                if clause.iter().any(|&l: &i32| l.abs() == var) {
                    continue;
                }
                clause.push(if rng.gen_range(0..2) == 0 { var } else { -var });
            }
            clauses.push(clause);
        }
        let literals: Vec<i32> = (1..=var_count)
            .map(|v| if rng.gen_range(0..2) == 0 { v } else { -v })
            .collect();
        let coeffs: Vec<i64> = (1..=var_count).map(|_| rng.gen_range(1..=6)).collect();
        Instance {
            var_count,
            clauses,
            literals,
            coeffs,
        }
    }

    fn context(&self) -> Context {
        let mut ctx = fresh_context();
        for _ in 0..self.var_count {
            ctx.fresh_var();
        }
        for clause in &self.clauses {
            ctx.add_clause(clause.clone());
        }
        ctx
    }

    /// The least (peak, sum) pair over all models, peak compared first.
    fn optimum(&self) -> Option<(i64, i64)> {
        common::models(&self.clauses, self.var_count)
            .iter()
            .map(|model| {
                (
                    peak_of(model, &self.literals, &self.coeffs),
                    sum_of(model, &self.literals, &self.coeffs),
                )
            })
            .min()
    }
}

#[test]
fn random_instances_reach_the_brute_force_optimum() {
    let mut rng = common::seeded(0x5eed);
    for round in 0..25 {
        let instance = Instance::random(&mut rng);
        let Some((best_peak, best_sum)) = instance.optimum() else {
            let mut ctx = instance.context();
            let (solution, cost) = ctx
                .minimize(&instance.literals, &instance.coeffs, None, false)
                .unwrap();
            assert_eq!(solution, None);
            assert_eq!(cost, instance.coeffs.iter().sum::<i64>() + 1);
            continue;
        };

        for try_max in [false, true] {
            let mut ctx = instance.context();
            let (solution, cost) = ctx
                .minimize(&instance.literals, &instance.coeffs, None, try_max)
                .unwrap();
            let solution = solution.expect("satisfiable");

            for clause in &instance.clauses {
                assert!(
                    clause.iter().any(|&l| common::literal_true(&solution, l)),
                    "round {round}: solution violates {clause:?}"
                );
            }
            assert_eq!(cost, best_sum, "round {round} (try_max {try_max})");
            assert_eq!(
                peak_of(&solution, &instance.literals, &instance.coeffs),
                best_peak,
                "round {round} (try_max {try_max})"
            );
            assert_eq!(
                sum_of(&solution, &instance.literals, &instance.coeffs),
                cost,
                "round {round} (try_max {try_max})"
            );
        }
    }
}

#[test]
fn seed_solution_does_not_change_the_optimum() {
    let mut rng = common::seeded(0xacc);
    for _ in 0..10 {
        let instance = Instance::random(&mut rng);
        let models = common::models(&instance.clauses, instance.var_count);
        let Some(seed) = models.first().cloned() else {
            continue;
        };
        let Some((_, best_sum)) = instance.optimum() else {
            continue;
        };

        let seed_cost = sum_of(&seed, &instance.literals, &instance.coeffs);
        let mut ctx = instance.context();
        let (solution, cost) = ctx
            .minimize(&instance.literals, &instance.coeffs, Some(seed), false)
            .unwrap();
        assert!(solution.is_some());
        assert_eq!(cost, best_sum);
        assert!(cost <= seed_cost);
    }
}

#[test]
fn short_seed_solution_is_recomputed() {
    let mut ctx = fresh_context();
    let a = ctx.fresh_var();
    let b = ctx.fresh_var();
    ctx.add_clause(vec![a, b]);

    // A seed covering fewer variables than allocated is discarded.
    let (solution, cost) = ctx.minimize(&[a, b], &[2, 3], Some(vec![a]), false).unwrap();
    let solution = solution.expect("satisfiable");
    assert!(solution.len() >= 2);
    assert_eq!(cost, 2);
}

/*!
A clause-building and pseudo-boolean optimisation engine for package dependency resolution.

clausal turns a collection of logical constraints over integer variables into a formula in
conjunctive normal form, hands the formula to a pluggable SAT solver, and --- given a weighted
objective over the variables --- searches for a model which minimises first the largest active
weight and then the sum of active weights.

The crate was written as the solving core of a package manager: the resolver encodes package
installability as variables and dependency clauses, and preference weights (version distance,
optional features, removal churn) as objective coefficients.
clausal itself knows nothing about packages.
It performs no I/O, owns no file formats, and embeds no search algorithm of its own --- the
decision procedure is always an external solver behind the [backend](crate::backends) interface.

# Orientation

The library is designed around the core structure of a [context](crate::context::Context).

- Variables are plain positive integers handed out by
  [fresh_var](crate::context::Context::fresh_var), and a [literal](crate::structures::literal)
  is a variable or its negation.
  Two sentinel literals, [TRUE](crate::structures::literal::TRUE) and
  [FALSE](crate::structures::literal::FALSE), stand for the constant values.
- Connectives ([and](crate::context::Context::and), [or](crate::context::Context::or),
  [xor](crate::context::Context::xor), [ite](crate::context::Context::ite),
  [all](crate::context::Context::all), [any](crate::context::Context::any), and the cardinality
  and [linear bound](crate::context::Context::linear_bound) encoders) return an
  [Encoding](crate::structures::encoding::Encoding): either a literal, or clauses whose
  materialisation is deferred until the required [polarity](crate::structures::literal::Polarity)
  is known.
- [require](crate::context::Context::require) and [prevent](crate::context::Context::prevent)
  emit an encoding as a hard constraint, while [assign](crate::context::Context::assign)
  binds it to a fresh variable so it can be nested inside further connectives.
- Clauses accumulate in a [clause store](crate::db::clause::ClauseDb) supporting constant-time
  state capture and truncation rollback, which the
  [optimiser](crate::context::Context::minimize) uses to try and discard speculative bounds.

# Examples

Exactly one of a group of variables, with one of them vetoed:

```rust
use clausal::{config::Config, context::Context};

let mut ctx = Context::from_config(Config::default()).unwrap();

let a = ctx.fresh_var();
let b = ctx.fresh_var();
let c = ctx.fresh_var();

ctx.require(|ctx, pol| ctx.exactly_one([a, b, c], pol));
ctx.prevent(|ctx, pol| ctx.any([a], pol));

let model = ctx.solve().unwrap().expect("satisfiable");
assert!(model.contains(&-a));
assert_eq!(model.iter().filter(|&&l| l == b || l == c).count(), 1);
```

Minimising a weighted objective.
Each clause forces one of a cheap and an expensive alternative; the optimiser settles on the
cheap pair:

```rust
use clausal::{config::Config, context::Context};

let mut ctx = Context::from_config(Config::default()).unwrap();

let vars: Vec<i32> = (0..4).map(|_| ctx.fresh_var()).collect();
ctx.add_clause(vec![vars[0], vars[2]]);
ctx.add_clause(vec![vars[1], vars[3]]);

let (solution, cost) = ctx.minimize(&vars, &[1, 1, 5, 5], None, false).unwrap();
let solution = solution.expect("satisfiable");

assert_eq!(cost, 2);
assert!(solution.contains(&vars[0]) && solution.contains(&vars[1]));
```

# Backends

Concrete solvers are compiled in behind cargo features (all enabled by default) and chosen by
name at construction through [Config](crate::config::Config), so deployments can swap solvers
without code changes.
Any type implementing [SolveBackend](crate::backends::SolveBackend) may also be supplied
directly via [with_backend](crate::context::Context::with_backend) --- the test suite uses this
for instrumented mock solvers.

# Logs

Calls to [log!](log) are made at the points where a resolve can go quiet for a long time:
before each backend invocation, when the pseudo-boolean encoder eliminates terms, and around
every step of the bisection search.
Targets are listed in [misc::log] so output can be narrowed, e.g. `RUST_LOG=minimize=trace`
with [env_logger](https://docs.rs/env_logger/latest/env_logger/).
*/

pub mod backends;
pub mod config;
pub mod context;
pub mod db;
pub mod misc;
pub mod structures;
pub mod types;

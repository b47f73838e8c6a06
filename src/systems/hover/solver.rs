use argmin::{
    core::{observers::ObserverMode, CostFunction, Error, Executor, Gradient, State},
    solver::{linesearch::MoreThuenteLineSearch, quasinewton::LBFGS},
};
use argmin_observer_slog::SlogLogger;
use tracing::{debug, warn};

use crate::{
    components::HoverSolverConfig,
    utils::{bounded_derivative, to_bounded, to_unbounded, HoverError},
};

// Consecutive inner failures tolerated before the outer loop gives up
const MAX_SUBPROBLEM_FAILURES: usize = 3;
// Outer iterations allowed at the penalty cap without progress
const MAX_STALLED_ITERATIONS: usize = 3;
// Required reduction of the violation before the penalty is left alone
const VIOLATION_REDUCTION: f64 = 0.25;

/// A smooth objective with equality constraints `h(x) = 0` on a box.
pub trait EqualityConstrainedProblem {
    fn dimension(&self) -> usize;

    /// Lower and upper bound for each variable.
    fn bounds(&self) -> Vec<(f64, f64)>;

    fn objective(&self, x: &[f64]) -> f64;

    fn objective_gradient(&self, x: &[f64]) -> Vec<f64>;

    /// Constraint residuals, zero at a feasible point.
    fn constraints(&self, x: &[f64]) -> Vec<f64>;

    /// Jacobian of [`constraints`](Self::constraints), one row per constraint.
    fn constraint_jacobian(&self, x: &[f64]) -> Vec<Vec<f64>>;
}

/// Outcome of a constrained solve. Not converging is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedSolution {
    pub x: Vec<f64>,
    pub objective: f64,
    pub residuals: Vec<f64>,
    /// Largest absolute residual
    pub violation: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Augmented Lagrangian method with L-BFGS sub-problems.
///
/// Bounds are removed with the substitution `x = lo + (hi - lo)(1 + sin z) / 2`,
/// so every sub-problem is unconstrained in `z`.
#[derive(Debug, Clone)]
pub struct AugmentedLagrangian {
    settings: HoverSolverConfig,
}

/// `L(z) = f(x) + lambda . h(x) + mu / 2 |h(x)|^2` with `x = x(z)`
struct Subproblem<'a, P> {
    problem: &'a P,
    bounds: &'a [(f64, f64)],
    multipliers: &'a [f64],
    penalty: f64,
}

impl<P: EqualityConstrainedProblem> Subproblem<'_, P> {
    fn to_x(&self, z: &[f64]) -> Vec<f64> {
        z.iter()
            .zip(self.bounds)
            .map(|(z, (lo, hi))| to_bounded(*z, *lo, *hi))
            .collect()
    }
}

impl<P: EqualityConstrainedProblem> CostFunction for Subproblem<'_, P> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, z: &Self::Param) -> Result<Self::Output, Error> {
        let x = self.to_x(z);
        let h = self.problem.constraints(&x);
        let linear: f64 = h.iter().zip(self.multipliers).map(|(h, l)| h * l).sum();
        let quadratic: f64 = h.iter().map(|h| h * h).sum();
        let cost = self.problem.objective(&x) + linear + 0.5 * self.penalty * quadratic;
        if cost.is_finite() {
            Ok(cost)
        } else {
            Err(Error::msg("augmented Lagrangian is not finite"))
        }
    }
}

impl<P: EqualityConstrainedProblem> Gradient for Subproblem<'_, P> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, z: &Self::Param) -> Result<Self::Gradient, Error> {
        let x = self.to_x(z);
        let h = self.problem.constraints(&x);
        let jacobian = self.problem.constraint_jacobian(&x);
        let mut grad = self.problem.objective_gradient(&x);

        for ((row, h), l) in jacobian.iter().zip(&h).zip(self.multipliers) {
            let weight = l + self.penalty * h;
            for (g, dh) in grad.iter_mut().zip(row) {
                *g += weight * dh;
            }
        }

        // chain rule through the bound substitution
        for ((g, z), (lo, hi)) in grad.iter_mut().zip(z).zip(self.bounds) {
            *g *= bounded_derivative(*z, *lo, *hi);
        }
        Ok(grad)
    }
}

impl AugmentedLagrangian {
    pub fn new(settings: &HoverSolverConfig) -> Self {
        Self {
            settings: *settings,
        }
    }

    /// Minimizes the problem from `x0`.
    ///
    /// # Returns
    /// The last iterate with its residuals. `Err` only for a misconfigured solver
    /// or a malformed start point, never for a failure to converge.
    pub fn solve<P: EqualityConstrainedProblem>(
        &self,
        problem: &P,
        x0: &[f64],
    ) -> Result<ConstrainedSolution, HoverError> {
        let bounds = problem.bounds();
        if x0.len() != problem.dimension() || bounds.len() != problem.dimension() {
            return Err(HoverError::InvalidParameter(format!(
                "start point has {} entries, problem has {} variables",
                x0.len(),
                problem.dimension()
            )));
        }

        let mut z: Vec<f64> = x0
            .iter()
            .zip(&bounds)
            .map(|(x, (lo, hi))| to_unbounded(*x, *lo, *hi))
            .collect();
        let mut x: Vec<f64> = z
            .iter()
            .zip(&bounds)
            .map(|(z, (lo, hi))| to_bounded(*z, *lo, *hi))
            .collect();

        let mut residuals = problem.constraints(&x);
        let mut multipliers = vec![0.0; residuals.len()];
        let mut penalty = self.settings.initial_penalty;
        let mut objective = problem.objective(&x);
        let mut violation = max_abs(&residuals);

        let mut failures = 0;
        let mut stalled = 0;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.settings.max_outer_iterations {
            iterations += 1;
            let previous_objective = objective;
            let previous_violation = violation;

            let subproblem = Subproblem {
                problem,
                bounds: &bounds,
                multipliers: &multipliers,
                penalty,
            };
            match self.minimize(subproblem, &z) {
                Ok(next) => {
                    z = next;
                    failures = 0;
                }
                Err(err) => {
                    failures += 1;
                    warn!(
                        "Sub-problem {} failed ({}/{}): {}",
                        iterations, failures, MAX_SUBPROBLEM_FAILURES, err
                    );
                }
            }

            x = z
                .iter()
                .zip(&bounds)
                .map(|(z, (lo, hi))| to_bounded(*z, *lo, *hi))
                .collect();
            residuals = problem.constraints(&x);
            objective = problem.objective(&x);
            violation = max_abs(&residuals);

            // relative for large objectives, absolute below one
            let change = (objective - previous_objective).abs() / objective.abs().max(1.0);
            debug!(
                iteration = iterations,
                objective, violation, penalty, change, "augmented Lagrangian step"
            );

            if !(objective.is_finite() && violation.is_finite()) {
                warn!("Non-finite iterate after {} iterations", iterations);
                break;
            }
            if violation <= self.settings.constraint_tolerance
                && change <= self.settings.cost_tolerance
            {
                converged = true;
                break;
            }
            if failures >= MAX_SUBPROBLEM_FAILURES {
                break;
            }

            for (l, h) in multipliers.iter_mut().zip(&residuals) {
                *l += penalty * h;
            }
            if violation > VIOLATION_REDUCTION * previous_violation {
                if penalty >= self.settings.max_penalty {
                    stalled += 1;
                    if stalled >= MAX_STALLED_ITERATIONS {
                        debug!("Penalty cap reached without progress");
                        break;
                    }
                } else {
                    penalty = (penalty * self.settings.penalty_growth)
                        .min(self.settings.max_penalty);
                }
            } else {
                stalled = 0;
            }
        }

        Ok(ConstrainedSolution {
            x,
            objective,
            residuals,
            violation,
            iterations,
            converged,
        })
    }

    fn minimize<P: EqualityConstrainedProblem>(
        &self,
        subproblem: Subproblem<'_, P>,
        z0: &[f64],
    ) -> Result<Vec<f64>, Error> {
        let linesearch = MoreThuenteLineSearch::new().with_c(1e-4, 0.9)?;
        let solver = LBFGS::new(linesearch, self.settings.lbfgs_memory);

        let mut executor = Executor::new(subproblem, solver).configure(|state| {
            state
                .param(z0.to_vec())
                .max_iters(self.settings.max_iterations)
        });
        if self.settings.observe_optimizer {
            executor = executor.add_observer(SlogLogger::term(), ObserverMode::Always);
        }
        let result = executor.run()?;

        Ok(result
            .state()
            .get_best_param()
            .cloned()
            .unwrap_or_else(|| z0.to_vec()))
    }
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}

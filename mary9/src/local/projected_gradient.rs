#[cfg(test)]
#[path = "../../tests/unit/local/projected_gradient_test.rs"]
mod projected_gradient_test;

use super::*;
use crate::utils::{Environment, LogLevel, Subsystem, is_strictly_better};
use std::sync::Arc;

const ARMIJO_FACTOR: Float = 1e-4;
const BACKTRACK_FACTOR: Float = 0.5;
const MAX_BACKTRACKS: usize = 30;
const DEFAULT_TOLERANCE: Float = 1e-8;

/// A bound constrained projected gradient descent with central finite difference gradients
/// and Armijo backtracking line search.
pub struct ProjectedGradientSolver {
    max_iterations: usize,
    tolerance: Float,
    environment: Arc<Environment>,
}

impl ProjectedGradientSolver {
    /// Creates a new instance of `ProjectedGradientSolver`.
    pub fn new(max_iterations: usize, tolerance: Option<Float>, environment: Arc<Environment>) -> Self {
        Self { max_iterations, tolerance: tolerance.unwrap_or(DEFAULT_TOLERANCE), environment }
    }

    /// Returns iteration cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    fn estimate_gradient(&self, objective: &Objective, x: &[Float], evaluations: &mut usize) -> Vec<Float> {
        let bounds = objective.bounds();

        (0..x.len())
            .map(|dim| {
                let width = bounds.upper()[dim] - bounds.lower()[dim];
                let step = Float::EPSILON.cbrt() * width.max(x[dim].abs()).max(1.);

                let mut forward = x.to_vec();
                forward[dim] = (x[dim] + step).min(bounds.upper()[dim]);
                let mut backward = x.to_vec();
                backward[dim] = (x[dim] - step).max(bounds.lower()[dim]);

                *evaluations += 2;
                let span = forward[dim] - backward[dim];
                let slope = (objective.evaluate(forward.as_slice()) - objective.evaluate(backward.as_slice())) / span;

                if slope.is_finite() { slope } else { 0. }
            })
            .collect()
    }
}

impl LocalSolver for ProjectedGradientSolver {
    fn minimize(&self, objective: &Objective, x0: &[Float], id: &str) -> LocalResult {
        let bounds = objective.bounds();
        let project = |x: Vec<Float>| -> Vec<Float> {
            x.into_iter().zip(bounds.lower().iter().zip(bounds.upper().iter())).map(|(v, (l, u))| v.clamp(*l, *u)).collect()
        };

        let mut x = project(x0.to_vec());
        let mut value = objective.evaluate(x.as_slice());
        let mut evaluations = 1;
        let mut step_size = 1.;

        if !value.is_finite() {
            self.environment.log(Subsystem::Local, LogLevel::Warn, || {
                format!("local search {id}: non-finite start value {value}, skipped")
            });
            return LocalResult { x, objective_value: value, evaluations };
        }

        for iteration in 0..self.max_iterations {
            let gradient = self.estimate_gradient(objective, x.as_slice(), &mut evaluations);

            // projected gradient norm as a stationarity measure
            let projected_norm = project(x.iter().zip(gradient.iter()).map(|(v, g)| v - g).collect())
                .iter()
                .zip(x.iter())
                .map(|(p, v)| (v - p) * (v - p))
                .sum::<Float>()
                .sqrt();

            if projected_norm < self.tolerance {
                self.environment.log(Subsystem::Local, LogLevel::Debug, || {
                    format!("local search {id}: converged at iteration {iteration}, value {value}")
                });
                break;
            }

            let mut trial_step = step_size;
            let mut accepted = None;
            for _ in 0..MAX_BACKTRACKS {
                let candidate = project(x.iter().zip(gradient.iter()).map(|(v, g)| v - trial_step * g).collect());
                let decrease = candidate.iter().zip(x.iter()).zip(gradient.iter()).map(|((c, v), g)| g * (v - c)).sum::<Float>();

                let candidate_value = objective.evaluate(candidate.as_slice());
                evaluations += 1;

                if is_strictly_better(candidate_value, value) && value - candidate_value >= ARMIJO_FACTOR * decrease {
                    accepted = Some((candidate, candidate_value));
                    break;
                }

                trial_step *= BACKTRACK_FACTOR;
            }

            match accepted {
                Some((candidate, candidate_value)) => {
                    x = candidate;
                    value = candidate_value;
                    // allow the step to grow back after a successful iteration
                    step_size = trial_step * 2.;
                }
                None => break,
            }
        }

        self.environment.log(Subsystem::Local, LogLevel::Info, || {
            format!("local search {id}: finished with value {value} after {evaluations} evaluations")
        });

        LocalResult { x, objective_value: value, evaluations }
    }
}

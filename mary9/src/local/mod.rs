//! This module contains gradient based local solvers used for refinement and for the final
//! multi-start search.

mod projected_gradient;
pub use self::projected_gradient::ProjectedGradientSolver;

use crate::models::Objective;
use crate::utils::Float;

/// A result of a single local search.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalResult {
    /// The best point found in objective space.
    pub x: Vec<Float>,
    /// Objective value at `x`.
    pub objective_value: Float,
    /// Amount of objective evaluations spent.
    pub evaluations: usize,
}

/// A local solver. Implementations must not carry any state between `minimize` calls.
pub trait LocalSolver {
    /// Minimizes objective starting from `x0` given in objective space. `id` identifies the run in logs.
    fn minimize(&self, objective: &Objective, x0: &[Float], id: &str) -> LocalResult;
}

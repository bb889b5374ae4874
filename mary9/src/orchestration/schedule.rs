#[cfg(test)]
#[path = "../../tests/unit/orchestration/schedule_test.rs"]
mod schedule_test;

use crate::orchestration::BudgetPlan;
use crate::utils::Float;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// An operation activated within an outer iteration. Declaration order is the execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Activation {
    /// Advance the covariance adaptation heuristic.
    CmaEs,
    /// Advance the differential evolution heuristic.
    DiffEvol,
    /// Run initial refinements seeded from sampling leftovers.
    InitialRefine,
    /// Run runtime refinement of selected population members.
    RuntimeRefine,
}

impl Display for Activation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CmaEs => "CMAES",
            Self::DiffEvol => "DE",
            Self::InitialRefine => "InitialRefine",
            Self::RuntimeRefine => "RuntimeRefine",
        };

        write!(f, "{name}")
    }
}

const INITIAL_REFINE_CHECKPOINT: Float = 0.05;
const RUNTIME_REFINE_CHECKPOINTS: [Float; 3] = [0.3, 0.5, 0.7];

/// A deterministic activation calendar with one entry per outer iteration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    iterations: Vec<Vec<Activation>>,
}

impl Schedule {
    /// Builds a schedule from outer iteration count and iteration counts of both heuristics.
    pub fn new(outer_iterations: usize, cmaes_iterations: usize, diffevol_iterations: usize) -> Self {
        let cmaes_calls = get_call_indices(outer_iterations, cmaes_iterations);
        let diffevol_calls = get_call_indices(outer_iterations, diffevol_iterations);
        let initial_refine_calls = get_checkpoints(outer_iterations, &[INITIAL_REFINE_CHECKPOINT]);
        let runtime_refine_calls = get_checkpoints(outer_iterations, &RUNTIME_REFINE_CHECKPOINTS);

        let iterations = (0..outer_iterations)
            .map(|iteration| {
                [
                    (Activation::CmaEs, &cmaes_calls),
                    (Activation::DiffEvol, &diffevol_calls),
                    (Activation::InitialRefine, &initial_refine_calls),
                    (Activation::RuntimeRefine, &runtime_refine_calls),
                ]
                .into_iter()
                .filter(|(_, calls)| calls.contains(&iteration))
                .map(|(activation, _)| activation)
                .collect()
            })
            .collect();

        Self { iterations }
    }

    /// Builds a schedule from the budget plan.
    pub fn from_plan(plan: &BudgetPlan) -> Self {
        Self::new(plan.outer_iterations, plan.cmaes.iterations, plan.diffevol.iterations)
    }

    /// Returns amount of outer iterations.
    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    /// Returns true if schedule has no iterations.
    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// Returns activations of given outer iteration in execution order.
    pub fn get(&self, iteration: usize) -> &[Activation] {
        self.iterations.get(iteration).map(|activations| activations.as_slice()).unwrap_or(&[])
    }

    /// Checks whether activation is scheduled at given outer iteration.
    pub fn is_active(&self, iteration: usize, activation: Activation) -> bool {
        self.get(iteration).contains(&activation)
    }

    /// Returns all outer iterations where given activation is scheduled, in increasing order.
    pub fn indices_of(&self, activation: Activation) -> Vec<usize> {
        (0..self.len()).filter(|&iteration| self.is_active(iteration, activation)).collect()
    }
}

/// Returns `count` evenly spaced indices over `[0, outer)` rounded to nearest integer.
/// Collisions after rounding are merged.
fn get_call_indices(outer: usize, count: usize) -> FxHashSet<usize> {
    (0..count).map(|idx| (idx as Float * outer as Float / count as Float).round() as usize).collect()
}

fn get_checkpoints(outer: usize, fractions: &[Float]) -> FxHashSet<usize> {
    fractions.iter().map(|fraction| (fraction * outer as Float).round() as usize).collect()
}

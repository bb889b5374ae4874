#[cfg(test)]
#[path = "../../tests/unit/orchestration/final_search_test.rs"]
mod final_search_test;

use crate::local::LocalSolver;
use crate::models::{Objective, OptimizationResult, Population};
use crate::sampling::{SelectionStrategy, select_subsample};
use crate::utils::{Environment, Float, LogLevel, Subsystem, compare_floats};
use std::sync::Arc;

const FINAL_SEARCH_STRATEGY: SelectionStrategy = SelectionStrategy::new_unchecked(0.3, 0.3, 0.3, 0.1);

/// Runs independent local searches from a balanced subsample of surviving points and ranks results.
pub struct FinalSearch {
    local_searches: usize,
    solver: Box<dyn LocalSolver + Send + Sync>,
    objective: Arc<Objective>,
    environment: Arc<Environment>,
}

impl FinalSearch {
    /// Creates a new instance of `FinalSearch`.
    pub fn new(
        local_searches: usize,
        solver: Box<dyn LocalSolver + Send + Sync>,
        objective: Arc<Objective>,
        environment: Arc<Environment>,
    ) -> Self {
        Self { local_searches, solver, objective, environment }
    }

    /// Merges given populations into a fresh snapshot, runs local searches and returns results
    /// ranked best first together with the snapshot.
    pub fn run(&self, populations: &[&Population]) -> (Vec<OptimizationResult>, Population) {
        let snapshot = Population::merge_populations(populations);
        if snapshot.is_empty() {
            return (vec![], snapshot);
        }

        let ban_distance = 1. / snapshot.popsize() as Float;
        let subsample = select_subsample(
            &snapshot,
            self.local_searches,
            &FINAL_SEARCH_STRATEGY,
            ban_distance,
            self.environment.random.as_ref(),
        );

        let bounds = self.objective.bounds();
        let results = subsample
            .points
            .iter()
            .enumerate()
            .map(|(idx, point)| {
                let id = idx.to_string();
                let x0 = bounds.rescale_to_bounds(point.as_slice());
                let result = self.solver.minimize(self.objective.as_ref(), x0.as_slice(), id.as_str());

                OptimizationResult { x: result.x, value: result.objective_value, solver: id }
            })
            .collect::<Vec<_>>();

        let results = rank_results(results);

        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "final search: {} local searches from {} points, best value: {}",
                results.len(),
                snapshot.popsize(),
                results.first().map_or(Float::NAN, |result| result.value)
            )
        });

        (results, snapshot)
    }
}

/// Sorts results ascending by objective value, NaN values go last.
pub(crate) fn rank_results(mut results: Vec<OptimizationResult>) -> Vec<OptimizationResult> {
    results.sort_by(|a, b| compare_floats(a.value, b.value));
    results
}

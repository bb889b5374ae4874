#[cfg(test)]
#[path = "../../tests/unit/orchestration/refinement_test.rs"]
mod refinement_test;

use crate::local::LocalSolver;
use crate::models::{Objective, Population};
use crate::sampling::{SelectionStrategy, select_subsample};
use crate::utils::{Environment, Float, LogLevel, Subsystem};
use std::sync::Arc;

const RUNTIME_REFINE_STRATEGY: SelectionStrategy = SelectionStrategy::new_unchecked(0.2, 0.2, 0.5, 0.1);

/// Polishes selected members of both live populations with a local solver at fixed checkpoints
/// of the main loop. Every call consumes the next precomputed quota.
pub struct RuntimeRefinement {
    quotas: Vec<usize>,
    rounds: usize,
    solver: Box<dyn LocalSolver + Send + Sync>,
    objective: Arc<Objective>,
    environment: Arc<Environment>,
}

impl RuntimeRefinement {
    /// Creates a new instance of `RuntimeRefinement`.
    pub fn new(
        quotas: &[usize],
        solver: Box<dyn LocalSolver + Send + Sync>,
        objective: Arc<Objective>,
        environment: Arc<Environment>,
    ) -> Self {
        Self { quotas: quotas.to_vec(), rounds: 0, solver, objective, environment }
    }

    /// Returns amount of refinement rounds run so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Runs one refinement round over both populations and returns the amount of local searches.
    /// Selection happens on a merged snapshot, results are written back into the owning slots.
    pub fn run(&mut self, first: &mut Population, second: &mut Population) -> usize {
        let quota = self.quotas.get(self.rounds).copied().unwrap_or(0);
        let round = self.rounds;
        self.rounds += 1;

        let snapshot = Population::merge_populations(&[&*first, &*second]);
        if quota == 0 || snapshot.is_empty() {
            self.environment.log(Subsystem::Orchestrator, LogLevel::Warn, || {
                format!("refinement round {round} has nothing to refine")
            });
            return 0;
        }

        let ban_distance = 0.5 / snapshot.popsize() as Float;
        let subsample =
            select_subsample(&snapshot, quota, &RUNTIME_REFINE_STRATEGY, ban_distance, self.environment.random.as_ref());

        let bounds = self.objective.bounds();
        let (mut first_updates, mut second_updates) = (vec![], vec![]);

        subsample.chosen.iter().zip(subsample.points.iter()).for_each(|(&global_idx, point)| {
            let (is_first, slot) = locate_slot(global_idx, first.popsize());

            let x0 = bounds.rescale_to_bounds(point.as_slice());
            let result = self.solver.minimize(self.objective.as_ref(), x0.as_slice(), &format!("runtime-{round}-{slot}"));
            let update = (slot, bounds.unscale_from_bounds(result.x.as_slice()), result.objective_value);

            if is_first { first_updates.push(update) } else { second_updates.push(update) }
        });

        first.update_many(first_updates);
        second.update_many(second_updates);

        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "refinement round {round}: {} local searches, best fitness: {} / {}",
                subsample.chosen.len(),
                first.best_fitness(),
                second.best_fitness()
            )
        });

        subsample.chosen.len()
    }
}

/// Maps an index in a merged population back to its owning population and slot.
fn locate_slot(global_idx: usize, first_size: usize) -> (bool, usize) {
    if global_idx < first_size { (true, global_idx) } else { (false, global_idx - first_size) }
}

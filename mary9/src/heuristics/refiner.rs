#[cfg(test)]
#[path = "../../tests/unit/heuristics/refiner_test.rs"]
mod refiner_test;

use crate::algorithms::math::get_ranks;
use crate::local::{LocalSolver, ProjectedGradientSolver};
use crate::models::{Objective, Population};
use crate::utils::{Environment, Float, LogLevel, Subsystem};
use std::cmp::Ordering;
use std::sync::Arc;

const REFINEMENT_MAX_ITERATIONS: usize = 50;

/// Runs a short local search from every member of a small population once and keeps the results.
pub struct InitialRefiner {
    name: String,
    population: Population,
    solver: ProjectedGradientSolver,
    objective: Arc<Objective>,
    environment: Arc<Environment>,
}

impl InitialRefiner {
    /// Creates a new instance of `InitialRefiner`.
    pub fn new(
        name: &str,
        population: Population,
        objective: Arc<Objective>,
        tolerance: Option<Float>,
        environment: Arc<Environment>,
    ) -> Self {
        let solver = ProjectedGradientSolver::new(REFINEMENT_MAX_ITERATIONS, tolerance, environment.clone());

        Self { name: name.to_string(), population, solver, objective, environment }
    }

    /// Returns the population, refined if `run` was called.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Locally optimizes every member and writes the results back into their slots.
    pub fn run(&mut self) -> &Population {
        let bounds = self.objective.bounds();

        let updates = self
            .population
            .individuals()
            .iter()
            .enumerate()
            .map(|(idx, individual)| {
                let x0 = bounds.rescale_to_bounds(individual.x.as_slice());
                let result = self.solver.minimize(self.objective.as_ref(), x0.as_slice(), &format!("{}-{idx}", self.name));

                (idx, bounds.unscale_from_bounds(result.x.as_slice()), result.objective_value)
            })
            .collect::<Vec<_>>();

        self.population.update_many(updates);

        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "initial refinement '{}' finished {} local searches, best fitness: {}",
                self.name,
                self.population.popsize(),
                self.population.best_fitness()
            )
        });

        &self.population
    }
}

/// Creates a population for initial refinement from points which were evaluated during initial
/// sampling but not selected. Remaining points are ranked by the sum of their fitness rank and
/// their reversed diversity rank, the best `popsize` of them are taken.
pub fn setup_initial_refiner(full: &Population, remaining: &[usize], popsize: usize) -> Population {
    let candidates = remaining.iter().filter_map(|&idx| full.get(idx)).collect::<Vec<_>>();

    let fitness_ranks = get_ranks(candidates.iter().map(|individual| individual.fitness).collect::<Vec<_>>().as_slice());
    let diversity_ranks =
        get_ranks(candidates.iter().map(|individual| -individual.diversity).collect::<Vec<_>>().as_slice());

    let mut order = (0..candidates.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| match (fitness_ranks[a] + diversity_ranks[a]).cmp(&(fitness_ranks[b] + diversity_ranks[b])) {
        Ordering::Equal => a.cmp(&b),
        ordering => ordering,
    });

    Population::from_individuals(order.into_iter().take(popsize).map(|idx| candidates[idx].clone()).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/design_test.rs"]
mod design_test;

use crate::models::{Objective, Population};
use crate::sampling::{SelectionStrategy, select_subsample};
use crate::utils::{Environment, Float, LogLevel, Subsystem};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// A result of initial sampling.
pub struct InitialSample {
    /// Selected points which form a heuristic's starting population.
    pub selected: Population,
    /// All evaluated points.
    pub full: Population,
    /// Fitness of all evaluated points.
    pub fitness: Vec<Float>,
    /// Indices of points in the full population which were not selected.
    pub remaining: Vec<usize>,
}

/// Creates and evaluates an initial design of experiments.
pub struct Sampler {
    objective: Arc<Objective>,
    environment: Arc<Environment>,
}

impl Sampler {
    /// Creates a new instance of `Sampler`.
    pub fn new(objective: Arc<Objective>, environment: Arc<Environment>) -> Self {
        Self { objective, environment }
    }

    /// Evaluates a latin hypercube design of `max(sampling_budget, count)` points and selects
    /// `count` of them using given strategy.
    pub fn sample_initial_points(
        &self,
        count: usize,
        strategy: &SelectionStrategy,
        sampling_budget: usize,
    ) -> InitialSample {
        let size = sampling_budget.max(count);
        let points = self.create_latin_hypercube(size);
        let fitness = self.objective.evaluate_batch(points.as_slice(), self.environment.is_parallel);

        let full = Population::new(points, fitness.clone());
        let subsample = select_subsample(&full, count, strategy, 0., self.environment.random.as_ref());

        let chosen = subsample.chosen.iter().copied().collect::<FxHashSet<_>>();
        let remaining = (0..full.popsize()).filter(|idx| !chosen.contains(idx)).collect::<Vec<_>>();

        let selected = Population::from_individuals(
            subsample.chosen.iter().filter_map(|&idx| full.get(idx)).cloned().collect(),
        );

        self.environment.log(Subsystem::Global, LogLevel::Info, || {
            format!(
                "sampled {size} points, selected {}, best fitness: {}",
                selected.popsize(),
                selected.best_fitness()
            )
        });

        InitialSample { selected, full, fitness, remaining }
    }

    fn create_latin_hypercube(&self, size: usize) -> Vec<Vec<Float>> {
        let random = self.environment.random.as_ref();
        let dimensions = self.objective.dimensions();

        let strata = (0..dimensions)
            .map(|_| {
                let mut permutation = (0..size).collect::<Vec<_>>();
                random.shuffle(permutation.as_mut_slice());
                permutation
            })
            .collect::<Vec<_>>();

        (0..size)
            .map(|idx| {
                strata
                    .iter()
                    .map(|permutation| (permutation[idx] as Float + random.uniform_real(0., 1.)) / size as Float)
                    .collect()
            })
            .collect()
    }
}

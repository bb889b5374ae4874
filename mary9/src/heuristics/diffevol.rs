#[cfg(test)]
#[path = "../../tests/unit/heuristics/diffevol_test.rs"]
mod diffevol_test;

use super::*;
use crate::models::Objective;
use crate::utils::{Environment, Float, LogLevel, Random, Subsystem, is_strictly_better};
use std::sync::Arc;

const CROSSOVER_RATE: Float = 0.7;
const MUTATION_RANGE: (Float, Float) = (0.5, 1.);

/// A differential evolution which uses `best/1/bin` scheme with dithered mutation factor.
/// Trial vectors replace their targets only when they are strictly better, so members inserted
/// from outside persist until beaten.
pub struct DiffEvolHeuristic {
    objective: Arc<Objective>,
    environment: Arc<Environment>,
    population: Population,
    generation: usize,
}

impl DiffEvolHeuristic {
    /// Creates a new instance of `DiffEvolHeuristic` starting from given population.
    pub fn new(population: Population, objective: Arc<Objective>, environment: Arc<Environment>) -> Self {
        Self { objective, environment, population, generation: 0 }
    }

    fn create_trials(&self, random: &(dyn Random + Send + Sync)) -> Vec<Vec<Float>> {
        let individuals = self.population.individuals();
        let size = individuals.len();
        let best = self.population.best_index().unwrap_or(0);
        let factor = random.uniform_real(MUTATION_RANGE.0, MUTATION_RANGE.1);

        individuals
            .iter()
            .enumerate()
            .map(|(idx, target)| {
                let (r1, r2) = select_donors(random, size, idx, best);
                let forced = random.uniform_int(0, target.x.len() as i32 - 1) as usize;

                target
                    .x
                    .iter()
                    .enumerate()
                    .map(|(dim, &value)| {
                        if dim == forced || random.is_hit(CROSSOVER_RATE) {
                            let mutant =
                                individuals[best].x[dim] + factor * (individuals[r1].x[dim] - individuals[r2].x[dim]);
                            mutant.clamp(0., 1.)
                        } else {
                            value
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl GlobalHeuristic for DiffEvolHeuristic {
    fn name(&self) -> &str {
        "DE"
    }

    fn advance(&mut self) {
        if self.population.popsize() < 2 {
            return;
        }

        let trials = self.create_trials(self.environment.random.as_ref());
        let fitness = self.objective.evaluate_batch(trials.as_slice(), self.environment.is_parallel);

        let updates = trials
            .into_iter()
            .zip(fitness)
            .enumerate()
            .filter(|(idx, (_, fitness))| is_strictly_better(*fitness, self.population.individuals()[*idx].fitness))
            .map(|(idx, (x, fitness))| (idx, x, fitness))
            .collect::<Vec<_>>();

        let improved = updates.len();
        self.population.update_many(updates);
        self.generation += 1;

        self.environment.log(Subsystem::Global, LogLevel::Debug, || {
            format!(
                "DE generation {}: improved {improved} of {}, best fitness {}",
                self.generation,
                self.population.popsize(),
                self.population.best_fitness()
            )
        });
    }

    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }
}

/// Picks two distinct donor indices which differ from target and, when possible, from best.
fn select_donors(random: &(dyn Random + Send + Sync), size: usize, target: usize, best: usize) -> (usize, usize) {
    let mut candidates = (0..size).filter(|&idx| idx != target && idx != best).collect::<Vec<_>>();
    if candidates.len() < 2 {
        candidates = (0..size).filter(|&idx| idx != target).collect();
    }

    if candidates.len() < 2 {
        return (candidates[0], candidates[0]);
    }

    random.shuffle(candidates.as_mut_slice());

    (candidates[0], candidates[1])
}

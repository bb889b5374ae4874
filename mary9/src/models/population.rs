#[cfg(test)]
#[path = "../../tests/unit/models/population_test.rs"]
mod population_test;

use crate::algorithms::math::{euclidean_distance, nan_min, nan_percentile};
use crate::utils::{Float, compare_floats};

/// One candidate solution with its fitness and diversity relative to its population.
#[derive(Clone, Debug, PartialEq)]
pub struct Individual {
    /// A parameter vector in normalized `[0, 1]^n` coordinates.
    pub x: Vec<Float>,
    /// A fitness value, lower is better. NaN marks a failed evaluation.
    pub fitness: Float,
    /// A distance to the nearest other member of the population.
    pub diversity: Float,
}

impl Individual {
    /// Creates a new instance of `Individual` with unknown diversity.
    pub fn new(x: Vec<Float>, fitness: Float) -> Self {
        Self { x, fitness, diversity: 0. }
    }
}

/// A fixed size, index addressable collection of individuals. Size changes only on creation
/// and merge. Diversity values are kept consistent after every mutation.
#[derive(Clone, Debug, Default)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Creates a new instance of `Population` from points and their fitness values.
    /// Both vectors are expected to have the same length, extra values are ignored.
    pub fn new(points: Vec<Vec<Float>>, fitness: Vec<Float>) -> Self {
        debug_assert_eq!(points.len(), fitness.len());

        Self::from_individuals(points.into_iter().zip(fitness).map(|(x, fitness)| Individual::new(x, fitness)).collect())
    }

    /// Creates a new instance of `Population` from given individuals.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        let mut population = Self { individuals };
        population.refresh_diversity();

        population
    }

    /// Merges populations into a new, independent population keeping their order.
    pub fn merge_populations(populations: &[&Population]) -> Population {
        Self::from_individuals(populations.iter().flat_map(|population| population.individuals.iter().cloned()).collect())
    }

    /// Returns population size.
    pub fn popsize(&self) -> usize {
        self.individuals.len()
    }

    /// Returns true if population has no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns all individuals.
    pub fn individuals(&self) -> &[Individual] {
        self.individuals.as_slice()
    }

    /// Returns individual at given index.
    pub fn get(&self, idx: usize) -> Option<&Individual> {
        self.individuals.get(idx)
    }

    /// Returns a snapshot of fitness values.
    pub fn get_fitness(&self) -> Vec<Float> {
        self.individuals.iter().map(|individual| individual.fitness).collect()
    }

    /// Returns a snapshot of diversity values.
    pub fn get_diversity(&self) -> Vec<Float> {
        self.individuals.iter().map(|individual| individual.diversity).collect()
    }

    /// Returns the best (lowest) fitness ignoring NaN. NaN is returned when nothing else is known.
    pub fn best_fitness(&self) -> Float {
        nan_min(self.get_fitness().as_slice())
    }

    /// Returns the index of the best individual.
    pub fn best_index(&self) -> Option<usize> {
        (0..self.individuals.len())
            .min_by(|&a, &b| compare_floats(self.individuals[a].fitness, self.individuals[b].fitness))
    }

    /// Returns q-th percentile of fitness values ignoring NaN.
    pub fn percentile_fitness(&self, q: Float) -> Float {
        nan_percentile(self.get_fitness().as_slice(), q)
    }

    /// Checks whether any member lies closer than `tolerance` to given point.
    pub fn contains_close(&self, x: &[Float], tolerance: Float) -> bool {
        self.individuals.iter().any(|individual| euclidean_distance(individual.x.as_slice(), x) < tolerance)
    }

    /// Replaces an individual at given slot with a copy of another one.
    pub fn replace(&mut self, idx: usize, individual: Individual) {
        self.individuals[idx] = individual;
        self.refresh_diversity();
    }

    /// Updates parameters and fitness of an individual at given slot.
    pub fn update(&mut self, idx: usize, x: Vec<Float>, fitness: Float) {
        self.update_many(vec![(idx, x, fitness)]);
    }

    /// Updates many slots at once.
    pub fn update_many(&mut self, updates: Vec<(usize, Vec<Float>, Float)>) {
        if updates.is_empty() {
            return;
        }

        updates.into_iter().for_each(|(idx, x, fitness)| {
            let individual = &mut self.individuals[idx];
            individual.x = x;
            individual.fitness = fitness;
        });

        self.refresh_diversity();
    }

    /// Replaces all members keeping population size. Points beyond population size are ignored.
    pub fn replace_all(&mut self, points: Vec<Vec<Float>>, fitness: Vec<Float>) {
        debug_assert_eq!(points.len(), self.individuals.len());

        let size = self.individuals.len();
        self.update_many(
            points.into_iter().zip(fitness).take(size).enumerate().map(|(idx, (x, fitness))| (idx, x, fitness)).collect(),
        );
    }

    fn refresh_diversity(&mut self) {
        let diversity = (0..self.individuals.len())
            .map(|idx| {
                self.individuals
                    .iter()
                    .enumerate()
                    .filter(|(other_idx, _)| *other_idx != idx)
                    .map(|(_, other)| euclidean_distance(self.individuals[idx].x.as_slice(), other.x.as_slice()))
                    .min_by(|a, b| compare_floats(*a, *b))
                    .unwrap_or(0.)
            })
            .collect::<Vec<_>>();

        self.individuals.iter_mut().zip(diversity).for_each(|(individual, diversity)| individual.diversity = diversity);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/selection_test.rs"]
mod selection_test;

use crate::algorithms::math::{euclidean_distance, get_ranks};
use crate::models::Population;
use crate::sampling::SelectionStrategy;
use crate::utils::{Float, Random, compare_floats};
use std::cmp::Ordering;

/// A subsample taken from a population.
#[derive(Clone, Debug, Default)]
pub struct Subsample {
    /// Selected points in normalized coordinates.
    pub points: Vec<Vec<Float>>,
    /// Indices of selected points in the population, in selection order.
    pub chosen: Vec<usize>,
}

/// Selects up to `count` members from population using selection strategy. Categories are
/// filled in order elite, diverse, random, other; a candidate is skipped if it lies closer than
/// `ban_distance` to any already chosen point. A category which runs out of admissible
/// candidates leaves its slots unfilled.
pub fn select_subsample(
    population: &Population,
    count: usize,
    strategy: &SelectionStrategy,
    ban_distance: Float,
    random: &(dyn Random + Send + Sync),
) -> Subsample {
    let count = count.min(population.popsize());
    if count == 0 {
        return Subsample::default();
    }

    let orders = [
        get_elite_order(population),
        get_diverse_order(population),
        get_random_order(population, random),
        get_other_order(population),
    ];

    let mut chosen: Vec<usize> = Vec::with_capacity(count);
    let mut is_chosen = vec![false; population.popsize()];

    strategy.split(count).into_iter().zip(orders).for_each(|(amount, order)| {
        let mut taken = 0;
        for idx in order {
            if taken == amount {
                break;
            }

            if is_chosen[idx] || is_banned(population, &chosen, idx, ban_distance) {
                continue;
            }

            is_chosen[idx] = true;
            chosen.push(idx);
            taken += 1;
        }
    });

    let points = chosen.iter().filter_map(|&idx| population.get(idx)).map(|individual| individual.x.clone()).collect();

    Subsample { points, chosen }
}

/// Returns indices of `count` weakest members: highest fitness first, NaN is considered the worst.
pub fn select_weakest_sample(population: &Population, count: usize) -> Vec<usize> {
    let fitness = population.get_fitness();
    let mut order = (0..population.popsize()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| compare_floats(fitness[b], fitness[a]));
    order.truncate(count);

    order
}

fn is_banned(population: &Population, chosen: &[usize], candidate: usize, ban_distance: Float) -> bool {
    if ban_distance <= 0. {
        return false;
    }

    let individuals = population.individuals();
    chosen.iter().any(|&idx| {
        euclidean_distance(individuals[idx].x.as_slice(), individuals[candidate].x.as_slice()) < ban_distance
    })
}

fn get_elite_order(population: &Population) -> Vec<usize> {
    let fitness = population.get_fitness();
    let mut order = (0..population.popsize()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| compare_floats(fitness[a], fitness[b]));

    order
}

fn get_diverse_order(population: &Population) -> Vec<usize> {
    let diversity = population.get_diversity();
    let mut order = (0..population.popsize()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| compare_floats(diversity[b], diversity[a]));

    order
}

fn get_random_order(population: &Population, random: &(dyn Random + Send + Sync)) -> Vec<usize> {
    let mut order = (0..population.popsize()).collect::<Vec<_>>();
    random.shuffle(order.as_mut_slice());

    order
}

/// Orders members by the sum of their fitness rank and their reversed diversity rank.
pub(crate) fn get_other_order(population: &Population) -> Vec<usize> {
    let fitness_ranks = get_ranks(population.get_fitness().as_slice());
    let diversity_ranks = get_ranks(population.get_diversity().iter().map(|value| -value).collect::<Vec<_>>().as_slice());

    let mut order = (0..population.popsize()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| match (fitness_ranks[a] + diversity_ranks[a]).cmp(&(fitness_ranks[b] + diversity_ranks[b])) {
        Ordering::Equal => a.cmp(&b),
        ordering => ordering,
    });

    order
}

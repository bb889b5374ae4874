#[cfg(test)]
#[path = "../../tests/unit/orchestration/exchange_test.rs"]
mod exchange_test;

use crate::models::Population;
use crate::sampling::{SelectionStrategy, select_subsample, select_weakest_sample};
use crate::utils::{Float, OptimizerError, Random, is_strictly_better};
use std::str::FromStr;

/// A minimal distance between a migrant and any destination member.
pub const DUPLICATE_DISTANCE: Float = 1e-4;

/// A percentile of destination fitness used by in-between policy.
const IN_BETWEEN_PERCENTILE: Float = 5.;

/// Specifies a fitness threshold a migrant has to beat strictly to replace a destination member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplacementPolicy {
    /// Migrant has to beat the current best of destination.
    OnlyBest,
    /// Migrant has to beat the member it replaces.
    AlwaysIfBetter,
    /// Migrant has to beat the 5th percentile of destination fitness.
    InBetween,
}

impl ReplacementPolicy {
    /// Returns threshold for replacing given slot of destination population.
    pub fn threshold(&self, destination: &Population, slot: usize) -> Float {
        match self {
            Self::OnlyBest => only_best_threshold(destination),
            Self::AlwaysIfBetter => always_if_better_threshold(destination, slot),
            Self::InBetween => in_between_threshold(destination),
        }
    }

    /// Returns a threshold fixed for the whole exchange, if the policy has one. In-between
    /// percentile is taken once from destination before any replacement.
    pub fn fixed_threshold(&self, destination: &Population) -> Option<Float> {
        match self {
            Self::InBetween => Some(in_between_threshold(destination)),
            Self::OnlyBest | Self::AlwaysIfBetter => None,
        }
    }
}

impl FromStr for ReplacementPolicy {
    type Err = OptimizerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "only best" => Ok(Self::OnlyBest),
            "always if better" => Ok(Self::AlwaysIfBetter),
            "in between" => Ok(Self::InBetween),
            _ => Err(OptimizerError::UnknownPolicy(value.to_string())),
        }
    }
}

fn only_best_threshold(destination: &Population) -> Float {
    destination.best_fitness()
}

fn always_if_better_threshold(destination: &Population, slot: usize) -> Float {
    destination.get(slot).map_or(Float::NAN, |individual| individual.fitness)
}

fn in_between_threshold(destination: &Population) -> Float {
    destination.percentile_fitness(IN_BETWEEN_PERCENTILE)
}

/// Parameters of one knowledge exchange.
#[derive(Clone, Debug)]
pub struct ExchangeSettings {
    /// Maximum amount of migrants.
    pub quota: usize,
    /// A selection strategy used to pick migrants from source.
    pub strategy: SelectionStrategy,
    /// A replacement threshold policy.
    pub policy: ReplacementPolicy,
    /// If set, exchange happens only when source has strictly better best fitness than destination.
    pub require_new_best: bool,
}

/// Copies selected members of source population into the weakest slots of destination.
/// In-between threshold is fixed before the first replacement, the others are evaluated against
/// destination as it is at the moment of each replacement. Source is never modified.
/// Returns the amount of replaced slots.
pub fn share_knowledge(
    source: &Population,
    destination: &mut Population,
    settings: &ExchangeSettings,
    random: &(dyn Random + Send + Sync),
) -> usize {
    if settings.quota == 0 || source.is_empty() || destination.is_empty() {
        return 0;
    }

    if settings.require_new_best && !is_strictly_better(source.best_fitness(), destination.best_fitness()) {
        return 0;
    }

    let ban_distance = 0.25 / source.popsize() as Float;
    let candidates = select_subsample(source, settings.quota, &settings.strategy, ban_distance, random);
    let slots = select_weakest_sample(destination, settings.quota);
    let fixed_threshold = settings.policy.fixed_threshold(destination);

    candidates.chosen.iter().zip(slots.iter()).fold(0, |replaced, (&candidate, &slot)| {
        let Some(migrant) = source.get(candidate) else { return replaced };

        let threshold = fixed_threshold.unwrap_or_else(|| settings.policy.threshold(destination, slot));
        if !is_strictly_better(migrant.fitness, threshold)
            || destination.contains_close(migrant.x.as_slice(), DUPLICATE_DISTANCE)
        {
            return replaced;
        }

        destination.replace(slot, migrant.clone());
        replaced + 1
    })
}

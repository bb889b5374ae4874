#[cfg(test)]
#[path = "../../tests/unit/sampling/strategy_test.rs"]
mod strategy_test;

use crate::utils::{Float, GenericResult};

const WEIGHT_SUM_TOLERANCE: Float = 1e-6;

/// Specifies how a subsample is composed: shares of elite (best fitness), diverse (most isolated),
/// random and other (balanced fitness and diversity rank) points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionStrategy {
    /// Share of points picked by fitness.
    pub elite: Float,
    /// Share of points picked by diversity.
    pub diverse: Float,
    /// Share of points picked randomly.
    pub random: Float,
    /// Share of points picked by combined fitness and diversity rank.
    pub other: Float,
}

impl SelectionStrategy {
    /// Creates a new instance of `SelectionStrategy` checking that weights are non-negative and sum to one.
    pub fn new(elite: Float, diverse: Float, random: Float, other: Float) -> GenericResult<Self> {
        let weights = [elite, diverse, random, other];

        if weights.iter().any(|weight| !(*weight >= 0.)) {
            return Err(format!("selection weights should be non-negative: {weights:?}").into());
        }

        let sum = weights.iter().sum::<Float>();
        if (sum - 1.).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("selection weights should sum to one, got {sum}").into());
        }

        Ok(Self { elite, diverse, random, other })
    }

    /// Creates a strategy from constant weights known to be valid.
    pub(crate) const fn new_unchecked(elite: Float, diverse: Float, random: Float, other: Float) -> Self {
        Self { elite, diverse, random, other }
    }

    /// Splits `count` into per category amounts in order elite, diverse, random, other using
    /// largest remainder rounding, so amounts always sum to `count`.
    pub fn split(&self, count: usize) -> [usize; 4] {
        let raw = [self.elite, self.diverse, self.random, self.other].map(|weight| weight * count as Float);
        let mut amounts = raw.map(|value| value.floor() as usize);

        let mut by_remainder = (0..4).collect::<Vec<_>>();
        by_remainder.sort_by(|&a, &b| {
            let (ra, rb) = (raw[a] - raw[a].floor(), raw[b] - raw[b].floor());
            rb.total_cmp(&ra).then(a.cmp(&b))
        });

        let assigned = amounts.iter().sum::<usize>();
        by_remainder.into_iter().take(count.saturating_sub(assigned)).for_each(|idx| amounts[idx] += 1);

        amounts
    }
}

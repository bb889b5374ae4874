#[cfg(test)]
#[path = "../../../tests/unit/algorithms/math/statistics_test.rs"]
mod statistics_test;

use crate::utils::{Float, compare_floats, compare_floats_refs};

/// Returns minimum of values ignoring NaN. Returns NaN if there are only NaN values or no values at all.
pub fn nan_min(values: &[Float]) -> Float {
    values.iter().copied().filter(|value| !value.is_nan()).min_by(|a, b| compare_floats(*a, *b)).unwrap_or(Float::NAN)
}

/// Returns q-th percentile (`q` in `[0, 100]`) of values ignoring NaN, using linear interpolation
/// between closest ranks. Returns NaN if there are no values which are not NaN.
pub fn nan_percentile(values: &[Float], q: Float) -> Float {
    let mut values = values.iter().copied().filter(|value| !value.is_nan()).collect::<Vec<_>>();
    if values.is_empty() {
        return Float::NAN;
    }

    values.sort_by(compare_floats_refs);

    let position = (q.clamp(0., 100.) / 100.) * (values.len() - 1) as Float;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as Float;

    values[lower] + (values[upper] - values[lower]) * fraction
}

/// Returns ranks of values in ascending order (0 is the lowest value, NaN values get highest ranks).
/// Ties are ranked by their original position.
pub fn get_ranks(values: &[Float]) -> Vec<usize> {
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| compare_floats(values[a], values[b]));

    let mut ranks = vec![0; values.len()];
    order.into_iter().enumerate().for_each(|(rank, idx)| ranks[idx] = rank);

    ranks
}

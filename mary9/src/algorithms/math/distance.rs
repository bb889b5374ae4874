#[cfg(test)]
#[path = "../../../tests/unit/algorithms/math/distance_test.rs"]
mod distance_test;

use crate::utils::Float;

/// Calculates euclidean distance between two vectors.
pub fn euclidean_distance(a: &[Float], b: &[Float]) -> Float {
    a.iter().zip(b.iter()).fold(0., |acc, (a, b)| acc + (a - b) * (a - b)).sqrt()
}

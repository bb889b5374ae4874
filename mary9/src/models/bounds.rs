#[cfg(test)]
#[path = "../../tests/unit/models/bounds_test.rs"]
mod bounds_test;

use crate::utils::{Float, GenericResult};

/// Box constraints of the parameter space. All search is done in normalized `[0, 1]^n`
/// coordinates, bounds are used to convert at objective and local solver boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    lower: Vec<Float>,
    upper: Vec<Float>,
}

impl Bounds {
    /// Creates a new instance of `Bounds` validating that both vectors have the same non-zero
    /// length and that lower bound is strictly below upper one in every dimension.
    pub fn new(lower: Vec<Float>, upper: Vec<Float>) -> GenericResult<Self> {
        if lower.len() != upper.len() {
            return Err(format!("lower bounds have {} values, upper bounds have {}", lower.len(), upper.len()).into());
        }

        if lower.is_empty() {
            return Err("bounds should have at least one dimension".into());
        }

        if let Some(idx) = lower.iter().zip(upper.iter()).position(|(l, u)| !(l < u)) {
            return Err(format!(
                "lower bound should be strictly below upper one, dimension {idx}: {} >= {}",
                lower[idx], upper[idx]
            )
            .into());
        }

        Ok(Self { lower, upper })
    }

    /// Returns amount of dimensions.
    pub fn dimensions(&self) -> usize {
        self.lower.len()
    }

    /// Returns lower bounds.
    pub fn lower(&self) -> &[Float] {
        self.lower.as_slice()
    }

    /// Returns upper bounds.
    pub fn upper(&self) -> &[Float] {
        self.upper.as_slice()
    }

    /// Converts a point from normalized coordinates into objective space.
    pub fn rescale_to_bounds(&self, parameters: &[Float]) -> Vec<Float> {
        parameters.iter().zip(self.lower.iter().zip(self.upper.iter())).map(|(p, (l, u))| l + p * (u - l)).collect()
    }

    /// Converts a point from objective space into normalized coordinates.
    pub fn unscale_from_bounds(&self, parameters: &[Float]) -> Vec<Float> {
        parameters.iter().zip(self.lower.iter().zip(self.upper.iter())).map(|(p, (l, u))| (p - l) / (u - l)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/objective_test.rs"]
mod objective_test;

use crate::models::Bounds;
use crate::utils::{Float, parallel_collect};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An objective function which maps a parameter vector in objective space to a fitness value.
/// NaN is a valid result which marks a failed or infeasible evaluation.
pub type ObjectiveFn = Arc<dyn Fn(&[Float]) -> Float + Send + Sync>;

/// Wraps an objective function together with its bounds and counts evaluations.
pub struct Objective {
    func: ObjectiveFn,
    bounds: Bounds,
    evaluations: AtomicUsize,
}

impl Objective {
    /// Creates a new instance of `Objective`.
    pub fn new(func: ObjectiveFn, bounds: Bounds) -> Self {
        Self { func, bounds, evaluations: AtomicUsize::new(0) }
    }

    /// Returns bounds of the parameter space.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Returns amount of dimensions.
    pub fn dimensions(&self) -> usize {
        self.bounds.dimensions()
    }

    /// Evaluates a point given in objective space.
    pub fn evaluate(&self, x: &[Float]) -> Float {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        (self.func)(x)
    }

    /// Evaluates a point given in normalized coordinates.
    pub fn evaluate_normalized(&self, x: &[Float]) -> Float {
        self.evaluate(self.bounds.rescale_to_bounds(x).as_slice())
    }

    /// Evaluates many points given in normalized coordinates, optionally in parallel.
    /// Results are returned in the same order as points.
    pub fn evaluate_batch(&self, points: &[Vec<Float>], is_parallel: bool) -> Vec<Float> {
        if is_parallel {
            parallel_collect(points, |x| self.evaluate_normalized(x.as_slice()))
        } else {
            points.iter().map(|x| self.evaluate_normalized(x.as_slice())).collect()
        }
    }

    /// Returns total amount of objective function calls done so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }
}

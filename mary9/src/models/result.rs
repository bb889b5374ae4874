use crate::models::Population;
use crate::orchestration::RunMetrics;
use crate::utils::Float;

/// A result of one local search run in objective space.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimizationResult {
    /// A parameter vector in objective space.
    pub x: Vec<Float>,
    /// An objective value at `x`.
    pub value: Float,
    /// An identifier of the solver run which produced the result.
    pub solver: String,
}

/// A final output of the optimizer.
pub struct OptimizationOutcome {
    /// Local search results ranked by objective value, best first.
    pub results: Vec<OptimizationResult>,
    /// A merged snapshot of both heuristic populations at the end of the main loop.
    pub final_population: Population,
    /// Run metrics collected by the main loop.
    pub metrics: RunMetrics,
}

impl OptimizationOutcome {
    /// Returns the best result, if any.
    pub fn best(&self) -> Option<&OptimizationResult> {
        self.results.first()
    }
}

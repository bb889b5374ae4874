//! A module which provides the logic to collect metrics about the main loop execution.

#[cfg(test)]
#[path = "../../tests/unit/orchestration/telemetry_test.rs"]
mod telemetry_test;

use crate::orchestration::Activation;
use crate::utils::{Float, Timer};

/// Keeps state of both populations after one outer iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationRecord {
    /// Outer iteration index.
    pub iteration: usize,
    /// Activations executed within the iteration.
    pub activations: Vec<Activation>,
    /// Best fitness of the covariance adaptation population.
    pub cmaes_best: Float,
    /// Best fitness of the differential evolution population.
    pub diffevol_best: Float,
}

/// Keeps a single knowledge exchange attempt. Attempts blocked by the improvement gate are
/// recorded with zero replacements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeRecord {
    /// Outer iteration index.
    pub iteration: usize,
    /// An activation which produced migrants.
    pub source: Activation,
    /// An activation which owns the receiving population.
    pub destination: Activation,
    /// Maximum amount of migrants.
    pub quota: usize,
    /// Amount of replaced slots.
    pub replaced: usize,
}

/// Encapsulates measurements of the whole run.
#[derive(Clone, Debug, Default)]
pub struct RunMetrics {
    /// Per iteration records.
    pub iterations: Vec<IterationRecord>,
    /// Knowledge exchange attempts in execution order.
    pub exchange_records: Vec<ExchangeRecord>,
    /// Total amount of points copied between populations.
    pub exchanges: usize,
    /// Amount of local searches run during initial and runtime refinement.
    pub refinements: usize,
    /// Amount of local searches run by the final stage.
    pub local_searches: usize,
    /// Total amount of objective evaluations.
    pub evaluations: usize,
    /// Run duration in milliseconds.
    pub duration: usize,
}

/// Collects run metrics.
pub(crate) struct Telemetry {
    metrics: RunMetrics,
    timer: Timer,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry` and starts its timer.
    pub fn new() -> Self {
        Self { metrics: RunMetrics::default(), timer: Timer::start() }
    }

    pub fn on_iteration(&mut self, iteration: usize, activations: &[Activation], cmaes_best: Float, diffevol_best: Float) {
        self.metrics.iterations.push(IterationRecord {
            iteration,
            activations: activations.to_vec(),
            cmaes_best,
            diffevol_best,
        });
    }

    pub fn on_exchange(&mut self, record: ExchangeRecord) {
        self.metrics.exchanges += record.replaced;
        self.metrics.exchange_records.push(record);
    }

    pub fn on_refinement(&mut self, local_searches: usize) {
        self.metrics.refinements += local_searches;
    }

    /// Finalizes metrics with final stage information.
    pub fn finish(mut self, local_searches: usize, evaluations: usize) -> RunMetrics {
        self.metrics.local_searches = local_searches;
        self.metrics.evaluations = evaluations;
        self.metrics.duration = self.timer.elapsed_millis() as usize;

        self.metrics
    }
}

#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{DefaultRandom, Random};
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the optimizer.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Specifies a subsystem which produces log messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subsystem {
    /// The orchestration layer: budget, schedule, exchange and refinement stages.
    Orchestrator,
    /// Global population based heuristics.
    Global,
    /// Gradient based local solvers.
    Local,
}

/// Specifies verbosity of a log message or a threshold for a subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing is logged.
    Off,
    /// Only warnings are logged.
    Warn,
    /// Progress information.
    Info,
    /// Detailed information.
    Debug,
}

/// Keeps verbosity threshold per subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogLevels {
    /// Threshold for orchestration messages.
    pub orchestrator: LogLevel,
    /// Threshold for global heuristics messages.
    pub global: LogLevel,
    /// Threshold for local solver messages.
    pub local: LogLevel,
}

impl LogLevels {
    /// Returns the threshold of given subsystem.
    pub fn get(&self, subsystem: Subsystem) -> LogLevel {
        match subsystem {
            Subsystem::Orchestrator => self.orchestrator,
            Subsystem::Global => self.global,
            Subsystem::Local => self.local,
        }
    }

    /// Returns levels which disable logging for every subsystem.
    pub fn silent() -> Self {
        Self { orchestrator: LogLevel::Off, global: LogLevel::Off, local: LogLevel::Off }
    }
}

impl Default for LogLevels {
    fn default() -> Self {
        Self { orchestrator: LogLevel::Debug, global: LogLevel::Warn, local: LogLevel::Warn }
    }
}

/// Keeps track of environment specific information which influences algorithm behavior.
#[derive(Clone)]
pub struct Environment {
    /// A wrapper on random generator.
    pub random: Arc<dyn Random + Send + Sync>,

    /// An information logger.
    pub logger: InfoLogger,

    /// Verbosity per subsystem.
    pub levels: LogLevels,

    /// Specifies whether batch evaluations can be run in parallel.
    pub is_parallel: bool,
}

impl Environment {
    /// Creates an instance of `Environment` with repeatable random and given logger.
    pub fn new(seed: u64, logger: InfoLogger, levels: LogLevels) -> Self {
        Self { random: Arc::new(DefaultRandom::new_repeatable(seed)), logger, levels, is_parallel: true }
    }

    /// Returns true if a message of given level and subsystem would be logged.
    pub fn is_enabled(&self, subsystem: Subsystem, level: LogLevel) -> bool {
        level != LogLevel::Off && level <= self.levels.get(subsystem)
    }

    /// Logs a message produced lazily by `message_fn` if the subsystem's threshold allows it.
    pub fn log<F>(&self, subsystem: Subsystem, level: LogLevel, message_fn: F)
    where
        F: FnOnce() -> String,
    {
        if self.is_enabled(subsystem, level) {
            (self.logger)(message_fn().as_str())
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(0, Arc::new(|_| {}), LogLevels::default())
    }
}

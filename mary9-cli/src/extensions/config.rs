//! Optimizer configuration.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

use mary9::orchestration::OptimizerBuilder;
use mary9::utils::{InfoLogger, LogLevel, LogLevels};
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;

/// An optimizer configuration.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Specifies budget configuration.
    pub budget: Option<BudgetConfig>,
    /// Specifies local solver configuration.
    pub local_solver: Option<LocalSolverConfig>,
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
    /// Specifies random seed.
    pub seed: Option<u64>,
}

/// A budget configuration.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    /// Amount of equivalent multi-starts. Default is 50.
    pub multi_starts: Option<usize>,
    /// A cost of one local search in gradient evaluations. Default is 500.
    pub local_search_equivalent: Option<usize>,
    /// A cost of one gradient evaluation. Default is dimensionality.
    pub gradient_eval_equivalent: Option<usize>,
    /// An informational cap of objective evaluations.
    pub max_fevals: Option<usize>,
}

/// A local solver configuration.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocalSolverConfig {
    /// A gradient norm tolerance.
    pub tolerance: Option<f64>,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Specifies whether logging is enabled. Default is false.
    #[serde(default)]
    pub enabled: bool,
    /// Verbosity of the orchestration layer.
    pub orchestrator: Option<LogLevelConfig>,
    /// Verbosity of global heuristics.
    pub global: Option<LogLevelConfig>,
    /// Verbosity of local solvers.
    pub local: Option<LogLevelConfig>,
}

/// A verbosity level.
#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelConfig {
    /// Nothing is logged.
    Off,
    /// Only warnings are logged.
    Warn,
    /// Progress information.
    Info,
    /// Detailed information.
    Debug,
}

impl From<LogLevelConfig> for LogLevel {
    fn from(level: LogLevelConfig) -> Self {
        match level {
            LogLevelConfig::Off => LogLevel::Off,
            LogLevelConfig::Warn => LogLevel::Warn,
            LogLevelConfig::Info => LogLevel::Info,
            LogLevelConfig::Debug => LogLevel::Debug,
        }
    }
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))
}

/// Creates a logger which prints messages to stdout.
pub fn create_stdout_logger() -> InfoLogger {
    Arc::new(|msg: &str| println!("{msg}"))
}

/// Applies config on top of given builder.
pub fn create_builder_from_config(builder: OptimizerBuilder, config: &Config) -> OptimizerBuilder {
    let builder = configure_from_budget(builder, &config.budget);
    let builder = configure_from_local_solver(builder, &config.local_solver);
    let builder = configure_from_logging(builder, &config.logging);

    match config.seed {
        Some(seed) => builder.with_seed(seed),
        None => builder,
    }
}

/// Reads config from reader and applies it on top of given builder.
pub fn create_builder_from_config_file<R: Read>(
    builder: OptimizerBuilder,
    reader: BufReader<R>,
) -> Result<OptimizerBuilder, String> {
    read_config(reader).map(|config| create_builder_from_config(builder, &config))
}

fn configure_from_budget(mut builder: OptimizerBuilder, budget_config: &Option<BudgetConfig>) -> OptimizerBuilder {
    if let Some(config) = budget_config {
        if let Some(multi_starts) = config.multi_starts {
            builder = builder.with_multi_starts(multi_starts);
        }

        if let Some(local_search_equivalent) = config.local_search_equivalent {
            builder = builder.with_local_search_equivalent(local_search_equivalent);
        }

        builder = builder
            .with_gradient_eval_equivalent(config.gradient_eval_equivalent)
            .with_max_fevals(config.max_fevals);
    }

    builder
}

fn configure_from_local_solver(
    builder: OptimizerBuilder,
    local_solver_config: &Option<LocalSolverConfig>,
) -> OptimizerBuilder {
    match local_solver_config {
        Some(config) => builder.with_local_solver_tolerance(config.tolerance),
        None => builder,
    }
}

fn configure_from_logging(builder: OptimizerBuilder, logging_config: &Option<LoggingConfig>) -> OptimizerBuilder {
    match logging_config {
        Some(config) if config.enabled => {
            let defaults = LogLevels::default();
            let levels = LogLevels {
                orchestrator: config.orchestrator.map_or(defaults.orchestrator, LogLevel::from),
                global: config.global.map_or(defaults.global, LogLevel::from),
                local: config.local.map_or(defaults.local, LogLevel::from),
            };

            builder.with_logger(create_stdout_logger()).with_log_levels(levels)
        }
        _ => builder,
    }
}

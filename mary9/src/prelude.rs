//! This module reimports a common used types.

pub use crate::models::Bounds;
pub use crate::models::ObjectiveFn;
pub use crate::models::OptimizationOutcome;
pub use crate::models::OptimizationResult;
pub use crate::models::Population;

pub use crate::orchestration::BudgetAllocator;
pub use crate::orchestration::BudgetPlan;
pub use crate::orchestration::Optimizer;
pub use crate::orchestration::OptimizerBuilder;
pub use crate::orchestration::ReplacementPolicy;
pub use crate::orchestration::RunMetrics;

pub use crate::utils::Environment;
pub use crate::utils::Float;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
pub use crate::utils::OptimizerError;
pub use crate::utils::compare_floats;
pub use crate::utils::{DefaultRandom, Random};
pub use crate::utils::{LogLevel, LogLevels, Subsystem};

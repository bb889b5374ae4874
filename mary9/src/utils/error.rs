#[cfg(test)]
#[path = "../../tests/unit/utils/error_test.rs"]
mod error_test;

use std::fmt::{Display, Formatter};

/// An error raised by the optimizer. Every variant is fatal and is reported before the
/// first objective evaluation, except `UnknownPolicy` which can only appear while parsing
/// textual configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptimizerError {
    /// Invalid user configuration: mismatching bounds, empty dimensions, bad strategy weights, etc.
    Configuration(String),

    /// The budget is too small to give a global heuristic enough iterations.
    InsufficientBudget {
        /// A name of the heuristic which cannot be sized.
        heuristic: String,
        /// Iterations which the budget would allow at minimal population size.
        iterations: usize,
        /// Minimal amount of iterations required.
        min_iterations: usize,
    },

    /// Unrecognized replacement threshold policy tag.
    UnknownPolicy(String),
}

/// A type alias for result type with `OptimizerError`.
pub type GenericResult<T> = Result<T, OptimizerError>;

impl OptimizerError {
    /// Returns true if the error belongs to configuration errors family.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InsufficientBudget { .. })
    }
}

impl Display for OptimizerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::InsufficientBudget { heuristic, iterations, min_iterations } => write!(
                f,
                "not enough multi-starts specified to ensure exploration of parameter space: \
                 {heuristic} gets {iterations} iterations, at least {min_iterations} required"
            ),
            Self::UnknownPolicy(tag) => write!(f, "unknown thresholding for knowledge exchange: '{tag}'"),
        }
    }
}

impl std::error::Error for OptimizerError {}

impl From<String> for OptimizerError {
    fn from(msg: String) -> Self {
        Self::Configuration(msg)
    }
}

impl<'a> From<&'a str> for OptimizerError {
    fn from(value: &'a str) -> Self {
        Self::Configuration(value.to_string())
    }
}

//! This crate exposes a hybrid black-box optimizer which coordinates two population based global
//! heuristics (covariance matrix adaptation and differential evolution) with gradient based local
//! refinement under an evaluation budget planned upfront.
//!
//! # Example
//!
//! ```
//! use mary9::prelude::*;
//! use std::sync::Arc;
//!
//! let outcome = OptimizerBuilder::default()
//!     .with_objective(Arc::new(|x: &[Float]| x.iter().map(|v| v * v).sum()))
//!     .with_bounds(vec![-1., -1.], vec![1., 1.])
//!     .with_multi_starts(20)
//!     .with_log_levels(LogLevels::silent())
//!     .build()
//!     .expect("cannot build optimizer")
//!     .minimize();
//!
//! assert!(outcome.best().is_some());
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod algorithms;
pub mod heuristics;
pub mod local;
pub mod models;
pub mod orchestration;
pub mod prelude;
pub mod sampling;
pub mod utils;

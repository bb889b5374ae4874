//! This module contains the design of experiments sampler and subsample selection routines
//! used to pick points from populations.

mod design;
pub use self::design::{InitialSample, Sampler};

mod selection;
pub use self::selection::{Subsample, select_subsample, select_weakest_sample};

mod strategy;
pub use self::strategy::SelectionStrategy;

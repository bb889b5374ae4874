//! This module contains the data model shared by the orchestrator and its collaborators.

mod bounds;
pub use self::bounds::Bounds;

mod objective;
pub use self::objective::*;

mod population;
pub use self::population::{Individual, Population};

mod result;
pub use self::result::{OptimizationOutcome, OptimizationResult};

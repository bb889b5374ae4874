//! This module contains population based global heuristics coordinated by the orchestrator.

mod cmaes;
pub use self::cmaes::CmaEsHeuristic;

mod diffevol;
pub use self::diffevol::DiffEvolHeuristic;

mod refiner;
pub use self::refiner::{InitialRefiner, setup_initial_refiner};

use crate::models::Population;

/// A global heuristic which advances generation by generation and owns its population.
/// The orchestrator may modify the population between generations (knowledge exchange,
/// runtime refinement), so implementations must take the current population into account
/// on the next advance.
pub trait GlobalHeuristic {
    /// Returns a short name of the heuristic used in logs.
    fn name(&self) -> &str;

    /// Advances the heuristic by one generation.
    fn advance(&mut self);

    /// Returns the current population.
    fn population(&self) -> &Population;

    /// Returns the current population for in place modifications.
    fn population_mut(&mut self) -> &mut Population;
}

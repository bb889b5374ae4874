//! This module contains the orchestration layer: budget allocation, iteration scheduling,
//! knowledge exchange between populations, refinement stages and the final multi-start search.

mod budget;
pub use self::budget::{BudgetAllocator, BudgetPlan, HeuristicBudget, HeuristicLimits};

mod exchange;
pub use self::exchange::{DUPLICATE_DISTANCE, ExchangeSettings, ReplacementPolicy, share_knowledge};

mod final_search;
pub use self::final_search::FinalSearch;

mod optimizer;
pub use self::optimizer::{Optimizer, OptimizerBuilder};

mod refinement;
pub use self::refinement::RuntimeRefinement;

mod schedule;
pub use self::schedule::{Activation, Schedule};

mod telemetry;
pub use self::telemetry::{ExchangeRecord, IterationRecord, RunMetrics};

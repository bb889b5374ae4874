#[cfg(test)]
#[path = "../../tests/unit/orchestration/budget_test.rs"]
mod budget_test;

use crate::utils::{Float, GenericResult, OptimizerError};

/// A cost of one refinement measured in gradient evaluations.
const REFINEMENT_EQUIVALENT: usize = 50;

/// Sizing limits of a global heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeuristicLimits {
    /// A reasonable maximum of iterations which is tried first.
    pub max_iterations: usize,
    /// A minimum of iterations required to explore the parameter space.
    pub min_iterations: usize,
    /// A minimum population size.
    pub min_popsize: usize,
}

/// A resolved sizing of one global heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeuristicBudget {
    /// A budget share of the heuristic.
    pub budget: usize,
    /// A population size.
    pub popsize: usize,
    /// Amount of generations.
    pub iterations: usize,
    /// Amount of points evaluated by the initial design before the population is selected.
    pub sampling: usize,
}

/// A plan computed once before the run. None of its values are decremented during optimization.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetPlan {
    /// Total abstract budget.
    pub total: usize,
    /// A share of global exploration.
    pub global: usize,
    /// A share of the final local searches.
    pub local: usize,
    /// A share of refinements.
    pub refinement: usize,
    /// A sizing of the covariance adaptation heuristic.
    pub cmaes: HeuristicBudget,
    /// A sizing of the differential evolution heuristic.
    pub diffevol: HeuristicBudget,
    /// Amount of outer iterations of the main loop.
    pub outer_iterations: usize,
    /// Total amount of refinement slots.
    pub refinements: usize,
    /// Refinement slots reserved for the initial refinement seeded from the covariance adaptation design.
    pub initial_refinements_cmaes: usize,
    /// Refinement slots reserved for the initial refinement seeded from the differential evolution design.
    pub initial_refinements_diffevol: usize,
    /// Refinement quotas of the three runtime refinement rounds.
    pub runtime_refinements: [usize; 3],
    /// Amount of local searches in the final stage.
    pub local_searches: usize,
    /// An informational cap of objective evaluations, never enforced.
    pub max_fevals: Option<usize>,
}

impl BudgetPlan {
    /// Returns the total amount of initial refinement slots.
    pub fn initial_refinements(&self) -> usize {
        self.initial_refinements_cmaes + self.initial_refinements_diffevol
    }
}

/// Converts high level multi-start parameters into population sizes, iteration counts and
/// refinement quotas.
#[derive(Clone, Debug)]
pub struct BudgetAllocator {
    multi_starts: usize,
    local_search_equivalent: usize,
    gradient_eval_equivalent: usize,
    dimensions: usize,
    max_fevals: Option<usize>,
}

impl BudgetAllocator {
    /// Creates a new instance of `BudgetAllocator`. Gradient evaluation cost defaults to dimensionality.
    pub fn new(
        multi_starts: usize,
        local_search_equivalent: usize,
        gradient_eval_equivalent: Option<usize>,
        dimensions: usize,
    ) -> Self {
        Self {
            multi_starts,
            local_search_equivalent,
            gradient_eval_equivalent: gradient_eval_equivalent.unwrap_or(dimensions),
            dimensions,
            max_fevals: None,
        }
    }

    /// Sets informational cap of objective evaluations.
    pub fn with_max_fevals(mut self, max_fevals: Option<usize>) -> Self {
        self.max_fevals = max_fevals;
        self
    }

    /// Returns sizing limits of the covariance adaptation heuristic.
    pub fn cmaes_limits(&self) -> HeuristicLimits {
        HeuristicLimits {
            max_iterations: 500,
            min_iterations: 50,
            min_popsize: (2 * self.multi_starts).max((1.5 * self.dimensions as Float).ceil() as usize),
        }
    }

    /// Returns sizing limits of the differential evolution heuristic.
    pub fn diffevol_limits(&self) -> HeuristicLimits {
        HeuristicLimits { max_iterations: 150, min_iterations: 25, min_popsize: 2 * self.multi_starts }
    }

    /// Computes the budget plan.
    pub fn allocate(&self) -> GenericResult<BudgetPlan> {
        self.validate()?;

        let total = self.multi_starts * self.gradient_eval_equivalent * self.local_search_equivalent;
        let local_search_cost = self.gradient_eval_equivalent * self.local_search_equivalent;
        let refinement_cost = self.gradient_eval_equivalent * REFINEMENT_EQUIVALENT;

        let global = round(0.4 * total as Float);
        let local = round(0.4 * total as Float);
        let refinement = total - round(0.8 * total as Float);

        let cmaes_budget = round(0.4 * global as Float);
        let diffevol_budget = global - cmaes_budget;

        let (cmaes_popsize, cmaes_iterations) = resolve_heuristic("CMAES", cmaes_budget, &self.cmaes_limits())?;
        let (diffevol_popsize, diffevol_iterations) =
            resolve_heuristic("DE", diffevol_budget, &self.diffevol_limits())?;

        let refinements = round(refinement as Float / refinement_cost as Float);
        let initial_refinements = round(0.1 * global as Float / refinement_cost as Float);
        let initial_refinements_cmaes = round(0.5 * initial_refinements as Float);
        let runtime_refinements = split_into_quotas(refinements.saturating_sub(initial_refinements));

        let sampling_floor = round(total as Float / 1000.);

        Ok(BudgetPlan {
            total,
            global,
            local,
            refinement,
            cmaes: HeuristicBudget {
                budget: cmaes_budget,
                popsize: cmaes_popsize,
                iterations: cmaes_iterations,
                sampling: sampling_floor.max((2.5 * cmaes_popsize as Float).ceil() as usize),
            },
            diffevol: HeuristicBudget {
                budget: diffevol_budget,
                popsize: diffevol_popsize,
                iterations: diffevol_iterations,
                sampling: sampling_floor.max((2.5 * diffevol_popsize as Float).floor() as usize),
            },
            outer_iterations: cmaes_iterations.max(diffevol_iterations),
            refinements,
            initial_refinements_cmaes,
            initial_refinements_diffevol: initial_refinements - initial_refinements_cmaes,
            runtime_refinements,
            local_searches: round(local as Float / local_search_cost as Float),
            max_fevals: self.max_fevals,
        })
    }

    fn validate(&self) -> GenericResult<()> {
        if self.dimensions == 0 {
            return Err("dimensionality must be positive".into());
        }

        if self.multi_starts == 0 {
            return Err("amount of equivalent multi-starts must be positive".into());
        }

        if self.local_search_equivalent == 0 || self.gradient_eval_equivalent == 0 {
            return Err("local search and gradient evaluation equivalents must be positive".into());
        }

        Ok(())
    }
}

/// Resolves population size and iterations of a heuristic: a maximum of iterations is tried first,
/// then the minimal population size is used if the derived one is too small.
fn resolve_heuristic(name: &str, budget: usize, limits: &HeuristicLimits) -> GenericResult<(usize, usize)> {
    let popsize = (budget / limits.max_iterations).saturating_sub(1);
    if popsize > limits.min_popsize {
        return Ok((popsize, limits.max_iterations));
    }

    let iterations = budget / limits.min_popsize;
    if iterations < limits.min_iterations {
        return Err(OptimizerError::InsufficientBudget {
            heuristic: name.to_string(),
            iterations,
            min_iterations: limits.min_iterations,
        });
    }

    Ok((limits.min_popsize, iterations))
}

/// Splits amount into three near equal quotas using differences of a four point linear partition.
fn split_into_quotas(amount: usize) -> [usize; 3] {
    let breakpoints = [0., 1., 2., 3.].map(|idx: Float| round(idx * amount as Float / 3.));

    [breakpoints[1] - breakpoints[0], breakpoints[2] - breakpoints[1], breakpoints[3] - breakpoints[2]]
}

fn round(value: Float) -> usize {
    value.round() as usize
}

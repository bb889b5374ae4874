#[cfg(test)]
#[path = "../../tests/unit/orchestration/optimizer_test.rs"]
mod optimizer_test;

use super::telemetry::Telemetry;
use super::*;
use crate::heuristics::{CmaEsHeuristic, DiffEvolHeuristic, GlobalHeuristic, InitialRefiner, setup_initial_refiner};
use crate::local::ProjectedGradientSolver;
use crate::models::{Bounds, Objective, ObjectiveFn, OptimizationOutcome, Population};
use crate::sampling::{Sampler, SelectionStrategy};
use crate::utils::{Environment, Float, GenericResult, InfoLogger, LogLevel, LogLevels, Subsystem, is_strictly_better};
use std::sync::Arc;

const REFINEMENT_MAX_ITERATIONS: usize = 50;
const FINAL_MAX_ITERATIONS: usize = 1000;

const CMAES_SAMPLING_STRATEGY: SelectionStrategy = SelectionStrategy::new_unchecked(0.1, 0.3, 0.6, 0.);
const DIFFEVOL_SAMPLING_STRATEGY: SelectionStrategy = SelectionStrategy::new_unchecked(0.1, 0.2, 0.2, 0.5);
const EXCHANGE_STRATEGY: SelectionStrategy = SelectionStrategy::new_unchecked(0.6, 0., 0., 0.4);
const CMAES_INITIAL_REFINE_STRATEGY: SelectionStrategy = SelectionStrategy::new_unchecked(0.3, 0.2, 0.5, 0.);
const DIFFEVOL_INITIAL_REFINE_STRATEGY: SelectionStrategy = SelectionStrategy::new_unchecked(0.15, 0.15, 0., 0.7);

/// Provides configurable way to build the optimizer using fluent interface style.
pub struct OptimizerBuilder {
    objective: Option<ObjectiveFn>,
    bounds: Option<(Vec<Float>, Vec<Float>)>,
    multi_starts: usize,
    local_search_equivalent: usize,
    gradient_eval_equivalent: Option<usize>,
    max_fevals: Option<usize>,
    local_solver_tolerance: Option<Float>,
    seed: u64,
    logger: Option<InfoLogger>,
    levels: LogLevels,
    is_parallel: bool,
}

impl Default for OptimizerBuilder {
    fn default() -> Self {
        Self {
            objective: None,
            bounds: None,
            multi_starts: 50,
            local_search_equivalent: 500,
            gradient_eval_equivalent: None,
            max_fevals: None,
            local_solver_tolerance: None,
            seed: 0,
            logger: None,
            levels: LogLevels::default(),
            is_parallel: false,
        }
    }
}

impl OptimizerBuilder {
    /// Sets objective function which is minimized.
    pub fn with_objective(mut self, objective: ObjectiveFn) -> Self {
        self.objective = Some(objective);
        self
    }

    /// Sets lower and upper bounds of parameters.
    pub fn with_bounds(mut self, lower: Vec<Float>, upper: Vec<Float>) -> Self {
        self.bounds = Some((lower, upper));
        self
    }

    /// Sets amount of equivalent multi-starts which defines the total budget. Default is 50.
    pub fn with_multi_starts(mut self, multi_starts: usize) -> Self {
        self.multi_starts = multi_starts;
        self
    }

    /// Sets a cost of one local search in gradient evaluations. Default is 500.
    pub fn with_local_search_equivalent(mut self, local_search_equivalent: usize) -> Self {
        self.local_search_equivalent = local_search_equivalent;
        self
    }

    /// Sets a cost of one gradient evaluation. Default is dimensionality.
    pub fn with_gradient_eval_equivalent(mut self, gradient_eval_equivalent: Option<usize>) -> Self {
        self.gradient_eval_equivalent = gradient_eval_equivalent;
        self
    }

    /// Sets informational cap of objective evaluations. It is reported, but not enforced.
    pub fn with_max_fevals(mut self, max_fevals: Option<usize>) -> Self {
        self.max_fevals = max_fevals;
        self
    }

    /// Sets gradient norm tolerance of local solvers.
    pub fn with_local_solver_tolerance(mut self, tolerance: Option<Float>) -> Self {
        self.local_solver_tolerance = tolerance;
        self
    }

    /// Sets random seed. Default is 0.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets logger. Default is no logging.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets verbosity of subsystems.
    pub fn with_log_levels(mut self, levels: LogLevels) -> Self {
        self.levels = levels;
        self
    }

    /// Specifies whether batches of objective evaluations can run in parallel. Default is false.
    pub fn with_parallel(mut self, is_parallel: bool) -> Self {
        self.is_parallel = is_parallel;
        self
    }

    /// Builds the optimizer. Budget is allocated here, so configuration errors are reported
    /// before any objective evaluation.
    pub fn build(self) -> GenericResult<Optimizer> {
        let func = self.objective.ok_or("objective function is not set")?;
        let (lower, upper) = self.bounds.ok_or("bounds are not set")?;
        let bounds = Bounds::new(lower, upper)?;

        let plan = BudgetAllocator::new(
            self.multi_starts,
            self.local_search_equivalent,
            self.gradient_eval_equivalent,
            bounds.dimensions(),
        )
        .with_max_fevals(self.max_fevals)
        .allocate()?;
        let schedule = Schedule::from_plan(&plan);

        let logger: InfoLogger = match self.logger {
            Some(logger) => logger,
            None => Arc::new(|_: &str| {}),
        };
        let environment =
            Arc::new(Environment { is_parallel: self.is_parallel, ..Environment::new(self.seed, logger, self.levels) });

        Ok(Optimizer {
            objective: Arc::new(Objective::new(func, bounds)),
            plan,
            schedule,
            tolerance: self.local_solver_tolerance,
            environment,
        })
    }
}

/// A hybrid optimizer which coordinates two global heuristics with local refinement under a
/// budget allocated upfront.
pub struct Optimizer {
    objective: Arc<Objective>,
    plan: BudgetPlan,
    schedule: Schedule,
    tolerance: Option<Float>,
    environment: Arc<Environment>,
}

impl Optimizer {
    /// Returns the budget plan.
    pub fn plan(&self) -> &BudgetPlan {
        &self.plan
    }

    /// Returns the activation schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Runs optimization and returns ranked local search results.
    pub fn minimize(&self) -> OptimizationOutcome {
        self.log_plan();

        let mut telemetry = Telemetry::new();
        let sampler = Sampler::new(self.objective.clone(), self.environment.clone());

        let cmaes_sample =
            sampler.sample_initial_points(self.plan.cmaes.popsize, &CMAES_SAMPLING_STRATEGY, self.plan.cmaes.sampling);
        let diffevol_sample = sampler.sample_initial_points(
            self.plan.diffevol.popsize,
            &DIFFEVOL_SAMPLING_STRATEGY,
            self.plan.diffevol.sampling,
        );

        let mut initial_refiners = Some((
            self.create_initial_refiner(
                "initial-CMAES",
                setup_initial_refiner(
                    &cmaes_sample.full,
                    &cmaes_sample.remaining,
                    self.plan.initial_refinements_cmaes,
                ),
            ),
            self.create_initial_refiner(
                "initial-DE",
                setup_initial_refiner(
                    &diffevol_sample.full,
                    &diffevol_sample.remaining,
                    self.plan.initial_refinements_diffevol,
                ),
            ),
        ));

        let mut cmaes = CmaEsHeuristic::new(cmaes_sample.selected, self.objective.clone(), self.environment.clone());
        let mut diffevol =
            DiffEvolHeuristic::new(diffevol_sample.selected, self.objective.clone(), self.environment.clone());

        let mut runtime_refinement = RuntimeRefinement::new(
            &self.plan.runtime_refinements,
            Box::new(self.create_local_solver(REFINEMENT_MAX_ITERATIONS)),
            self.objective.clone(),
            self.environment.clone(),
        );

        for iteration in 0..self.schedule.len() {
            let activations = self.schedule.get(iteration);
            self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
                let names = activations.iter().map(|activation| activation.to_string()).collect::<Vec<_>>();
                format!("iteration {iteration}: [{}]", names.join(", "))
            });

            for activation in activations {
                match activation {
                    Activation::CmaEs => {
                        cmaes.advance();
                        if iteration > 0 && self.schedule.is_active(iteration, Activation::DiffEvol) {
                            let settings = create_exchange_settings(cmaes.population().popsize());
                            let replaced = self.exchange(&cmaes, &mut diffevol, &settings);
                            telemetry.on_exchange(ExchangeRecord {
                                iteration,
                                source: Activation::CmaEs,
                                destination: Activation::DiffEvol,
                                quota: settings.quota,
                                replaced,
                            });
                        }
                    }
                    Activation::DiffEvol => {
                        diffevol.advance();
                        let settings = create_exchange_settings(diffevol.population().popsize());
                        let replaced = self.exchange(&diffevol, &mut cmaes, &settings);
                        telemetry.on_exchange(ExchangeRecord {
                            iteration,
                            source: Activation::DiffEvol,
                            destination: Activation::CmaEs,
                            quota: settings.quota,
                            replaced,
                        });
                    }
                    Activation::InitialRefine => {
                        let Some((mut cmaes_refiner, mut diffevol_refiner)) = initial_refiners.take() else {
                            continue;
                        };

                        let settings = create_refine_settings(cmaes.population(), CMAES_INITIAL_REFINE_STRATEGY);
                        telemetry.on_refinement(cmaes_refiner.population().popsize());
                        let replaced = self.migrate(cmaes_refiner.run(), &mut cmaes, &settings);
                        telemetry.on_exchange(ExchangeRecord {
                            iteration,
                            source: Activation::InitialRefine,
                            destination: Activation::CmaEs,
                            quota: settings.quota,
                            replaced,
                        });

                        let settings = create_refine_settings(diffevol.population(), DIFFEVOL_INITIAL_REFINE_STRATEGY);
                        telemetry.on_refinement(diffevol_refiner.population().popsize());
                        let replaced = self.migrate(diffevol_refiner.run(), &mut diffevol, &settings);
                        telemetry.on_exchange(ExchangeRecord {
                            iteration,
                            source: Activation::InitialRefine,
                            destination: Activation::DiffEvol,
                            quota: settings.quota,
                            replaced,
                        });
                    }
                    Activation::RuntimeRefine => {
                        let refined = runtime_refinement.run(cmaes.population_mut(), diffevol.population_mut());
                        telemetry.on_refinement(refined);
                    }
                }
            }

            telemetry.on_iteration(
                iteration,
                activations,
                cmaes.population().best_fitness(),
                diffevol.population().best_fitness(),
            );
        }

        let final_search = FinalSearch::new(
            self.plan.local_searches,
            Box::new(self.create_local_solver(FINAL_MAX_ITERATIONS)),
            self.objective.clone(),
            self.environment.clone(),
        );
        let (results, final_population) = final_search.run(&[diffevol.population(), cmaes.population()]);
        let metrics = telemetry.finish(results.len(), self.objective.evaluations());

        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "optimization finished in {}ms: {} objective evaluations, {} exchanged points, {} refinements",
                metrics.duration, metrics.evaluations, metrics.exchanges, metrics.refinements
            )
        });

        OptimizationOutcome { results, final_population, metrics }
    }

    fn exchange(&self, source: &dyn GlobalHeuristic, destination: &mut dyn GlobalHeuristic, settings: &ExchangeSettings) -> usize {
        self.log_best("before sharing", source, destination);

        let label = format!("{} to {}", source.name(), destination.name());
        let replaced = self.share(&label, source.population(), destination.population_mut(), settings);

        self.log_best("after sharing", source, destination);

        replaced
    }

    fn migrate(&self, source: &Population, destination: &mut dyn GlobalHeuristic, settings: &ExchangeSettings) -> usize {
        let label = format!("initial refinement to {}", destination.name());

        self.share(&label, source, destination.population_mut(), settings)
    }

    fn share(&self, label: &str, source: &Population, destination: &mut Population, settings: &ExchangeSettings) -> usize {
        let is_new_best = is_strictly_better(source.best_fitness(), destination.best_fitness());
        let replaced = share_knowledge(source, destination, settings, self.environment.random.as_ref());

        self.environment.log(Subsystem::Orchestrator, LogLevel::Debug, || {
            if settings.require_new_best && !is_new_best {
                format!("{label}: none of the {} possible points exchanged, as no new best point was found", settings.quota)
            } else {
                format!("{label}: exchanged {replaced} of {} possible points", settings.quota)
            }
        });

        replaced
    }

    fn log_best(&self, stage: &str, first: &dyn GlobalHeuristic, second: &dyn GlobalHeuristic) {
        self.environment.log(Subsystem::Orchestrator, LogLevel::Debug, || {
            format!(
                "{stage}: best {} {}, best {} {}",
                first.name(),
                first.population().best_fitness(),
                second.name(),
                second.population().best_fitness()
            )
        });
    }

    fn log_plan(&self) {
        let plan = &self.plan;
        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "budget plan: total {}, global {}, local {}, refinement {}, max fevals {}",
                plan.total,
                plan.global,
                plan.local,
                plan.refinement,
                plan.max_fevals.map_or_else(|| "unlimited".to_string(), |value| value.to_string())
            )
        });
        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "heuristics: CMAES {}x{}, DE {}x{}, outer iterations {}",
                plan.cmaes.popsize,
                plan.cmaes.iterations,
                plan.diffevol.popsize,
                plan.diffevol.iterations,
                plan.outer_iterations
            )
        });
        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "refinements: {} initial, {:?} at runtime, {} final local searches",
                plan.initial_refinements(),
                plan.runtime_refinements,
                plan.local_searches
            )
        });

        let schedule = &self.schedule;
        self.environment.log(Subsystem::Orchestrator, LogLevel::Info, || {
            format!(
                "schedule: {} outer iterations, CMAES active in {}, DE active in {}, initial refinement at {:?}, \
                 runtime refinement at {:?}",
                schedule.len(),
                schedule.indices_of(Activation::CmaEs).len(),
                schedule.indices_of(Activation::DiffEvol).len(),
                schedule.indices_of(Activation::InitialRefine),
                schedule.indices_of(Activation::RuntimeRefine)
            )
        });
    }

    fn create_local_solver(&self, max_iterations: usize) -> ProjectedGradientSolver {
        ProjectedGradientSolver::new(max_iterations, self.tolerance, self.environment.clone())
    }

    fn create_initial_refiner(&self, name: &str, population: Population) -> InitialRefiner {
        InitialRefiner::new(name, population, self.objective.clone(), self.tolerance, self.environment.clone())
    }
}

fn create_exchange_settings(source_popsize: usize) -> ExchangeSettings {
    ExchangeSettings {
        quota: ((0.05 * source_popsize as Float).round() as usize).min(5),
        strategy: EXCHANGE_STRATEGY,
        policy: ReplacementPolicy::InBetween,
        require_new_best: true,
    }
}

fn create_refine_settings(destination: &Population, strategy: SelectionStrategy) -> ExchangeSettings {
    ExchangeSettings {
        quota: (0.2 * destination.popsize() as Float).round() as usize,
        strategy,
        policy: ReplacementPolicy::InBetween,
        require_new_best: false,
    }
}

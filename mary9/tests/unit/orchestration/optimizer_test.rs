use super::*;
use crate::helpers::models::create_sphere_function;
use crate::utils::{LogLevel, OptimizerError, compare_floats};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn create_sphere_builder() -> OptimizerBuilder {
    OptimizerBuilder::default()
        .with_objective(create_sphere_function())
        .with_bounds(vec![0., 0.], vec![1., 1.])
        .with_multi_starts(20)
        .with_log_levels(LogLevels::silent())
}

#[test]
fn can_minimize_sphere_function_end_to_end() {
    let optimizer = create_sphere_builder().build().unwrap();

    let outcome = optimizer.minimize();

    assert_eq!(optimizer.plan().outer_iterations, 120);
    assert_eq!(outcome.metrics.iterations.len(), 120);
    assert_eq!(outcome.final_population.popsize(), 80);
    assert!(!outcome.results.is_empty() && outcome.results.len() <= 8);
    assert!(outcome.results.windows(2).all(|pair| compare_floats(pair[0].value, pair[1].value).is_le()));

    let best = outcome.best().unwrap();
    assert!(best.value <= outcome.final_population.best_fitness());
    assert!(best.value < 1e-6, "best value: {}", best.value);
    assert_eq!(best.x.len(), 2);
    assert!(outcome.metrics.refinements > 0);
    assert_eq!(outcome.metrics.local_searches, outcome.results.len());
}

#[test]
fn can_reproduce_run_with_same_seed() {
    let run = |seed: u64| create_sphere_builder().with_seed(seed).build().unwrap().minimize();

    let (first, second) = (run(7), run(7));

    assert_eq!(first.results, second.results);
    assert_eq!(first.metrics.evaluations, second.metrics.evaluations);
}

#[test]
fn can_fail_before_any_evaluation_on_insufficient_budget() {
    let evaluations = Arc::new(AtomicUsize::new(0));
    let counter = evaluations.clone();

    let result = OptimizerBuilder::default()
        .with_objective(Arc::new(move |x: &[Float]| {
            counter.fetch_add(1, Ordering::Relaxed);
            x.iter().sum()
        }))
        .with_bounds(vec![0., 0.], vec![1., 1.])
        .with_multi_starts(1)
        .with_local_search_equivalent(10)
        .build();

    assert!(matches!(result, Err(OptimizerError::InsufficientBudget { .. })));
    assert_eq!(evaluations.load(Ordering::Relaxed), 0);
}

parameterized_test! {can_reject_invalid_configuration, (objective, bounds), {
    can_reject_invalid_configuration_impl(objective, bounds);
}}

can_reject_invalid_configuration! {
    case01_no_objective: (false, Some((vec![0.], vec![1.]))),
    case02_no_bounds: (true, None),
    case03_length_mismatch: (true, Some((vec![0., 0.], vec![1.]))),
    case04_inverted_bounds: (true, Some((vec![1.], vec![0.]))),
}

fn can_reject_invalid_configuration_impl(objective: bool, bounds: Option<(Vec<Float>, Vec<Float>)>) {
    let mut builder = OptimizerBuilder::default();
    if objective {
        builder = builder.with_objective(create_sphere_function());
    }
    if let Some((lower, upper)) = bounds {
        builder = builder.with_bounds(lower, upper);
    }

    let result = builder.build();

    assert!(matches!(result, Err(OptimizerError::Configuration(_))));
}

#[test]
fn can_log_orchestration_progress() {
    let messages = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = messages.clone();
    let levels = LogLevels { orchestrator: LogLevel::Debug, global: LogLevel::Off, local: LogLevel::Off };

    create_sphere_builder()
        .with_logger(Arc::new(move |msg: &str| sink.lock().unwrap().push(msg.to_string())))
        .with_log_levels(levels)
        .build()
        .unwrap()
        .minimize();

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|msg| msg.starts_with("budget plan: total 20000")));
    assert!(messages.iter().any(|msg| msg.contains("possible points")));
    assert!(messages.iter().any(|msg| msg.starts_with("schedule: 120 outer iterations") && msg.ends_with("[36, 60, 84]")));
    assert!(messages.iter().any(|msg| msg.starts_with("refinement round 0")));
    assert!(messages.iter().any(|msg| msg.starts_with("final search")));
    assert!(!messages.iter().any(|msg| msg.starts_with("CMAES generation")));
}

#[test]
fn can_quarantine_failed_evaluations() {
    let optimizer = OptimizerBuilder::default()
        .with_objective(Arc::new(|x: &[Float]| {
            if x[0] > 0.8 { Float::NAN } else { x.iter().map(|v| (v - 0.3).powi(2)).sum() }
        }))
        .with_bounds(vec![0., 0.], vec![1., 1.])
        .with_multi_starts(20)
        .with_log_levels(LogLevels::silent())
        .build()
        .unwrap();

    let outcome = optimizer.minimize();

    let best = outcome.best().unwrap();
    assert!(best.value.is_finite());
    assert!(best.value < 1e-6, "best value: {}", best.value);
}

#[test]
fn can_expose_schedule() {
    let optimizer = create_sphere_builder().build().unwrap();

    let schedule = optimizer.schedule();

    assert_eq!(schedule.len(), 120);
    assert_eq!(schedule.indices_of(Activation::RuntimeRefine), vec![36, 60, 84]);
}

#[test]
fn can_produce_same_results_with_parallel_evaluation() {
    let sequential = create_sphere_builder().with_seed(5).build().unwrap().minimize();
    let parallel = create_sphere_builder().with_seed(5).with_parallel(true).build().unwrap().minimize();

    assert_eq!(sequential.results, parallel.results);
}

fn create_population(size: usize) -> Population {
    Population::new(vec![vec![0.5, 0.5]; size], vec![0.; size])
}

parameterized_test! {can_create_exchange_settings, (popsize, expected_quota), {
    can_create_exchange_settings_impl(popsize, expected_quota);
}}

can_create_exchange_settings! {
    case01_small: (40, 2),
    case02_capped: (100, 5),
    case03_large: (319, 5),
    case04_rounded_down: (9, 0),
    case05_rounded_up: (10, 1),
}

fn can_create_exchange_settings_impl(popsize: usize, expected_quota: usize) {
    let settings = create_exchange_settings(popsize);

    assert_eq!(settings.quota, expected_quota);
    assert!(settings.require_new_best);
    assert_eq!(settings.policy, ReplacementPolicy::InBetween);
    assert_eq!(settings.strategy, EXCHANGE_STRATEGY);
}

parameterized_test! {can_create_refine_settings, (popsize, expected_quota), {
    can_create_refine_settings_impl(popsize, expected_quota);
}}

can_create_refine_settings! {
    case01_small: (40, 8),
    case02_medium: (100, 20),
    case03_large: (319, 64),
}

fn can_create_refine_settings_impl(popsize: usize, expected_quota: usize) {
    let settings = create_refine_settings(&create_population(popsize), DIFFEVOL_INITIAL_REFINE_STRATEGY);

    assert_eq!(settings.quota, expected_quota);
    assert!(!settings.require_new_best);
    assert_eq!(settings.policy, ReplacementPolicy::InBetween);
    assert_eq!(settings.strategy, DIFFEVOL_INITIAL_REFINE_STRATEGY);
}

#[test]
fn can_dispatch_exchanges_according_to_schedule() {
    let optimizer = create_sphere_builder().build().unwrap();
    let schedule = optimizer.schedule().clone();

    let outcome = optimizer.minimize();
    let records = &outcome.metrics.exchange_records;
    let get_iterations = |source: Activation, destination: Activation| {
        records
            .iter()
            .filter(|record| record.source == source && record.destination == destination)
            .map(|record| record.iteration)
            .collect::<Vec<_>>()
    };

    let cmaes_to_diffevol = get_iterations(Activation::CmaEs, Activation::DiffEvol);
    let expected = schedule
        .indices_of(Activation::CmaEs)
        .into_iter()
        .filter(|&iteration| iteration > 0 && schedule.is_active(iteration, Activation::DiffEvol))
        .collect::<Vec<_>>();
    assert!(!cmaes_to_diffevol.is_empty());
    assert!(!cmaes_to_diffevol.contains(&0));
    assert_eq!(cmaes_to_diffevol, expected);

    let diffevol_to_cmaes = get_iterations(Activation::DiffEvol, Activation::CmaEs);
    assert_eq!(diffevol_to_cmaes, schedule.indices_of(Activation::DiffEvol));
    assert!(diffevol_to_cmaes.contains(&0));

    let initial_refine = schedule.indices_of(Activation::InitialRefine);
    assert_eq!(get_iterations(Activation::InitialRefine, Activation::CmaEs), initial_refine);
    assert_eq!(get_iterations(Activation::InitialRefine, Activation::DiffEvol), initial_refine);

    assert!(records.iter().filter(|record| record.source != Activation::InitialRefine).all(|record| record.quota == 2));
    assert!(records.iter().all(|record| record.replaced <= record.quota));
    assert_eq!(outcome.metrics.exchanges, records.iter().map(|record| record.replaced).sum::<usize>());
}

#[test]
fn can_merge_final_population_starting_with_diffevol() {
    let optimizer = create_sphere_builder().build().unwrap();
    let diffevol_size = optimizer.plan().diffevol.popsize;

    let outcome = optimizer.minimize();
    let last = outcome.metrics.iterations.last().unwrap();
    let fitness = outcome.final_population.get_fitness();
    let get_best = |values: &[Float]| values.iter().copied().min_by(|a, b| compare_floats(*a, *b)).unwrap();

    assert_ne!(last.diffevol_best, last.cmaes_best);
    assert_eq!(get_best(&fitness[..diffevol_size]), last.diffevol_best);
    assert_eq!(get_best(&fitness[diffevol_size..]), last.cmaes_best);
}

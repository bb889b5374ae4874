use super::*;
use crate::helpers::models::create_diagonal_population;
use crate::helpers::utils::create_test_random;
use crate::utils::DefaultRandom;

const NAN: Float = Float::NAN;

fn create_settings(quota: usize, policy: ReplacementPolicy, require_new_best: bool) -> ExchangeSettings {
    ExchangeSettings {
        quota,
        strategy: SelectionStrategy::new(1., 0., 0., 0.).unwrap(),
        policy,
        require_new_best,
    }
}

fn create_off_diagonal_population(fitness: Vec<Float>) -> Population {
    let size = fitness.len();
    let points = (0..size).map(|idx| vec![(idx as Float + 0.5) / size as Float, 0.05]).collect();

    Population::new(points, fitness)
}

#[test]
fn can_replace_weakest_slots_with_better_migrants() {
    let source = create_off_diagonal_population(vec![0.5, 5.]);
    let source_before = source.clone();
    let mut destination = create_diagonal_population(vec![1., 2., 3., 4.]);

    let replaced = share_knowledge(
        &source,
        &mut destination,
        &create_settings(2, ReplacementPolicy::AlwaysIfBetter, false),
        create_test_random().as_ref(),
    );

    assert_eq!(replaced, 1);
    assert_eq!(destination.get_fitness(), vec![1., 2., 3., 0.5]);
    assert_eq!(destination.get(3).map(|individual| individual.x.clone()), source.get(0).map(|individual| individual.x.clone()));
    assert_eq!(source.individuals(), source_before.individuals());
    assert_eq!(destination.popsize(), 4);
}

#[test]
fn can_skip_candidate_close_to_existing_member() {
    let source = Population::new(vec![vec![0.5, 0.50001]], vec![0.]);
    let mut destination = Population::new(vec![vec![0.5, 0.5], vec![0.9, 0.9]], vec![10., 20.]);

    let replaced = share_knowledge(
        &source,
        &mut destination,
        &create_settings(1, ReplacementPolicy::AlwaysIfBetter, false),
        create_test_random().as_ref(),
    );

    assert_eq!(replaced, 0);
    assert_eq!(destination.get_fitness(), vec![10., 20.]);
}

parameterized_test! {can_apply_improvement_gate, (source_fitness, destination_fitness, expected), {
    can_apply_improvement_gate_impl(source_fitness, destination_fitness, expected);
}}

can_apply_improvement_gate! {
    case01_new_best: (vec![0.5, 9.], vec![1., 2., 3.], 1),
    case02_equal_best: (vec![1., 9.], vec![1., 2., 3.], 0),
    case03_worse_best: (vec![2., 9.], vec![1., 2., 3.], 0),
    case04_nan_source: (vec![NAN, NAN], vec![1., 2., 3.], 0),
    case05_nan_destination: (vec![5., 9.], vec![NAN, NAN, NAN], 1),
}

fn can_apply_improvement_gate_impl(source_fitness: Vec<Float>, destination_fitness: Vec<Float>, expected: usize) {
    let source = create_off_diagonal_population(source_fitness);
    let mut destination = create_diagonal_population(destination_fitness);

    let replaced = share_knowledge(
        &source,
        &mut destination,
        &create_settings(1, ReplacementPolicy::AlwaysIfBetter, true),
        create_test_random().as_ref(),
    );

    assert_eq!(replaced, expected);
}

parameterized_test! {can_use_policy_threshold, (policy, migrant, expected), {
    can_use_policy_threshold_impl(policy, migrant, expected);
}}

can_use_policy_threshold! {
    case01_in_between_below: (ReplacementPolicy::InBetween, 1.1, 1),
    case02_in_between_above: (ReplacementPolicy::InBetween, 1.2, 0),
    case03_only_best_below: (ReplacementPolicy::OnlyBest, 0.9, 1),
    case04_only_best_equal: (ReplacementPolicy::OnlyBest, 1., 0),
    case05_always_if_better: (ReplacementPolicy::AlwaysIfBetter, 3.9, 1),
    case06_nan_migrant: (ReplacementPolicy::AlwaysIfBetter, NAN, 0),
}

fn can_use_policy_threshold_impl(policy: ReplacementPolicy, migrant: Float, expected: usize) {
    let source = create_off_diagonal_population(vec![migrant]);
    let mut destination = create_diagonal_population(vec![1., 2., 3., 4.]);

    let replaced =
        share_knowledge(&source, &mut destination, &create_settings(1, policy, false), create_test_random().as_ref());

    assert_eq!(replaced, expected);
}

#[test]
fn can_keep_in_between_threshold_fixed_during_exchange() {
    let source = Population::new(vec![vec![0.1, 0.9], vec![0.9, 0.1]], vec![0.1, 1.5]);
    let mut destination = create_diagonal_population((1..=20).map(|value| value as Float).collect());
    assert!((destination.percentile_fitness(5.) - 1.95).abs() < 1e-9);

    let replaced = share_knowledge(
        &source,
        &mut destination,
        &create_settings(2, ReplacementPolicy::InBetween, false),
        create_test_random().as_ref(),
    );

    assert_eq!(replaced, 2);
    assert_eq!(destination.get_fitness()[18..], [1.5, 0.1]);
}

parameterized_test! {can_get_fixed_threshold, (policy, expected), {
    can_get_fixed_threshold_impl(policy, expected);
}}

can_get_fixed_threshold! {
    case01_in_between: (ReplacementPolicy::InBetween, Some(1.15)),
    case02_only_best: (ReplacementPolicy::OnlyBest, None),
    case03_always_if_better: (ReplacementPolicy::AlwaysIfBetter, None),
}

fn can_get_fixed_threshold_impl(policy: ReplacementPolicy, expected: Option<Float>) {
    let destination = create_diagonal_population(vec![1., 2., 3., 4.]);

    let threshold = policy.fixed_threshold(&destination);

    assert_eq!(threshold.is_some(), expected.is_some());
    if let (Some(threshold), Some(expected)) = (threshold, expected) {
        assert!((threshold - expected).abs() < 1e-9);
    }
}

#[test]
fn can_replace_nan_slot_with_finite_migrant() {
    let source = create_off_diagonal_population(vec![100.]);
    let mut destination = create_diagonal_population(vec![1., NAN, 3.]);

    let replaced = share_knowledge(
        &source,
        &mut destination,
        &create_settings(1, ReplacementPolicy::AlwaysIfBetter, false),
        create_test_random().as_ref(),
    );

    assert_eq!(replaced, 1);
    assert_eq!(destination.get_fitness(), vec![1., 100., 3.]);
}

#[test]
fn can_never_insert_candidate_worse_than_best_with_only_best_policy() {
    let random = DefaultRandom::new_repeatable(42);

    (0..50).for_each(|_| {
        let create_population = |size: usize| {
            let points = (0..size)
                .map(|_| vec![random.uniform_real(0., 1.), random.uniform_real(0., 1.)])
                .collect::<Vec<_>>();
            let fitness = (0..size).map(|_| random.uniform_real(-10., 10.)).collect();
            Population::new(points, fitness)
        };
        let source = create_population(8);
        let mut destination = create_population(6);
        let before = destination.clone();
        let best_before = before.best_fitness();

        let settings = ExchangeSettings {
            quota: 4,
            strategy: SelectionStrategy::new(0.5, 0.25, 0.25, 0.).unwrap(),
            policy: ReplacementPolicy::OnlyBest,
            require_new_best: false,
        };
        let replaced = share_knowledge(&source, &mut destination, &settings, &random);

        let changed = destination
            .individuals()
            .iter()
            .zip(before.individuals().iter())
            .filter(|(after, before)| after.x != before.x)
            .map(|(after, _)| after.fitness)
            .collect::<Vec<_>>();
        assert_eq!(changed.len(), replaced);
        assert!(changed.iter().all(|&fitness| fitness < best_before));
    });
}

parameterized_test! {can_parse_policy, (tag, expected), {
    can_parse_policy_impl(tag, expected);
}}

can_parse_policy! {
    case01_only_best: ("only best", Ok(ReplacementPolicy::OnlyBest)),
    case02_always_if_better: ("always-if-better", Ok(ReplacementPolicy::AlwaysIfBetter)),
    case03_in_between: ("In_Between", Ok(ReplacementPolicy::InBetween)),
    case04_unknown: ("sometimes", Err(OptimizerError::UnknownPolicy("sometimes".to_string()))),
}

fn can_parse_policy_impl(tag: &str, expected: Result<ReplacementPolicy, OptimizerError>) {
    assert_eq!(tag.parse::<ReplacementPolicy>(), expected);
}

use super::*;
use crate::helpers::utils::create_test_random;

const NAN: Float = Float::NAN;

fn create_line_population(fitness: Vec<Float>) -> Population {
    let size = fitness.len();
    let points = (0..size).map(|idx| vec![idx as Float / size as Float]).collect();

    Population::new(points, fitness)
}

#[test]
fn can_select_elite_points_first() {
    let population = create_line_population(vec![5., 1., 4., 2., 3.]);
    let strategy = SelectionStrategy::new(1., 0., 0., 0.).unwrap();

    let subsample = select_subsample(&population, 3, &strategy, 0., create_test_random().as_ref());

    assert_eq!(subsample.chosen, vec![1, 3, 4]);
    assert_eq!(subsample.points, vec![vec![0.2], vec![0.6], vec![0.8]]);
}

#[test]
fn can_never_prefer_nan_fitness_for_elite() {
    let population = create_line_population(vec![NAN, 2., NAN, 1.]);
    let strategy = SelectionStrategy::new(1., 0., 0., 0.).unwrap();

    let subsample = select_subsample(&population, 3, &strategy, 0., create_test_random().as_ref());

    assert_eq!(subsample.chosen, vec![3, 1, 0]);
}

#[test]
fn can_select_most_isolated_points_for_diverse() {
    let population = Population::new(vec![vec![0.], vec![0.05], vec![0.1], vec![0.9]], vec![1., 2., 3., 4.]);
    let strategy = SelectionStrategy::new(0., 1., 0., 0.).unwrap();

    let subsample = select_subsample(&population, 1, &strategy, 0., create_test_random().as_ref());

    assert_eq!(subsample.chosen, vec![3]);
}

#[test]
fn can_respect_ban_distance_between_chosen_points() {
    let population = Population::new(vec![vec![0.], vec![0.01], vec![0.02], vec![0.5]], vec![1., 2., 3., 4.]);
    let strategy = SelectionStrategy::new(1., 0., 0., 0.).unwrap();

    let subsample = select_subsample(&population, 2, &strategy, 0.1, create_test_random().as_ref());

    assert_eq!(subsample.chosen, vec![0, 3]);
}

#[test]
fn can_return_fewer_points_when_ban_exhausts_candidates() {
    let population = Population::new(vec![vec![0.], vec![0.01], vec![0.02]], vec![1., 2., 3.]);
    let strategy = SelectionStrategy::new(1., 0., 0., 0.).unwrap();

    let subsample = select_subsample(&population, 3, &strategy, 0.5, create_test_random().as_ref());

    assert_eq!(subsample.chosen, vec![0]);
}

#[test]
fn can_select_unique_indices_with_mixed_strategy() {
    let population = create_line_population((0..20).map(|idx| ((idx * 7) % 20) as Float).collect());
    let strategy = SelectionStrategy::new(0.3, 0.3, 0.3, 0.1).unwrap();

    let subsample = select_subsample(&population, 10, &strategy, 0., create_test_random().as_ref());

    let mut chosen = subsample.chosen.clone();
    chosen.sort();
    chosen.dedup();
    assert_eq!(chosen.len(), 10);
    assert_eq!(subsample.points.len(), 10);
}

#[test]
fn can_limit_count_by_population_size() {
    let population = create_line_population(vec![1., 2.]);
    let strategy = SelectionStrategy::new(0.25, 0.25, 0.25, 0.25).unwrap();

    let subsample = select_subsample(&population, 10, &strategy, 0., create_test_random().as_ref());

    assert_eq!(subsample.chosen.len(), 2);
}

#[test]
fn can_select_weakest_with_nan_first() {
    let population = create_line_population(vec![1., NAN, 5., 3.]);

    assert_eq!(select_weakest_sample(&population, 3), vec![1, 2, 3]);
    assert_eq!(select_weakest_sample(&population, 10), vec![1, 2, 3, 0]);
}

#[test]
fn can_order_by_combined_rank() {
    // best fitness but crowded vs. worse fitness but isolated
    let population = Population::new(vec![vec![0.], vec![0.01], vec![1.]], vec![1., 2., 3.]);

    let order = get_other_order(&population);

    assert_eq!(order, vec![0, 2, 1]);
}

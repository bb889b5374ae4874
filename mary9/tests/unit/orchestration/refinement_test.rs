use super::*;
use crate::helpers::local::FakeLocalSolver;
use crate::helpers::models::{create_diagonal_population, create_sphere_objective};
use crate::helpers::utils::create_test_environment;
use crate::local::ProjectedGradientSolver;

fn create_refinement(quotas: &[usize], solver: Box<dyn LocalSolver + Send + Sync>) -> RuntimeRefinement {
    RuntimeRefinement::new(quotas, solver, create_sphere_objective(vec![0., 0.], vec![1., 1.]), create_test_environment())
}

fn create_off_diagonal_population(fitness: Vec<Float>) -> Population {
    let size = fitness.len();
    let points = (0..size).map(|idx| vec![(idx as Float + 0.5) / size as Float, 0.95]).collect();

    Population::new(points, fitness)
}

#[test]
fn can_consume_quotas_round_by_round() {
    let mut refinement = create_refinement(&[2, 1, 0], Box::new(FakeLocalSolver::new(-1.)));
    let mut first = create_diagonal_population(vec![1., 2., 3.]);
    let mut second = create_off_diagonal_population(vec![4., 5., 6.]);

    let counts = (0..4).map(|_| refinement.run(&mut first, &mut second)).collect::<Vec<_>>();

    assert_eq!(counts, vec![2, 1, 0, 0]);
    assert_eq!(refinement.rounds(), 4);
}

#[test]
fn can_write_results_into_owning_slots() {
    let solver = FakeLocalSolver::new(-1.);
    let ids = solver.ids();
    let mut refinement = create_refinement(&[4], Box::new(solver));
    let mut first = create_diagonal_population(vec![1., 2., 3.]);
    let mut second = create_off_diagonal_population(vec![4., 5.]);
    let points_before = first.individuals().iter().chain(second.individuals()).map(|i| i.x.clone()).collect::<Vec<_>>();

    let refined = refinement.run(&mut first, &mut second);

    let refined_slots = first.get_fitness().into_iter().chain(second.get_fitness()).filter(|&f| f == -1.).count();
    assert_eq!(refined, 4);
    assert_eq!(refined_slots, 4);
    assert_eq!(ids.lock().unwrap().len(), 4);
    assert_eq!((first.popsize(), second.popsize()), (3, 2));
    let points_after = first.individuals().iter().chain(second.individuals()).map(|i| i.x.clone()).collect::<Vec<_>>();
    points_before.iter().zip(points_after.iter()).for_each(|(before, after)| {
        before.iter().zip(after.iter()).for_each(|(b, a)| assert!((b - a).abs() < 1e-12));
    });
}

#[test]
fn can_improve_selected_members_with_gradient_solver() {
    let objective = create_sphere_objective(vec![-1., -1.], vec![1., 1.]);
    let environment = create_test_environment();
    let solver = ProjectedGradientSolver::new(50, None, environment.clone());
    let mut refinement = RuntimeRefinement::new(&[3], Box::new(solver), objective.clone(), environment);
    let create_population = |points: Vec<Vec<Float>>| {
        let fitness = points.iter().map(|x| objective.evaluate_normalized(x.as_slice())).collect();
        Population::new(points, fitness)
    };
    let mut first = create_population(vec![vec![0.1, 0.9], vec![0.8, 0.3]]);
    let mut second = create_population(vec![vec![0.95, 0.95], vec![0.2, 0.2]]);
    let before = first.get_fitness().into_iter().chain(second.get_fitness()).collect::<Vec<_>>();

    let refined = refinement.run(&mut first, &mut second);

    let after = first.get_fitness().into_iter().chain(second.get_fitness()).collect::<Vec<_>>();
    assert_eq!(refined, 3);
    assert!(after.iter().zip(before.iter()).all(|(a, b)| a <= b));
    assert_eq!(after.iter().filter(|&&f| f < 1e-6).count(), 3);
}

parameterized_test! {can_locate_slot, (global_idx, first_size, expected), {
    assert_eq!(locate_slot(global_idx, first_size), expected);
}}

can_locate_slot! {
    case01_first: (2, 3, (true, 2)),
    case02_second_start: (3, 3, (false, 0)),
    case03_second: (7, 3, (false, 4)),
    case04_empty_first: (0, 0, (false, 0)),
}

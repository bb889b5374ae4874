use super::*;
use crate::helpers::models::create_sphere_objective;

#[test]
fn can_evaluate_normalized_point_in_objective_space() {
    let objective = create_sphere_objective(vec![-1., -1.], vec![1., 1.]);

    assert_eq!(objective.evaluate_normalized(&[0.5, 0.5]), 0.);
    assert_eq!(objective.evaluate_normalized(&[1., 0.5]), 1.);
    assert_eq!(objective.evaluations(), 2);
}

#[test]
fn can_evaluate_batch_preserving_order() {
    let objective = create_sphere_objective(vec![0., 0.], vec![1., 1.]);
    let points = vec![vec![0., 0.], vec![1., 0.], vec![1., 1.]];

    let sequential = objective.evaluate_batch(points.as_slice(), false);
    let parallel = objective.evaluate_batch(points.as_slice(), true);

    assert_eq!(sequential, vec![0., 1., 2.]);
    assert_eq!(parallel, sequential);
    assert_eq!(objective.evaluations(), 6);
}

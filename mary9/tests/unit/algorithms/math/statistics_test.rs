use super::*;

const NAN: Float = Float::NAN;

#[test]
fn can_get_min_ignoring_nan() {
    assert_eq!(nan_min(&[3., NAN, 1., 2.]), 1.);
    assert!(nan_min(&[NAN, NAN]).is_nan());
    assert!(nan_min(&[]).is_nan());
}

parameterized_test! {can_get_percentile, (values, q, expected), {
    can_get_percentile_impl(values, q, expected);
}}

can_get_percentile! {
    case_01_median: (vec![1., 2., 3., 4., 5.], 50., 3.),
    case_02_interpolated: (vec![1., 2., 3., 4., 5.], 5., 1.2),
    case_03_min: (vec![5., 1., 3.], 0., 1.),
    case_04_max: (vec![5., 1., 3.], 100., 5.),
    case_05_with_nan: (vec![NAN, 10., NAN, 20.], 50., 15.),
    case_06_single: (vec![7.], 5., 7.),
}

fn can_get_percentile_impl(values: Vec<Float>, q: Float, expected: Float) {
    let result = nan_percentile(values.as_slice(), q);

    assert!((result - expected).abs() < 1e-9, "expected {expected}, got {result}");
}

#[test]
fn can_return_nan_percentile_for_all_nan() {
    assert!(nan_percentile(&[NAN, NAN], 5.).is_nan());
}

#[test]
fn can_get_ranks_with_nan_last() {
    assert_eq!(get_ranks(&[3., NAN, 1., 2.]), vec![2, 3, 0, 1]);
    assert_eq!(get_ranks(&[1., 1.]), vec![0, 1]);
}

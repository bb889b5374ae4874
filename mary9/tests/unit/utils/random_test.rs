use super::*;

#[test]
fn can_return_same_values_for_same_seed() {
    let first = DefaultRandom::new_repeatable(42);
    let second = DefaultRandom::new_repeatable(42);

    let first = (0..10).map(|_| first.uniform_real(0., 1.)).collect::<Vec<_>>();
    let second = (0..10).map(|_| second.uniform_real(0., 1.)).collect::<Vec<_>>();

    assert_eq!(first, second);
}

#[test]
fn can_return_int_within_closed_range() {
    let random = DefaultRandom::new_repeatable(0);

    (0..100).for_each(|_| {
        let value = random.uniform_int(2, 4);
        assert!((2..=4).contains(&value));
    });

    assert_eq!(random.uniform_int(3, 3), 3);
}

#[test]
fn can_shuffle_keeping_all_values() {
    let random = DefaultRandom::new_repeatable(1);
    let mut values = (0..20).collect::<Vec<_>>();

    random.shuffle(values.as_mut_slice());
    values.sort();

    assert_eq!(values, (0..20).collect::<Vec<_>>());
}

#[test]
fn can_produce_finite_normal_values() {
    let random = DefaultRandom::new_repeatable(7);

    let values = (0..1000).map(|_| random.normal()).collect::<Vec<_>>();
    let mean = values.iter().sum::<Float>() / values.len() as Float;

    assert!(values.iter().all(|value| value.is_finite()));
    assert!(mean.abs() < 0.2);
}

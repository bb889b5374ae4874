#[cfg(test)]
#[path = "../../tests/unit/utils/comparison_test.rs"]
mod comparison_test;

use crate::utils::Float;
use std::cmp::{Ordering, PartialOrd};

macro_rules! compare_float_types {
    ($fn_name_: ident, $type_: ty) => {
        /// Compares floating point numbers treating NaN as the greatest value.
        #[inline]
        pub fn $fn_name_(a: $type_, b: $type_) -> Ordering {
            match a.partial_cmp(&b) {
                Some(ordering) => ordering,
                None => match (a.is_nan(), b.is_nan()) {
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    _ => Ordering::Equal,
                },
            }
        }
    };
}

compare_float_types! { compare_floats, Float}
compare_float_types! { compare_floats_refs, &Float}

/// Returns true if `a` is strictly better (lower) than `b` in NaN-aware order:
/// a NaN value is never better than anything, any number is better than NaN.
#[inline]
pub fn is_strictly_better(a: Float, b: Float) -> bool {
    compare_floats(a, b) == Ordering::Less
}

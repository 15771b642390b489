//! Testing utilities: assertion helpers shared by unit and integration
//! tests.
//!
//! ```ignore
//! use slicefinder::testing::{assert_stats_approx_eq, DEFAULT_TOLERANCE};
//! use slicefinder::assert_approx_eq_f64;
//! ```

use approx::abs_diff_eq;

use crate::enumeration::SliceStats;

/// Default tolerance for floating point comparisons of scores and errors.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance. Two
/// infinities of the same sign compare equal.
///
/// # Examples
///
/// ```
/// # use slicefinder::assert_approx_eq_f64;
/// assert_approx_eq_f64!(1.0f64, 1.0001f64, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq_f64 {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        if left_val != right_val && !((left_val - right_val).abs() <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  tolerance: `{:?}`",
                left_val, right_val, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        if left_val != right_val && !((left_val - right_val).abs() <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  tolerance: `{:?}`",
                format_args!($($arg)+), left_val, right_val, tol
            );
        }
    }};
}

/// Returns `true` when two stats rows agree within `tolerance` on every
/// column.
pub fn stats_approx_eq(a: &SliceStats, b: &SliceStats, tolerance: f64) -> bool {
    let field_eq = |x: f64, y: f64| x == y || abs_diff_eq!(x, y, epsilon = tolerance);
    field_eq(a.score, b.score)
        && field_eq(a.total_error, b.total_error)
        && field_eq(a.max_error, b.max_error)
        && field_eq(a.size, b.size)
}

/// Assert that two stats sequences agree row by row within `tolerance`.
///
/// # Panics
///
/// Panics with the first differing row on mismatch.
pub fn assert_stats_approx_eq(actual: &[SliceStats], expected: &[SliceStats], tolerance: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "stats length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            stats_approx_eq(a, e, tolerance),
            "stats row {} differs:\n  actual: {:?}\n  expected: {:?}",
            i,
            a,
            e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(score: f64) -> SliceStats {
        SliceStats {
            score,
            total_error: 1.0,
            max_error: 1.0,
            size: 2.0,
        }
    }

    #[test]
    fn approx_eq_within_tolerance() {
        assert_approx_eq_f64!(1.0, 1.0 + 1e-12, 1e-9);
        assert_approx_eq_f64!(f64::NEG_INFINITY, f64::NEG_INFINITY, 1e-9);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn approx_eq_outside_tolerance_panics() {
        assert_approx_eq_f64!(1.0, 1.1, 1e-9);
    }

    #[test]
    fn stats_rows_compare_fieldwise() {
        assert!(stats_approx_eq(&stats(0.5), &stats(0.5 + 1e-12), 1e-9));
        assert!(!stats_approx_eq(&stats(0.5), &stats(0.6), 1e-9));
        assert_stats_approx_eq(&[stats(1.0)], &[stats(1.0)], 1e-9);
    }
}

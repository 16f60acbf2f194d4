//! Testing utilities for descent-attn.
//!
//! Assertion helpers and seeded data generators shared by unit tests,
//! integration tests and benches.
//!
//! ```ignore
//! use descent_attn::testing::{assert_array_approx_eq, assert_slice_approx_eq_f64};
//! use descent_attn::assert_approx_eq_f64;
//! ```

pub mod data;

use approx::AbsDiffEq;
use ndarray::{ArrayBase, Axis, Data, Dimension};

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two f64 values are approximately equal.
///
/// # Examples
///
/// ```
/// # use descent_attn::assert_approx_eq_f64;
/// assert_approx_eq_f64!(2.0, 2.0000001, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_approx_eq_f64 {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two slices are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f32], expected: &[f32], tolerance: f32, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}[{i}]: {a} ≠ {e} (diff={diff}, tolerance={tolerance})"
        );
    }
}

/// Assert that an f32 slice matches f64 expected values.
///
/// Useful when comparing against fixtures stored as f64.
pub fn assert_slice_approx_eq_f64(
    actual: &[f32],
    expected: &[f64],
    tolerance: f64,
    context: &str,
) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (*a as f64 - *e).abs();
        assert!(
            diff <= tolerance,
            "{context}[{i}]: {a} ≠ {e} (diff={diff}, tolerance={tolerance})"
        );
    }
}

// =============================================================================
// Array Assertions
// =============================================================================

/// Git-style diff of the last-axis rows that differ between two arrays.
fn diff_rows<S1, S2, D>(
    actual: &ArrayBase<S1, D>,
    expected: &ArrayBase<S2, D>,
    epsilon: f32,
) -> String
where
    S1: Data<Elem = f32>,
    S2: Data<Elem = f32>,
    D: Dimension,
{
    let mut result = String::new();
    result.push_str(&format!("Shape: {:?}\n", actual.shape()));
    result.push_str(&format!("Epsilon: {epsilon:.0e}\n\n"));

    let last = Axis(actual.ndim().saturating_sub(1));
    for (i, (act_row, exp_row)) in actual.lanes(last).into_iter().zip(expected.lanes(last)).enumerate() {
        let differs = act_row
            .iter()
            .zip(exp_row.iter())
            .any(|(a, e)| !a.abs_diff_eq(e, epsilon));
        if !differs {
            continue;
        }

        result.push_str(&format!("[{i:3}] -"));
        for val in exp_row.iter() {
            result.push_str(&format!(" {val:>12.6}"));
        }
        result.push_str("  (expected)\n");

        result.push_str("      +");
        for val in act_row.iter() {
            result.push_str(&format!(" {val:>12.6}"));
        }
        result.push_str("  (actual)\n");
    }

    result
}

/// Assert that two arrays have the same shape and approximately equal values.
///
/// On failure, shows a git-style diff of the differing rows (last axis).
///
/// # Panics
///
/// Panics if shapes differ or any value differs by more than epsilon.
pub fn assert_array_approx_eq<S1, S2, D>(
    actual: &ArrayBase<S1, D>,
    expected: &ArrayBase<S2, D>,
    epsilon: f32,
    context: &str,
) where
    S1: Data<Elem = f32>,
    S2: Data<Elem = f32>,
    D: Dimension,
{
    if actual.shape() != expected.shape() {
        panic!(
            "\n{context}: shape mismatch\n- {:?}  (expected)\n+ {:?}  (actual)\n",
            expected.shape(),
            actual.shape()
        );
    }

    let diff_count = actual
        .iter()
        .zip(expected.iter())
        .filter(|(a, e)| !a.abs_diff_eq(e, epsilon))
        .count();

    if diff_count > 0 {
        let total = actual.len();
        let diff_output = diff_rows(actual, expected, epsilon);
        panic!("\n{context}: {diff_count}/{total} values differ\n\n{diff_output}");
    }
}

/// Assert that every last-axis row is a probability distribution:
/// non-negative entries summing to 1 within `tolerance`.
pub fn assert_rows_are_distributions<S, D>(weights: &ArrayBase<S, D>, tolerance: f32, context: &str)
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let last = Axis(weights.ndim().saturating_sub(1));
    for (i, row) in weights.lanes(last).into_iter().enumerate() {
        assert!(
            row.iter().all(|&w| w >= 0.0),
            "{context}: row {i} has a negative entry: {row}"
        );
        let sum: f32 = row.sum();
        assert!(
            (sum - 1.0).abs() <= tolerance,
            "{context}: row {i} sums to {sum}, expected 1 (tolerance={tolerance})"
        );
    }
}

//! Softmax over the last axis.

use ndarray::{ArrayBase, Axis, DataMut, Dimension};

/// How softmax exponentiates its inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SoftmaxKind {
    /// `exp(x) / Σ exp(x)` on the raw values.
    ///
    /// Once a logit exceeds ~88 its exponential overflows: that entry becomes
    /// `NaN` and every finite entry in the row becomes `0`.
    Naive,
    /// Subtract the row maximum before exponentiating.
    #[default]
    Stable,
}

/// Apply softmax in-place to a single row.
///
/// Empty rows are left untouched.
#[inline]
pub fn softmax_row_inplace(row: &mut [f32], kind: SoftmaxKind) {
    if row.is_empty() {
        return;
    }

    let shift = match kind {
        SoftmaxKind::Naive => 0.0,
        SoftmaxKind::Stable => row.iter().cloned().fold(f32::NEG_INFINITY, f32::max),
    };

    let mut sum = 0.0f32;
    for x in row.iter_mut() {
        *x = (*x - shift).exp();
        sum += *x;
    }

    for x in row.iter_mut() {
        *x /= sum;
    }
}

/// Apply softmax in-place along the last axis of `array`.
///
/// Rows that are not contiguous in memory are handled through a scratch
/// buffer.
///
/// # Example
///
/// ```
/// use descent_attn::attention::{softmax_last_axis, SoftmaxKind};
/// use ndarray::array;
///
/// let mut logits = array![[0.0f32, 0.0], [1.0, 1.0]];
/// softmax_last_axis(&mut logits, SoftmaxKind::Naive);
/// assert_eq!(logits, array![[0.5, 0.5], [0.5, 0.5]]);
/// ```
pub fn softmax_last_axis<S, D>(array: &mut ArrayBase<S, D>, kind: SoftmaxKind)
where
    S: DataMut<Elem = f32>,
    D: Dimension,
{
    if array.ndim() == 0 {
        return;
    }
    let last = Axis(array.ndim() - 1);
    let mut scratch = Vec::new();

    for mut row in array.lanes_mut(last) {
        match row.as_slice_mut() {
            Some(slice) => softmax_row_inplace(slice, kind),
            None => {
                scratch.clear();
                scratch.extend(row.iter().copied());
                softmax_row_inplace(&mut scratch, kind);
                for (dst, &src) in row.iter_mut().zip(scratch.iter()) {
                    *dst = src;
                }
            }
        }
    }
}

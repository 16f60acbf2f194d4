//! Scaled dot-product attention.
//!
//! ```text
//! Attention(Q, K, V) = softmax(Q·Kᵗ / sqrt(d_k)) · V
//! ```
//!
//! Inputs are `f32` arrays shaped `[batch..., seq_len, feature_dim]` with any
//! number of leading batch axes (at least one). The leading axes of Q, K and V
//! must match exactly; they are flattened into a single batch axis for the
//! computation and restored on the results.
//!
//! The softmax subtracts each row's maximum before exponentiating
//! ([`SoftmaxKind::Stable`]). [`SoftmaxKind::Naive`] evaluates the textbook
//! formula on the raw logits instead. In `f32` a logit above ~88 overflows to
//! infinity, so its row sums to infinity: overflowing entries become `NaN` and
//! the remaining ones become `0`.

mod scaled;
mod softmax;

pub use scaled::{
    scaled_dot_product_attention, scaled_dot_product_attention_with, Attention, AttentionError,
    AttentionParams, Operand,
};
pub use softmax::{softmax_last_axis, softmax_row_inplace, SoftmaxKind};

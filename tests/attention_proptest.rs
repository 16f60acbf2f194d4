//! Property-based tests for scaled dot-product attention.

use ndarray::{Array3, ArrayD, IxDyn};
use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use descent_attn::scaled_dot_product_attention;

// =============================================================================
// Strategies
// =============================================================================

/// Attention geometry: (batch, seq_q, seq_k, d_k, d_v).
fn arb_geometry() -> impl Strategy<Value = (usize, usize, usize, usize, usize)> {
    (1usize..4, 1usize..5, 1usize..6, 1usize..6, 1usize..4)
}

/// Geometry plus matching q, k, v values in [-10, 10].
fn arb_attention_inputs() -> impl Strategy<Value = (Array3<f32>, Array3<f32>, Array3<f32>)> {
    arb_geometry().prop_flat_map(|(b, sq, sk, dk, dv)| {
        (
            prop_vec(-10.0f32..10.0, b * sq * dk),
            prop_vec(-10.0f32..10.0, b * sk * dk),
            prop_vec(-10.0f32..10.0, b * sk * dv),
        )
            .prop_map(move |(q, k, v)| {
                (
                    Array3::from_shape_vec((b, sq, dk), q).unwrap(),
                    Array3::from_shape_vec((b, sk, dk), k).unwrap(),
                    Array3::from_shape_vec((b, sk, dv), v).unwrap(),
                )
            })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn weights_are_distributions((q, k, v) in arb_attention_inputs()) {
        let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();
        let (b, sq, sk) = (q.shape()[0], q.shape()[1], k.shape()[1]);
        prop_assert_eq!(attn.weights.shape(), &[b, sq, sk]);
        prop_assert_eq!(attn.output.shape(), &[b, sq, v.shape()[2]]);

        for row in attn.weights.rows() {
            prop_assert!(row.iter().all(|&w| w >= 0.0 && w.is_finite()));
            prop_assert!((row.sum() - 1.0).abs() < 1e-4, "row sums to {}", row.sum());
        }
    }

    #[test]
    fn output_lies_within_value_range((q, k, v) in arb_attention_inputs()) {
        let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();
        let lo = v.iter().cloned().fold(f32::INFINITY, f32::min);
        let hi = v.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let slack = 1e-3 * (1.0 + lo.abs().max(hi.abs()));

        for &o in attn.output.iter() {
            prop_assert!(o >= lo - slack && o <= hi + slack, "{} outside [{}, {}]", o, lo, hi);
        }
    }

    #[test]
    fn extra_batch_axes_match_flattened(
        (q, k, v) in arb_attention_inputs(),
        split in 1usize..3,
    ) {
        // Reshape the batch axis into [1, b] or [b, 1] and compare.
        let reshape = |a: &Array3<f32>| {
            let (b, r, c) = a.dim();
            let dims = if split == 1 { vec![1, b, r, c] } else { vec![b, 1, r, c] };
            ArrayD::from_shape_vec(IxDyn(&dims), a.iter().copied().collect()).unwrap()
        };

        let flat = scaled_dot_product_attention(&q, &k, &v).unwrap();
        let nested = scaled_dot_product_attention(&reshape(&q), &reshape(&k), &reshape(&v)).unwrap();

        prop_assert_eq!(
            flat.output.iter().copied().collect::<Vec<_>>(),
            nested.output.iter().copied().collect::<Vec<_>>()
        );
    }
}

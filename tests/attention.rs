//! Integration tests for batched scaled dot-product attention.

mod common;

use ndarray::{s, Array, Array3, Axis, Ix3};
use rstest::rstest;

use common::load_attention_case;
use descent_attn::testing::data::{random_array3, random_tensor};
use descent_attn::testing::{
    assert_array_approx_eq, assert_rows_are_distributions, assert_slice_approx_eq_f64,
};
use descent_attn::{
    scaled_dot_product_attention, scaled_dot_product_attention_with, AttentionError,
    AttentionParams, SoftmaxKind,
};

#[test]
fn matches_reference_small_batch() {
    let case = load_attention_case("small_batch");
    let (q, k, v) = (case.query.to_array(), case.key.to_array(), case.value.to_array());

    let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();

    assert_eq!(attn.weights.shape(), case.expected_weights.shape.as_slice());
    assert_eq!(attn.output.shape(), case.expected_output.shape.as_slice());
    assert_slice_approx_eq_f64(
        attn.weights.as_slice().unwrap(),
        &case.expected_weights.data,
        1e-6,
        "weights",
    );
    assert_slice_approx_eq_f64(
        attn.output.as_slice().unwrap(),
        &case.expected_output.data,
        1e-6,
        "output",
    );
}

#[test]
fn naive_softmax_overflows_on_small_batch() {
    let case = load_attention_case("small_batch");
    let (q, k, v) = (case.query.to_array(), case.key.to_array(), case.value.to_array());
    let params = AttentionParams {
        softmax: SoftmaxKind::Naive,
        ..Default::default()
    };

    let attn = scaled_dot_product_attention_with(&q, &k, &v, &params).unwrap();

    // Second query row has logits near 70.4 and 96.4: exp(96.4) overflows f32,
    // so the row sum is infinite.
    let weights = &attn.weights;
    assert!(weights.slice(s![0, 0, 0, ..]).iter().all(|w| w.is_finite()));
    assert_eq!(weights[[0, 0, 1, 0]], 0.0);
    assert!(weights[[0, 0, 1, 1]].is_nan());
    assert!(attn.output.slice(s![0, 0, 1, ..]).iter().all(|o| o.is_nan()));
}

#[rstest]
#[case::small_integers([1.0, 2.0, 3.0])]
#[case::mixed_signs([-0.5, 0.0, 2.5])]
#[case::large_logits([10.0, 20.0, 30.0])]
fn self_attention_over_identical_rows_returns_the_row(#[case] row: [f32; 3]) {
    // Q = K = V: one batch of two identical rows.
    let x = Array3::from_shape_fn((1, 2, 3), |(_, _, j)| row[j]);

    let attn = scaled_dot_product_attention(&x, &x, &x).unwrap();

    let uniform = Array::from_elem(attn.weights.raw_dim(), 0.5f32);
    assert_array_approx_eq(&attn.weights, &uniform, 1e-6, "weights");
    assert_array_approx_eq(&attn.output, &x.into_dyn(), 1e-5, "output");
}

#[rstest]
#[case::single_batch_axis(&[2], 3, 5, 4, 6)]
#[case::two_batch_axes(&[2, 3], 4, 4, 8, 2)]
#[case::one_query(&[1], 1, 7, 3, 3)]
fn output_shapes(
    #[case] batch: &[usize],
    #[case] seq_q: usize,
    #[case] seq_k: usize,
    #[case] d_k: usize,
    #[case] d_v: usize,
) {
    let with_tail = |rows, cols| {
        let mut dims = batch.to_vec();
        dims.extend([rows, cols]);
        dims
    };
    let q = random_tensor(&with_tail(seq_q, d_k), 1);
    let k = random_tensor(&with_tail(seq_k, d_k), 2);
    let v = random_tensor(&with_tail(seq_k, d_v), 3);

    let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();

    assert_eq!(attn.output.shape(), with_tail(seq_q, d_v).as_slice());
    assert_eq!(attn.weights.shape(), with_tail(seq_q, seq_k).as_slice());
    assert_rows_are_distributions(&attn.weights, 1e-5, "random inputs");
}

#[test]
fn identical_keys_give_uniform_weights() {
    let q = random_array3(2, 3, 4, 11, -1.0, 1.0);
    let k = Array3::<f32>::from_elem((2, 5, 4), 0.25);
    let v = random_array3(2, 5, 3, 12, -2.0, 2.0);

    let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();

    let uniform = Array::from_elem(attn.weights.raw_dim(), 1.0 / 5.0);
    assert_array_approx_eq(&attn.weights, &uniform, 1e-6, "uniform weights");

    let output = attn.output.into_dimensionality::<Ix3>().unwrap();
    for b in 0..2 {
        let mean = v.index_axis(Axis(0), b).mean_axis(Axis(0)).unwrap();
        for row in output.index_axis(Axis(0), b).rows() {
            assert_array_approx_eq(&row, &mean, 1e-5, "mean of values");
        }
    }
}

#[test]
fn output_is_constant_when_values_are() {
    let q = random_array3(1, 4, 6, 21, -3.0, 3.0);
    let k = random_array3(1, 7, 6, 22, -3.0, 3.0);
    let v = Array3::<f32>::from_shape_fn((1, 7, 2), |(_, _, j)| j as f32 + 0.5);

    let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();

    let output = attn.output.into_dimensionality::<Ix3>().unwrap();
    for row in output.index_axis(Axis(0), 0).rows() {
        assert!((row[0] - 0.5).abs() < 1e-5, "{row}");
        assert!((row[1] - 1.5).abs() < 1e-5, "{row}");
    }
}

#[test]
fn batches_are_independent() {
    let q = random_array3(3, 2, 4, 31, -1.0, 1.0);
    let k = random_array3(3, 5, 4, 32, -1.0, 1.0);
    let v = random_array3(3, 5, 2, 33, -1.0, 1.0);

    let full = scaled_dot_product_attention(&q, &k, &v).unwrap();

    for b in 0..3 {
        let one = scaled_dot_product_attention(
            &q.slice(s![b..b + 1, .., ..]),
            &k.slice(s![b..b + 1, .., ..]),
            &v.slice(s![b..b + 1, .., ..]),
        )
        .unwrap();
        assert_array_approx_eq(
            &one.output.index_axis(Axis(0), 0),
            &full.output.index_axis(Axis(0), b),
            1e-6,
            "per-batch output",
        );
    }
}

#[test]
fn shape_errors_are_reported() {
    let q = random_tensor(&[2, 3, 4], 0);
    let k = random_tensor(&[2, 5, 3], 0);
    let v = random_tensor(&[2, 5, 2], 0);
    assert!(matches!(
        scaled_dot_product_attention(&q, &k, &v),
        Err(AttentionError::FeatureDimMismatch { query: 4, key: 3 })
    ));

    let k = random_tensor(&[3, 5, 4], 0);
    let v = random_tensor(&[3, 5, 2], 0);
    assert!(matches!(
        scaled_dot_product_attention(&q, &k, &v),
        Err(AttentionError::BatchShapeMismatch { .. })
    ));
}

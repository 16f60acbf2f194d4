//! Run scaled dot-product attention on a small batch and print the results.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example attention
//! ```

use ndarray::Array;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use descent_attn::testing::data::random_tensor;
use descent_attn::{
    scaled_dot_product_attention, scaled_dot_product_attention_with, AttentionError,
    AttentionParams, SoftmaxKind, Verbosity,
};

fn main() -> Result<(), AttentionError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let query = Array::from_shape_vec((1, 1, 2, 3), vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0])?;
    let key = Array::from_shape_vec((1, 1, 2, 3), vec![7.0f32, 8.0, 9.0, 10.0, 11.0, 12.0])?;
    let value = Array::from_shape_vec((1, 1, 2, 2), vec![0.1f32, 0.2, 0.3, 0.4])?;

    for softmax in [SoftmaxKind::Stable, SoftmaxKind::Naive] {
        let params = AttentionParams {
            softmax,
            verbosity: Verbosity::Debug,
        };
        let (output, weights) =
            scaled_dot_product_attention_with(&query, &key, &value, &params)?.into_parts();

        println!("{softmax:?} softmax");
        println!("weights:\n{weights:.6}");
        println!("output:\n{output:.6}");
    }

    let q = random_tensor(&[2, 3, 4], 1);
    let k = random_tensor(&[2, 3, 4], 2);
    let v = random_tensor(&[2, 3, 4], 3);
    let attn = scaled_dot_product_attention(&q, &k, &v)?;
    println!(
        "random batch: output {:?}, weights {:?}",
        attn.output.shape(),
        attn.weights.shape()
    );

    Ok(())
}

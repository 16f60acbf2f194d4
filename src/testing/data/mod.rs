use ndarray::{Array3, ArrayD, IxDyn};
use rand::prelude::*;

use crate::data::SampleSet;

/// Generate uniform random values in `[min, max)`.
pub fn random_values_f32(len: usize, seed: u64, min: f32, max: f32) -> Vec<f32> {
	assert!(max >= min);
	let mut rng = StdRng::seed_from_u64(seed);
	let width = max - min;
	(0..len).map(|_| min + rng.r#gen::<f32>() * width).collect()
}

/// Random tensor of any shape with values uniform in `[0, 1)`.
pub fn random_tensor(shape: &[usize], seed: u64) -> ArrayD<f32> {
	let len = shape.iter().product();
	let values = random_values_f32(len, seed, 0.0, 1.0);
	ArrayD::from_shape_vec(IxDyn(shape), values).expect("shape matches generated length")
}

/// Random `[batch, seq_len, feature_dim]` tensor with values uniform in `[min, max)`.
pub fn random_array3(
	batch: usize,
	seq_len: usize,
	feature_dim: usize,
	seed: u64,
	min: f32,
	max: f32,
) -> Array3<f32> {
	let values = random_values_f32(batch * seq_len * feature_dim, seed, min, max);
	Array3::from_shape_vec((batch, seq_len, feature_dim), values)
		.expect("shape matches generated length")
}

/// Samples on the line `y = slope·x + intercept`, with `x` uniform in `[x_min, x_max)`
/// and optional uniform noise in `[-noise_amplitude, noise_amplitude)` added to `y`.
pub fn linear_samples(
	n: usize,
	slope: f64,
	intercept: f64,
	x_min: f64,
	x_max: f64,
	noise_amplitude: f64,
	seed: u64,
) -> SampleSet {
	assert!(n > 0);
	assert!(x_max >= x_min);
	let mut rng = StdRng::seed_from_u64(seed);
	let width = x_max - x_min;

	let x: Vec<f64> = (0..n).map(|_| x_min + rng.r#gen::<f64>() * width).collect();
	let y: Vec<f64> = x
		.iter()
		.map(|&xi| {
			let mut yi = slope * xi + intercept;
			if noise_amplitude > 0.0 {
				yi += (rng.r#gen::<f64>() * 2.0 - 1.0) * noise_amplitude;
			}
			yi
		})
		.collect();

	SampleSet::from_slices(&x, &y).expect("generated samples are non-empty and paired")
}

//! Test case loading utilities for integration tests.
//!
//! Fixtures live under `tests/test-cases/`. For assertion helpers, use
//! `descent_attn::testing`.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use ndarray::{ArrayD, IxDyn};
use serde::de::DeserializeOwned;
use serde::Deserialize;

// =============================================================================
// Test Case Loading
// =============================================================================

/// Base directory for test cases.
pub fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// Load a JSON file and deserialize it.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> T {
    let file =
        File::open(path).unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
    serde_json::from_reader(file)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

// =============================================================================
// Line Fitting Cases
// =============================================================================

/// Expected outcome of a line fit.
#[derive(Debug, Deserialize)]
pub struct ExpectedFit {
    pub slope: f64,
    pub intercept: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// A gradient-descent run with pinned reference results.
#[derive(Debug, Deserialize)]
pub struct LinearFitCase {
    pub description: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub iterations: usize,
    pub learning_rate: f64,
    pub stopping_threshold: f64,
    pub expected: ExpectedFit,
}

pub fn load_linear_fit_case(name: &str) -> LinearFitCase {
    load_json(&test_cases_dir().join("linear_fit").join(format!("{name}.json")))
}

// =============================================================================
// Attention Cases
// =============================================================================

/// A dense tensor stored as its shape plus row-major data.
#[derive(Debug, Deserialize)]
pub struct TensorData {
    pub shape: Vec<usize>,
    pub data: Vec<f64>,
}

impl TensorData {
    pub fn to_array(&self) -> ArrayD<f32> {
        let values = self.data.iter().map(|&v| v as f32).collect();
        ArrayD::from_shape_vec(IxDyn(&self.shape), values)
            .unwrap_or_else(|e| panic!("bad tensor fixture {:?}: {e}", self.shape))
    }
}

/// Attention inputs with reference weights and output.
#[derive(Debug, Deserialize)]
pub struct AttentionCase {
    pub description: String,
    pub query: TensorData,
    pub key: TensorData,
    pub value: TensorData,
    pub expected_weights: TensorData,
    pub expected_output: TensorData,
}

pub fn load_attention_case(name: &str) -> AttentionCase {
    load_json(&test_cases_dir().join("attention").join(format!("{name}.json")))
}

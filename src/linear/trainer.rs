//! Gradient-descent trainer for [`LineModel`].
//!
//! # Example
//!
//! The one-call form:
//!
//! ```
//! use descent_attn::linear::gradient_descent;
//!
//! let model = gradient_descent(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], 10_000, 0.05, 1e-9).unwrap();
//! assert!((model.slope() - 2.0).abs() < 1e-3);
//! ```
//!
//! With a validated sample set and full report:
//!
//! ```
//! use descent_attn::data::SampleSet;
//! use descent_attn::linear::{LinearFitConfig, LinearFitTrainer, StopReason};
//!
//! let samples = SampleSet::from_slices(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
//! let config = LinearFitConfig::builder()
//!     .iterations(10_000)
//!     .learning_rate(0.05)
//!     .build()
//!     .unwrap();
//!
//! let report = LinearFitTrainer::new(config).fit(&samples);
//! assert_eq!(report.stop_reason, StopReason::Converged);
//! assert!(report.iterations < 10_000);
//! ```

use crate::data::{DataError, SampleSet};
use crate::logger::TrainingLogger;

use super::config::{ConfigError, LinearFitConfig};
use super::gradient::LineGradient;
use super::LineModel;

// ============================================================================
// Errors and results
// ============================================================================

/// Errors from the one-call fitting functions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("invalid samples: {0}")]
    Data(#[from] DataError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Why the training loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The applied step fell below the stopping threshold.
    Converged,
    /// All configured iterations ran.
    MaxIterations,
}

/// Outcome of a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// Parameters after the last executed iteration (including its update).
    pub model: LineModel,
    /// Number of iterations executed, in `1..=config.iterations`.
    pub iterations: usize,
    pub stop_reason: StopReason,
    /// Mean squared error measured at the start of the last executed iteration.
    pub final_cost: f64,
}

// ============================================================================
// LinearFitTrainer
// ============================================================================

/// Batch gradient-descent line fitter.
#[derive(Debug, Clone, Default)]
pub struct LinearFitTrainer {
    config: LinearFitConfig,
}

impl LinearFitTrainer {
    /// Create a trainer that fits with `config`.
    pub fn new(config: LinearFitConfig) -> Self {
        Self { config }
    }

    /// Fit a line to `samples`.
    ///
    /// Deterministic: the same samples and configuration always produce the
    /// same report.
    pub fn fit(&self, samples: &SampleSet) -> FitReport {
        let LinearFitConfig {
            iterations,
            learning_rate,
            stopping_threshold,
            verbosity,
        } = self.config;

        let x = samples.x();
        let y = samples.y();

        let mut model = LineModel::zeros();
        let mut final_cost = f64::NAN;
        let mut stop_reason = StopReason::MaxIterations;
        let mut executed = 0;

        let mut logger = TrainingLogger::new(verbosity);
        logger.start_training(iterations);

        for round in 0..iterations {
            executed = round + 1;

            let (gradient, cost) = LineGradient::evaluate(&model, x, y);
            final_cost = cost;

            let (step_slope, step_intercept) = gradient.scaled(learning_rate);
            model.step(step_slope, step_intercept);

            let step = step_slope.abs().max(step_intercept.abs());
            logger.log_round(
                round,
                &[
                    ("cost", cost),
                    ("slope", model.slope()),
                    ("intercept", model.intercept()),
                    ("step", step),
                ],
            );

            if step < stopping_threshold {
                stop_reason = StopReason::Converged;
                logger.log_early_stopping(
                    round,
                    &format!("step {step:.3e} below threshold {stopping_threshold:.3e}"),
                );
                break;
            }
        }

        if !model.slope().is_finite() || !model.intercept().is_finite() {
            logger.warn("parameters diverged; learning rate is likely too large");
        }
        logger.info(&format!(
            "fitted slope={} intercept={} after {} iterations",
            model.slope(),
            model.intercept(),
            executed
        ));
        logger.finish_training();

        FitReport {
            model,
            iterations: executed,
            stop_reason,
            final_cost,
        }
    }
}

// ============================================================================
// One-call helpers
// ============================================================================

/// Fit `y ≈ m·x + c` by gradient descent.
///
/// # Errors
///
/// - [`FitError::Data`] if `x` and `y` differ in length or are empty
/// - [`FitError::Config`] if any parameter is out of range
pub fn gradient_descent(
    x: &[f64],
    y: &[f64],
    iterations: usize,
    learning_rate: f64,
    stopping_threshold: f64,
) -> Result<LineModel, FitError> {
    let samples = SampleSet::from_slices(x, y)?;
    let config = LinearFitConfig::builder()
        .iterations(iterations)
        .learning_rate(learning_rate)
        .stopping_threshold(stopping_threshold)
        .build()?;
    Ok(LinearFitTrainer::new(config).fit(&samples).model)
}

/// [`gradient_descent`] with the default iteration cap, learning rate and
/// stopping threshold.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LineModel, FitError> {
    let samples = SampleSet::from_slices(x, y)?;
    Ok(LinearFitTrainer::default().fit(&samples).model)
}

// ============================================================================
// Tests
// ============================================================================

//! Line fitter configuration with builder pattern.
//!
//! [`LinearFitConfig`] uses the `bon` crate for builder generation and
//! validates its values when built.
//!
//! # Example
//!
//! ```
//! use descent_attn::linear::LinearFitConfig;
//! use descent_attn::Verbosity;
//!
//! // Defaults: 1000 iterations, learning rate 1e-4, threshold 1e-6
//! let config = LinearFitConfig::builder().build().unwrap();
//! assert_eq!(config.iterations, 1000);
//!
//! let config = LinearFitConfig::builder()
//!     .iterations(5000)
//!     .learning_rate(0.01)
//!     .verbosity(Verbosity::Info)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.learning_rate, 0.01);
//!
//! assert!(LinearFitConfig::builder().learning_rate(-1.0).build().is_err());
//! ```

use bon::Builder;

use crate::logger::Verbosity;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Iteration cap must be at least 1.
    #[error("iterations must be at least 1")]
    InvalidIterations,

    /// Learning rate must be positive and finite.
    #[error("learning_rate must be positive and finite, got {0}")]
    InvalidLearningRate(f64),

    /// Stopping threshold must be positive and finite.
    #[error("stopping_threshold must be positive and finite, got {0}")]
    InvalidStoppingThreshold(f64),
}

// =============================================================================
// LinearFitConfig
// =============================================================================

/// Configuration for gradient-descent line fitting.
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct LinearFitConfig {
    /// Maximum number of gradient steps. Default: 1000.
    #[builder(default = 1000)]
    pub iterations: usize,

    /// Step size multiplier applied to each gradient. Default: 0.0001.
    ///
    /// With this default, unscaled data may not reach the least-squares line
    /// within the default iteration cap.
    #[builder(default = 0.0001)]
    pub learning_rate: f64,

    /// Stop once `max(|lr·dm|, |lr·dc|)` falls below this value. Default: 1e-6.
    ///
    /// This bounds the size of the applied step, not the gradient or the
    /// change in cost.
    #[builder(default = 1e-6)]
    pub stopping_threshold: f64,

    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: linear_fit_config_builder::IsComplete> LinearFitConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `iterations == 0`
    /// - `learning_rate` is not a positive finite number
    /// - `stopping_threshold` is not a positive finite number
    pub fn build(self) -> Result<LinearFitConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl LinearFitConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if !(self.stopping_threshold.is_finite() && self.stopping_threshold > 0.0) {
            return Err(ConfigError::InvalidStoppingThreshold(
                self.stopping_threshold,
            ));
        }
        Ok(())
    }
}

impl Default for LinearFitConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

// =============================================================================
// Tests
// =============================================================================

//! descent-attn: two textbook numeric procedures on top of `ndarray`.
//!
//! # Key Types
//!
//! - [`LinearFitTrainer`] / [`LinearFitConfig`] - Least-squares line fitting by gradient descent
//! - [`LineModel`] - Fitted slope and intercept
//! - [`scaled_dot_product_attention`] - `softmax(Q·Kᵗ / sqrt(d_k)) · V` over batched arrays
//! - [`SampleSet`] - Validated (x, y) input for the line fitter
//!
//! # Fitting a Line
//!
//! ```
//! use descent_attn::linear::gradient_descent;
//!
//! let model = gradient_descent(
//!     &[1.0, 2.0, 3.0, 4.0, 5.0],
//!     &[5.0, 7.0, 9.0, 11.0, 13.0],
//!     20_000,
//!     0.05,
//!     1e-6,
//! )
//! .unwrap();
//!
//! assert!((model.slope() - 2.0).abs() < 1e-3);
//! assert!((model.intercept() - 3.0).abs() < 1e-3);
//! ```
//!
//! # Attention
//!
//! ```
//! use descent_attn::attention::scaled_dot_product_attention;
//! use ndarray::Array3;
//!
//! let q = Array3::<f32>::ones((2, 4, 8));
//! let k = Array3::<f32>::ones((2, 6, 8));
//! let v = Array3::<f32>::ones((2, 6, 3));
//!
//! let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();
//! assert_eq!(attn.output.shape(), &[2, 4, 3]);
//! assert_eq!(attn.weights.shape(), &[2, 4, 6]);
//! ```

// Re-export approx traits for users who want to compare fitted models
pub use approx;

pub mod attention;
pub mod data;
pub mod linear;
pub mod logger;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use attention::{
    scaled_dot_product_attention, scaled_dot_product_attention_with, Attention, AttentionError,
    AttentionParams, SoftmaxKind,
};
pub use data::{DataError, SampleSet};
pub use linear::{
    fit_line, gradient_descent, ConfigError, FitError, FitReport, LineModel, LinearFitConfig,
    LinearFitTrainer, StopReason,
};
pub use logger::{TrainingLogger, Verbosity};

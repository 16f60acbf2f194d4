//! Least-squares line fitting by batch gradient descent.
//!
//! The fitter minimizes the mean squared error of `y ≈ m·x + c`:
//!
//! ```text
//! cost = (1/n) Σ (y[i] - (m·x[i] + c))²
//! dm   = -(2/n) Σ x[i]·(y[i] - pred[i])
//! dc   = -(2/n) Σ (y[i] - pred[i])
//! ```
//!
//! Both parameters start at zero and move against the gradient by
//! `learning_rate` each round. Training stops after `iterations` rounds, or
//! earlier once the applied step `max(|lr·dm|, |lr·dc|)` drops below
//! `stopping_threshold`.

mod config;
mod gradient;
mod model;
mod trainer;

pub use config::{ConfigError, LinearFitConfig, LinearFitConfigBuilder};
pub use gradient::{mean_squared_error, LineGradient};
pub use model::LineModel;
pub use trainer::{fit_line, gradient_descent, FitError, FitReport, LinearFitTrainer, StopReason};

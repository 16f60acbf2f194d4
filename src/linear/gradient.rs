//! Mean-squared-error cost and its gradient for a line.

use ndarray::ArrayView1;

use super::LineModel;

/// Gradient of the mean squared error with respect to slope and intercept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGradient {
    /// `∂cost/∂m = -(2/n) Σ x[i]·(y[i] - pred[i])`
    pub d_slope: f64,
    /// `∂cost/∂c = -(2/n) Σ (y[i] - pred[i])`
    pub d_intercept: f64,
}

impl LineGradient {
    /// Evaluate the gradient at `model` and the cost of the current predictions.
    ///
    /// Returns `(gradient, cost)`; the cost is measured before any update.
    ///
    /// `x` and `y` must be equal length and non-empty; [`SampleSet`] guarantees
    /// both.
    ///
    /// [`SampleSet`]: crate::data::SampleSet
    pub fn evaluate(
        model: &LineModel,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> (Self, f64) {
        debug_assert_eq!(x.len(), y.len());
        let n = x.len() as f64;

        let pred = model.predict(x);
        let residual = &y - &pred;

        let cost = (1.0 / n) * residual.mapv(|r| r * r).sum();
        let d_slope = -(2.0 / n) * (&x * &residual).sum();
        let d_intercept = -(2.0 / n) * residual.sum();

        (
            Self {
                d_slope,
                d_intercept,
            },
            cost,
        )
    }

    /// The step `(lr·dm, lr·dc)` applied for this gradient.
    #[inline]
    pub fn scaled(&self, learning_rate: f64) -> (f64, f64) {
        (learning_rate * self.d_slope, learning_rate * self.d_intercept)
    }
}

/// Mean squared error of `model` on `(x, y)`.
pub fn mean_squared_error(model: &LineModel, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    LineGradient::evaluate(model, x, y).1
}

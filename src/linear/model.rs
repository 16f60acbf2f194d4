//! Fitted line: slope and intercept.

use approx::{AbsDiffEq, RelativeEq};
use ndarray::{Array1, ArrayView1};

/// A line `y = slope · x + intercept`.
///
/// # Example
///
/// ```
/// use descent_attn::linear::LineModel;
/// use ndarray::array;
///
/// let line = LineModel::new(2.0, 3.0);
/// assert_eq!(line.predict_one(4.0), 11.0);
/// assert_eq!(line.predict(array![0.0, 1.0].view()), array![3.0, 5.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineModel {
    slope: f64,
    intercept: f64,
}

impl LineModel {
    /// Create a line from its parameters.
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// The starting point of every fit: `m = 0`, `c = 0`.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Slope `m`.
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Intercept `c`.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// `(slope, intercept)`.
    #[inline]
    pub fn params(&self) -> (f64, f64) {
        (self.slope, self.intercept)
    }

    /// Predict one value.
    #[inline]
    pub fn predict_one(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Predict for every element of `x`.
    pub fn predict(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        x.mapv(|xi| self.slope * xi + self.intercept)
    }

    /// Move both parameters by `-(delta_slope, delta_intercept)`.
    #[inline]
    pub(crate) fn step(&mut self, delta_slope: f64, delta_intercept: f64) {
        self.slope -= delta_slope;
        self.intercept -= delta_intercept;
    }
}

impl From<LineModel> for (f64, f64) {
    fn from(model: LineModel) -> Self {
        model.params()
    }
}

impl AbsDiffEq for LineModel {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.slope.abs_diff_eq(&other.slope, epsilon)
            && self.intercept.abs_diff_eq(&other.intercept, epsilon)
    }
}

impl RelativeEq for LineModel {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.slope.relative_eq(&other.slope, epsilon, max_relative)
            && self
                .intercept
                .relative_eq(&other.intercept, epsilon, max_relative)
    }
}

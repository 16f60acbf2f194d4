//! Paired (x, y) samples.

use ndarray::{Array1, ArrayView1};

/// Sample set validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("sample set is empty")]
    Empty,

    #[error("number of targets ({targets}) does not match number of samples ({samples})")]
    LengthMismatch { samples: usize, targets: usize },
}

/// Ordered sequence of (x, y) pairs.
///
/// # Example
///
/// ```
/// use descent_attn::data::SampleSet;
///
/// let samples = SampleSet::from_slices(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert_eq!(samples.n_samples(), 3);
/// assert_eq!(samples.x()[1], 2.0);
///
/// assert!(SampleSet::from_slices(&[1.0], &[]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl SampleSet {
    /// Create a sample set from predictor and target arrays.
    ///
    /// # Errors
    ///
    /// - [`DataError::LengthMismatch`] if `x` and `y` differ in length
    /// - [`DataError::Empty`] if both are empty
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Result<Self, DataError> {
        if x.len() != y.len() {
            return Err(DataError::LengthMismatch {
                samples: x.len(),
                targets: y.len(),
            });
        }
        if x.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { x, y })
    }

    /// Create a sample set by copying two slices.
    pub fn from_slices(x: &[f64], y: &[f64]) -> Result<Self, DataError> {
        Self::new(Array1::from(x.to_vec()), Array1::from(y.to_vec()))
    }

    /// Number of (x, y) pairs. Always at least 1.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.x.len()
    }

    /// Predictor values.
    #[inline]
    pub fn x(&self) -> ArrayView1<'_, f64> {
        self.x.view()
    }

    /// Target values.
    #[inline]
    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Consume into `(x, y)`.
    pub fn into_parts(self) -> (Array1<f64>, Array1<f64>) {
        (self.x, self.y)
    }
}

impl TryFrom<(Vec<f64>, Vec<f64>)> for SampleSet {
    type Error = DataError;

    fn try_from((x, y): (Vec<f64>, Vec<f64>)) -> Result<Self, Self::Error> {
        Self::new(Array1::from(x), Array1::from(y))
    }
}

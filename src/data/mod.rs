//! Input data for the line fitter.
//!
//! [`SampleSet`] holds paired predictor/target values and guarantees they are
//! non-empty and of equal length, so the fitter never divides by zero.

mod samples;

pub use samples::{DataError, SampleSet};

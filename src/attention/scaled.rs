//! Batched scaled dot-product attention.

use ndarray::{Array3, ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn, ShapeError};

use crate::logger::{TrainingLogger, Verbosity};

use super::softmax::{softmax_last_axis, SoftmaxKind};

// =============================================================================
// Errors
// =============================================================================

/// Which attention input an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Query,
    Key,
    Value,
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operand::Query => "query",
            Operand::Key => "key",
            Operand::Value => "value",
        })
    }
}

/// Shape errors for attention inputs.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AttentionError {
    #[error("{operand} must have at least 3 axes [batch, seq_len, feature_dim], got {ndim}")]
    RankTooLow { operand: Operand, ndim: usize },

    #[error("query, key and value ranks differ: {query}, {key}, {value}")]
    RankMismatch {
        query: usize,
        key: usize,
        value: usize,
    },

    #[error("{operand} batch axes {got:?} do not match query batch axes {expected:?}")]
    BatchShapeMismatch {
        operand: Operand,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("query feature dim ({query}) does not match key feature dim ({key})")]
    FeatureDimMismatch { query: usize, key: usize },

    #[error("key sequence length ({key}) does not match value sequence length ({value})")]
    SequenceLenMismatch { key: usize, value: usize },

    #[error("key tensor is empty (seq_len={seq_len}, feature_dim={feature_dim})")]
    EmptyKeys { seq_len: usize, feature_dim: usize },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

// =============================================================================
// Params and result
// =============================================================================

/// Options for [`scaled_dot_product_attention_with`].
#[derive(Debug, Clone, Default)]
pub struct AttentionParams {
    /// Softmax flavor. Default: [`SoftmaxKind::Stable`].
    pub softmax: SoftmaxKind,
    /// Verbosity level. Default: `Silent`.
    pub verbosity: Verbosity,
}

/// Attention output and weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Attention {
    /// Shape `[batch..., seq_len_q, feature_dim_v]`.
    pub output: ArrayD<f32>,
    /// Shape `[batch..., seq_len_q, seq_len_k]`; each last-axis row sums to 1.
    pub weights: ArrayD<f32>,
}

impl Attention {
    /// `(output, weights)`.
    pub fn into_parts(self) -> (ArrayD<f32>, ArrayD<f32>) {
        (self.output, self.weights)
    }
}

// =============================================================================
// Shape bookkeeping
// =============================================================================

/// Validated geometry of one attention call.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttentionShape {
    batch_shape: Vec<usize>,
    seq_q: usize,
    seq_k: usize,
    d_k: usize,
    d_v: usize,
}

impl AttentionShape {
    fn infer(q: &[usize], k: &[usize], v: &[usize]) -> Result<Self, AttentionError> {
        for (operand, shape) in [(Operand::Query, q), (Operand::Key, k), (Operand::Value, v)] {
            if shape.len() < 3 {
                return Err(AttentionError::RankTooLow {
                    operand,
                    ndim: shape.len(),
                });
            }
        }
        if q.len() != k.len() || k.len() != v.len() {
            return Err(AttentionError::RankMismatch {
                query: q.len(),
                key: k.len(),
                value: v.len(),
            });
        }

        let nd = q.len();
        let batch_shape = &q[..nd - 2];
        for (operand, shape) in [(Operand::Key, k), (Operand::Value, v)] {
            if &shape[..nd - 2] != batch_shape {
                return Err(AttentionError::BatchShapeMismatch {
                    operand,
                    expected: batch_shape.to_vec(),
                    got: shape[..nd - 2].to_vec(),
                });
            }
        }

        let (seq_q, d_q) = (q[nd - 2], q[nd - 1]);
        let (seq_k, d_k) = (k[nd - 2], k[nd - 1]);
        let (seq_v, d_v) = (v[nd - 2], v[nd - 1]);

        if d_q != d_k {
            return Err(AttentionError::FeatureDimMismatch { query: d_q, key: d_k });
        }
        if seq_k != seq_v {
            return Err(AttentionError::SequenceLenMismatch {
                key: seq_k,
                value: seq_v,
            });
        }
        if seq_k == 0 || d_k == 0 {
            return Err(AttentionError::EmptyKeys {
                seq_len: seq_k,
                feature_dim: d_k,
            });
        }

        Ok(Self {
            batch_shape: batch_shape.to_vec(),
            seq_q,
            seq_k,
            d_k,
            d_v,
        })
    }

    fn batch(&self) -> usize {
        self.batch_shape.iter().product()
    }

    fn with_tail(&self, rows: usize, cols: usize) -> Vec<usize> {
        let mut dims = self.batch_shape.clone();
        dims.extend([rows, cols]);
        dims
    }
}

/// Copy `array` into a `[batch, rows, cols]` array in logical order.
fn flatten_batch<S, D>(
    array: &ArrayBase<S, D>,
    batch: usize,
    rows: usize,
    cols: usize,
) -> Result<Array3<f32>, ShapeError>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    Array3::from_shape_vec((batch, rows, cols), array.iter().copied().collect())
}

fn unflatten(array: Array3<f32>, dims: &[usize]) -> Result<ArrayD<f32>, ShapeError> {
    ArrayD::from_shape_vec(IxDyn(dims), array.iter().copied().collect())
}

// =============================================================================
// Attention
// =============================================================================

/// Compute `softmax(Q·Kᵗ / sqrt(d_k)) · V` with default parameters.
///
/// `d_k` is the size of the key's last axis.
///
/// # Errors
///
/// Returns [`AttentionError`] if an input has fewer than 3 axes, the ranks or
/// leading (batch) axes differ, the query and key feature dims differ, the
/// key and value sequence lengths differ, or the key is empty.
///
/// # Example
///
/// ```
/// use descent_attn::attention::scaled_dot_product_attention;
/// use ndarray::array;
///
/// let q = array![[[1.0f32, 0.0]]];
/// let k = array![[[1.0f32, 0.0], [1.0, 0.0]]];
/// let v = array![[[2.0f32], [4.0]]];
///
/// let attn = scaled_dot_product_attention(&q, &k, &v).unwrap();
/// // Identical keys: uniform weights, output is the mean of the values.
/// assert_eq!(attn.weights.as_slice().unwrap(), &[0.5, 0.5]);
/// assert_eq!(attn.output.as_slice().unwrap(), &[3.0]);
/// ```
pub fn scaled_dot_product_attention<S1, S2, S3, D>(
    query: &ArrayBase<S1, D>,
    key: &ArrayBase<S2, D>,
    value: &ArrayBase<S3, D>,
) -> Result<Attention, AttentionError>
where
    S1: Data<Elem = f32>,
    S2: Data<Elem = f32>,
    S3: Data<Elem = f32>,
    D: Dimension,
{
    scaled_dot_product_attention_with(query, key, value, &AttentionParams::default())
}

/// Compute scaled dot-product attention with explicit parameters.
///
/// See [`scaled_dot_product_attention`].
pub fn scaled_dot_product_attention_with<S1, S2, S3, D>(
    query: &ArrayBase<S1, D>,
    key: &ArrayBase<S2, D>,
    value: &ArrayBase<S3, D>,
    params: &AttentionParams,
) -> Result<Attention, AttentionError>
where
    S1: Data<Elem = f32>,
    S2: Data<Elem = f32>,
    S3: Data<Elem = f32>,
    D: Dimension,
{
    let shape = AttentionShape::infer(query.shape(), key.shape(), value.shape())?;
    let batch = shape.batch();

    let logger = TrainingLogger::new(params.verbosity);
    logger.debug(&format!(
        "attention: batch={:?} seq_q={} seq_k={} d_k={} d_v={} softmax={:?}",
        shape.batch_shape, shape.seq_q, shape.seq_k, shape.d_k, shape.d_v, params.softmax
    ));

    let q = flatten_batch(query, batch, shape.seq_q, shape.d_k)?;
    let k = flatten_batch(key, batch, shape.seq_k, shape.d_k)?;
    let v = flatten_batch(value, batch, shape.seq_k, shape.d_v)?;

    let scale = (shape.d_k as f64).sqrt() as f32;
    let mut weights = Array3::<f32>::zeros((batch, shape.seq_q, shape.seq_k));
    let mut output = Array3::<f32>::zeros((batch, shape.seq_q, shape.d_v));

    for b in 0..batch {
        let q_b = q.index_axis(Axis(0), b);
        let k_b = k.index_axis(Axis(0), b);
        let v_b = v.index_axis(Axis(0), b);

        let mut w_b = weights.index_axis_mut(Axis(0), b);
        w_b.assign(&q_b.dot(&k_b.t()));
        w_b.mapv_inplace(|score| score / scale);
        softmax_last_axis(&mut w_b, params.softmax);

        output.index_axis_mut(Axis(0), b).assign(&w_b.dot(&v_b));
    }

    if logger.verbosity() >= Verbosity::Warning && weights.iter().any(|w| !w.is_finite()) {
        logger.warn("attention weights contain non-finite values; logits may have overflowed");
    }

    Ok(Attention {
        output: unflatten(output, &shape.with_tail(shape.seq_q, shape.d_v))?,
        weights: unflatten(weights, &shape.with_tail(shape.seq_q, shape.seq_k))?,
    })
}

// =============================================================================
// Tests
// =============================================================================

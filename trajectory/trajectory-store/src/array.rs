//! Dynamically-typed n-dimensional arrays.
//!
//! A trajectory store holds arrays of several element types under one tree.
//! [`ArrayData`] is the closed set of supported element types; every stored
//! array is one of its variants.

use ndarray::{ArrayD, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// A dynamically-typed n-dimensional array.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use trajectory_store::ArrayData;
///
/// let data = ArrayData::from(Array2::<f64>::zeros((10, 6)).into_dyn());
/// assert_eq!(data.leading_dim(), Some(10));
/// assert_eq!(data.dtype(), "f64");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayData {
    /// 64-bit floating point.
    F64(ArrayD<f64>),
    /// 64-bit signed integer.
    I64(ArrayD<i64>),
    /// 8-bit unsigned integer (pixel data).
    U8(ArrayD<u8>),
    /// Boolean flags.
    Bool(ArrayD<bool>),
}

impl ArrayData {
    /// Returns the element type name, for diagnostics.
    #[must_use]
    pub const fn dtype(&self) -> &'static str {
        match self {
            Self::F64(_) => "f64",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::Bool(_) => "bool",
        }
    }

    /// Returns the array shape.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::F64(a) => a.shape(),
            Self::I64(a) => a.shape(),
            Self::U8(a) => a.shape(),
            Self::Bool(a) => a.shape(),
        }
    }

    /// Returns the number of dimensions.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Returns the leading dimension, or `None` for a zero-rank array.
    #[must_use]
    pub fn leading_dim(&self) -> Option<usize> {
        self.shape().first().copied()
    }

    /// Selects the given rows along the leading axis, in the given order.
    ///
    /// This is the primitive behind timestep pruning: callers pass the
    /// indices to *keep* and receive a new array of the same rank.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ZeroRank`] for a zero-rank array and
    /// [`StoreError::RowOutOfBounds`] if any index exceeds the leading
    /// dimension.
    pub fn select_rows(&self, keep: &[usize]) -> StoreResult<Self> {
        let len = self.leading_dim().ok_or(StoreError::ZeroRank)?;
        if let Some(&index) = keep.iter().find(|&&i| i >= len) {
            return Err(StoreError::RowOutOfBounds { index, len });
        }
        Ok(match self {
            Self::F64(a) => Self::F64(a.select(Axis(0), keep)),
            Self::I64(a) => Self::I64(a.select(Axis(0), keep)),
            Self::U8(a) => Self::U8(a.select(Axis(0), keep)),
            Self::Bool(a) => Self::Bool(a.select(Axis(0), keep)),
        })
    }

    /// Appends a trailing singleton axis, turning `[T]` into `[T, 1]`.
    #[must_use]
    pub fn insert_trailing_axis(self) -> Self {
        let axis = Axis(self.ndim());
        match self {
            Self::F64(a) => Self::F64(a.insert_axis(axis)),
            Self::I64(a) => Self::I64(a.insert_axis(axis)),
            Self::U8(a) => Self::U8(a.insert_axis(axis)),
            Self::Bool(a) => Self::Bool(a.insert_axis(axis)),
        }
    }

    /// Returns the `f64` array, if this is the `F64` variant.
    #[must_use]
    pub const fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match self {
            Self::F64(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the `i64` array, if this is the `I64` variant.
    #[must_use]
    pub const fn as_i64(&self) -> Option<&ArrayD<i64>> {
        match self {
            Self::I64(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the `u8` array, if this is the `U8` variant.
    #[must_use]
    pub const fn as_u8(&self) -> Option<&ArrayD<u8>> {
        match self {
            Self::U8(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the boolean array, if this is the `Bool` variant.
    #[must_use]
    pub const fn as_bool(&self) -> Option<&ArrayD<bool>> {
        match self {
            Self::Bool(a) => Some(a),
            _ => None,
        }
    }
}

impl From<ArrayD<f64>> for ArrayData {
    fn from(a: ArrayD<f64>) -> Self {
        Self::F64(a)
    }
}

impl From<ArrayD<i64>> for ArrayData {
    fn from(a: ArrayD<i64>) -> Self {
        Self::I64(a)
    }
}

impl From<ArrayD<u8>> for ArrayData {
    fn from(a: ArrayD<u8>) -> Self {
        Self::U8(a)
    }
}

impl From<ArrayD<bool>> for ArrayData {
    fn from(a: ArrayD<bool>) -> Self {
        Self::Bool(a)
    }
}

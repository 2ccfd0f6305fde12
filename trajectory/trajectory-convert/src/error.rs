//! Error types for trajectory conversion.

use thiserror::Error;
use trajectory_store::StoreError;
use trajectory_types::CameraError;

/// Result type for conversion operations.
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting a trajectory.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Store access or persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Camera classification or frame construction failed.
    #[error("camera error: {0}")]
    Camera(#[from] CameraError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset does not have the shape the conversion requires.
    #[error("shape mismatch at {path}: {reason}")]
    ShapeMismatch {
        /// Store path of the offending dataset.
        path: String,
        /// What was expected.
        reason: String,
    },

    /// A camera type record holds no elements.
    #[error("camera type record for {id} is empty")]
    EmptyCameraType {
        /// Raw camera identifier.
        id: String,
    },

    /// A rotation codec name did not resolve.
    #[error("unknown rotation codec: {name} (available: {available})")]
    UnknownRotationCodec {
        /// The unresolved name.
        name: String,
        /// Registered codec names.
        available: String,
    },

    /// A modality name did not resolve.
    #[error("unknown modality: {name}")]
    UnknownModality {
        /// The unresolved name.
        name: String,
    },

    /// A 6D rotation encoding could not be orthonormalized.
    #[error("degenerate 6D rotation encoding")]
    DegenerateRotation,
}

impl ConvertError {
    /// Creates a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

//! Error types for camera and frame handling.

use thiserror::Error;

/// Result type for camera and frame operations.
pub type CameraResult<T> = std::result::Result<T, CameraError>;

/// Errors that can occur when classifying cameras or building frames.
#[derive(Debug, Error)]
pub enum CameraError {
    /// A recorded camera type code is not one of the known kinds.
    ///
    /// This is an unrecoverable configuration error: a trajectory recorded
    /// with an unknown camera class cannot be converted.
    #[error("unknown camera type code {code} for camera {id}")]
    UnknownCameraType {
        /// Raw camera identifier.
        id: String,
        /// The unrecognized type code.
        code: i64,
    },

    /// No hand camera was recorded; exactly one hand camera slot is required.
    #[error("no hand camera recorded")]
    MissingHandCamera,

    /// A frame buffer does not have three color channels.
    #[error("bad frame shape: {shape:?} (expected [H, W, 3])")]
    BadFrameShape {
        /// The offending shape.
        shape: Vec<usize>,
    },
}

impl CameraError {
    /// Creates an unknown-camera-type error.
    #[must_use]
    pub fn unknown_camera_type(id: impl Into<String>, code: i64) -> Self {
        Self::UnknownCameraType {
            id: id.into(),
            code,
        }
    }

    /// Creates a bad-frame-shape error.
    #[must_use]
    pub fn bad_frame_shape(shape: &[usize]) -> Self {
        Self::BadFrameShape {
            shape: shape.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_camera_type() {
        let err = CameraError::unknown_camera_type("17225336", 7);
        let msg = err.to_string();
        assert!(msg.contains("17225336"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn error_bad_frame_shape() {
        let err = CameraError::bad_frame_shape(&[4, 4, 4]);
        assert!(err.to_string().contains("[4, 4, 4]"));
    }
}

//! Array-level image helpers.

use ndarray::{Array3, Array4, ArrayView3, Axis};

use crate::error::{ConvertError, ConvertResult};

/// Resizes a frame to a square resolution with nearest-neighbor sampling.
///
/// An empty source yields a zero-filled frame; recorded frames are never
/// empty, but a zero-area frame must not panic the conversion.
#[must_use]
pub fn resize_nearest(frame: &Array3<u8>, size: usize) -> Array3<u8> {
    let (h, w, channels) = frame.dim();
    if h == 0 || w == 0 {
        return Array3::zeros((size, size, channels));
    }
    Array3::from_shape_fn((size, size, channels), |(y, x, c)| {
        frame[[y * h / size, x * w / size, c]]
    })
}

/// Stacks per-timestep frames into a `[T, H, W, 3]` array.
///
/// An empty frame list (a zero-length episode) stacks to
/// `[0, size, size, 3]`.
///
/// # Errors
///
/// Returns a shape mismatch if the frames disagree in shape.
pub fn stack_frames(frames: &[Array3<u8>], size: usize) -> ConvertResult<Array4<u8>> {
    if frames.is_empty() {
        return Ok(Array4::zeros((0, size, size, 3)));
    }
    let views: Vec<ArrayView3<u8>> = frames.iter().map(ndarray::ArrayBase::view).collect();
    ndarray::stack(Axis(0), &views)
        .map_err(|e| ConvertError::shape_mismatch("image stack", e.to_string()))
}

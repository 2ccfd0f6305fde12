//! Camera frame pixel types.

use ndarray::{s, Array3};
use serde::{Deserialize, Serialize};

use crate::error::{CameraError, CameraResult};

/// Channel order of an 8-bit color frame.
///
/// Capture libraries commonly hand out BGR (the `OpenCV` convention);
/// stored imagery is RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Blue-green-red (capture-native).
    Bgr,
    /// Red-green-blue (storage order).
    Rgb,
}

/// An `[H, W, 3]` 8-bit color frame tagged with its channel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Pixel data, `[H, W, 3]`.
    pub pixels: Array3<u8>,
    /// Channel order of `pixels`.
    pub order: ChannelOrder,
}

impl Frame {
    /// Creates a frame, validating the channel dimension.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::BadFrameShape`] unless the last dimension
    /// is 3.
    pub fn new(pixels: Array3<u8>, order: ChannelOrder) -> CameraResult<Self> {
        if pixels.dim().2 != 3 {
            return Err(CameraError::bad_frame_shape(pixels.shape()));
        }
        Ok(Self { pixels, order })
    }

    /// A zero-filled RGB frame of the given square resolution.
    ///
    /// Substituted when a camera frame is missing for a timestep.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            pixels: Array3::zeros((size, size, 3)),
            order: ChannelOrder::Rgb,
        }
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Converts to RGB order, reversing channels if needed.
    ///
    /// # Example
    ///
    /// ```
    /// use ndarray::Array3;
    /// use trajectory_types::{ChannelOrder, Frame};
    ///
    /// let mut pixels = Array3::zeros((1, 1, 3));
    /// pixels[[0, 0, 0]] = 255; // blue in BGR
    /// let frame = Frame::new(pixels, ChannelOrder::Bgr).ok();
    /// let rgb = frame.map(Frame::into_rgb);
    /// assert_eq!(rgb.map(|f| f.pixels[[0, 0, 2]]), Some(255));
    /// ```
    #[must_use]
    pub fn into_rgb(self) -> Self {
        match self.order {
            ChannelOrder::Rgb => self,
            ChannelOrder::Bgr => Self {
                pixels: self.pixels.slice(s![.., .., ..;-1]).to_owned(),
                order: ChannelOrder::Rgb,
            },
        }
    }
}

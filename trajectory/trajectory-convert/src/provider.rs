//! Camera frame providers.
//!
//! Frame decoding is a collaborator behind the [`FrameProvider`] seam: the
//! augmenter only asks for "the aligned frames for timestep `i`". The
//! recorded implementation reads a frame archive written next to the
//! trajectory; simulation or live capture backends can implement the same
//! trait.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::{Array4, Axis, Ix4};
use tracing::debug;
use trajectory_store::TrajectoryStore;
use trajectory_types::{frame_key, CameraTypeMap, ChannelOrder, Frame};

use crate::error::{ConvertError, ConvertResult};
use crate::image::resize_nearest;

/// Decoded frames for one timestep, keyed by frame key (`<raw_id>_left`).
pub type FrameSet = BTreeMap<String, Frame>;

/// Source of decoded camera frames, aligned to trajectory timesteps.
pub trait FrameProvider {
    /// Returns the frames for all requested cameras at `index`.
    ///
    /// `Ok(None)` signals that capture failed for the whole timestep; a
    /// camera merely absent from the returned set failed individually.
    /// Both degrade to zero-filled frames downstream; a missing frame
    /// never aborts a conversion.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure failures (unreadable archive,
    /// malformed frame data), which do abort the conversion.
    fn read_cameras(
        &mut self,
        index: usize,
        cameras: &CameraTypeMap,
    ) -> ConvertResult<Option<FrameSet>>;
}

/// Directory next to a trajectory file holding its recordings.
pub const RECORDINGS_DIR: &str = "recordings";

/// Frame archive file name inside [`RECORDINGS_DIR`].
pub const FRAMES_FILE: &str = "frames.traj";

/// Group inside the frame archive holding one stack per raw camera id.
const FRAMES_GROUP: &str = "frames";

/// Frame provider reading a recorded frame archive.
///
/// The archive is a store file at `recordings/frames.traj` relative to the
/// trajectory's directory, holding one `[T, H, W, 3]` 8-bit BGR dataset
/// per raw camera identifier under the `frames` group. Frames are resized
/// to the requested square resolution on read.
pub struct RecordedFrameProvider {
    stacks: BTreeMap<String, Array4<u8>>,
    imsize: usize,
}

impl RecordedFrameProvider {
    /// Opens the frame archive recorded next to `trajectory_path`.
    ///
    /// # Errors
    ///
    /// Fails if the archive is missing, malformed, or holds a dataset that
    /// is not a `[T, H, W, 3]` 8-bit stack.
    pub fn open(trajectory_path: &Path, imsize: usize) -> ConvertResult<Self> {
        let dir = trajectory_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(RECORDINGS_DIR);
        let archive_path = dir.join(FRAMES_FILE);
        debug!(path = %archive_path.display(), "opening frame archive");

        let archive = TrajectoryStore::open(&archive_path)?;
        let group = archive.group(FRAMES_GROUP)?;

        let mut stacks = BTreeMap::new();
        for (id, _) in group.iter() {
            let dataset = group.dataset(id)?;
            let path = format!("{FRAMES_GROUP}/{id}");
            let raw = dataset.data.as_u8().ok_or_else(|| {
                ConvertError::shape_mismatch(
                    &path,
                    format!("expected u8 frames, found {}", dataset.data.dtype()),
                )
            })?;
            let stack = raw.clone().into_dimensionality::<Ix4>().map_err(|_| {
                ConvertError::shape_mismatch(
                    &path,
                    format!("expected [T, H, W, 3], found {:?}", dataset.data.shape()),
                )
            })?;
            if stack.dim().3 != 3 {
                return Err(ConvertError::shape_mismatch(
                    &path,
                    format!("expected 3 channels, found {}", stack.dim().3),
                ));
            }
            stacks.insert(id.to_string(), stack);
        }

        Ok(Self { stacks, imsize })
    }

    /// Number of recorded frames for the camera with the fewest frames.
    #[must_use]
    pub fn min_len(&self) -> Option<usize> {
        self.stacks.values().map(|s| s.dim().0).min()
    }
}

impl FrameProvider for RecordedFrameProvider {
    fn read_cameras(
        &mut self,
        index: usize,
        cameras: &CameraTypeMap,
    ) -> ConvertResult<Option<FrameSet>> {
        let mut frames = FrameSet::new();
        for id in cameras.keys() {
            let Some(stack) = self.stacks.get(id) else {
                // No recording for this camera; the slot degrades to a
                // zero frame downstream.
                continue;
            };
            if index >= stack.dim().0 {
                // The recording ran out before the trajectory did; treat
                // the whole timestep as a failed capture.
                return Ok(None);
            }
            let pixels = stack.index_axis(Axis(0), index).to_owned();
            let resized = resize_nearest(&pixels, self.imsize);
            frames.insert(frame_key(id), Frame::new(resized, ChannelOrder::Bgr)?);
        }
        Ok(Some(frames))
    }
}

impl std::fmt::Debug for RecordedFrameProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordedFrameProvider")
            .field("cameras", &self.stacks.keys().collect::<Vec<_>>())
            .field("imsize", &self.imsize)
            .finish()
    }
}

//! Offline augmentation of recorded robot trajectories.
//!
//! This crate turns a raw recorded trajectory into a learning-ready one:
//!
//! # Conversion Pass
//!
//! - [`convert_trajectory`] - one pass over one trajectory: copy, attach
//!   camera imagery, re-derive actions, normalize ranks, prune idle
//!   timesteps
//! - [`remove_timesteps`] - recursive row deletion across the whole store
//! - [`read_camera_types`] / [`resolve_layout`] - deterministic camera
//!   slot assignment
//!
//! # Frames
//!
//! - [`FrameProvider`] - seam for camera frame decoding
//! - [`RecordedFrameProvider`] - reads the frame archive recorded next to
//!   each trajectory
//!
//! # Rotation Encodings
//!
//! - [`euler_xyz_to_matrix`] / [`matrix_to_rotation_6d`] /
//!   [`rotation_6d_to_matrix`] - fixed X-Y-Z intrinsic convention
//! - [`RotationCodecRegistry`] - name-to-codec resolution at config load
//!
//! # Observation Modalities
//!
//! - [`ModalityRegistry`] - explicit (process, unprocess) function pairs
//!   with a defaults/override/reset lifecycle
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use trajectory_convert::{
//!     convert_trajectory, ConvertConfig, RecordedFrameProvider, RotationCodecRegistry,
//! };
//!
//! # fn main() -> Result<(), trajectory_convert::ConvertError> {
//! let config = ConvertConfig::default().resolve(&RotationCodecRegistry::default())?;
//! let path = Path::new("run_0/trajectory.traj");
//! let mut provider = RecordedFrameProvider::open(path, config.imsize)?;
//! let out = convert_trajectory(path, &mut provider, &config)?;
//! println!("wrote {}", out.display());
//! # Ok(())
//! # }
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod augment;
mod cameras;
mod config;
mod error;
mod image;
mod modality;
mod provider;
mod prune;
mod rotation;

// Re-export the conversion pass
pub use augment::{convert_trajectory, output_path};

// Re-export camera resolution
pub use cameras::{read_camera_types, resolve_layout};

// Re-export configuration
pub use config::{ConvertConfig, ResolvedConfig};

// Re-export frame providers
pub use provider::{FrameProvider, FrameSet, RecordedFrameProvider, FRAMES_FILE, RECORDINGS_DIR};

// Re-export image helpers
pub use image::{resize_nearest, stack_frames};

// Re-export pruning
pub use prune::{idle_timesteps, remove_timesteps};

// Re-export rotation encodings
pub use rotation::{
    euler_xyz_to_matrix, matrix_to_euler_xyz, matrix_to_rotation_6d, rotation_6d_to_matrix,
    EulerCodec, RotationCodec, RotationCodecRegistry, SixDCodec,
};

// Re-export modality registry
pub use modality::{
    ModalityCodec, ModalityRegistry, ObsArray, ObsFn, LOW_DIM_MODALITY, RGB_MODALITY,
};

// Re-export error types
pub use error::{ConvertError, ConvertResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        convert_trajectory, remove_timesteps, ConvertConfig, ConvertError, ConvertResult,
        FrameProvider, FrameSet, ModalityRegistry, RecordedFrameProvider, ResolvedConfig,
        RotationCodec, RotationCodecRegistry,
    };
}

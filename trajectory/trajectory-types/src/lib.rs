//! Shared domain types for trajectory conversion tooling.
//!
//! This crate provides the types every layer of the conversion pipeline
//! agrees on:
//!
//! # Camera Identity
//!
//! - [`CameraKind`] - hand-mounted vs. varied camera classification
//! - [`CameraLayout`] - deterministic logical slot assignment
//! - [`CameraTypeMap`] - raw identifier to kind, in sorted order
//!
//! # Actions
//!
//! - [`ActionFamily`] - absolute/relative streams with their source keys
//!   and derived-name prefixes
//!
//! # Frames
//!
//! - [`Frame`] / [`ChannelOrder`] - 8-bit color frames with explicit
//!   channel ordering (capture libraries produce BGR, storage is RGB)
//!
//! # Store Layout
//!
//! - [`paths`] - well-known store paths of a recorded trajectory
//!
//! # Example
//!
//! ```
//! use trajectory_types::{frame_key, CameraKind, HAND_CAMERA_SLOT};
//!
//! let kind = CameraKind::from_code("17225336", 0).ok();
//! assert_eq!(kind, Some(CameraKind::Hand));
//! assert_eq!(HAND_CAMERA_SLOT, "hand_camera_image");
//! assert_eq!(frame_key("17225336"), "17225336_left");
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod action;
mod camera;
mod error;
mod frame;
pub mod paths;

// Re-export camera identity types
pub use camera::{
    frame_key, varied_camera_slot, CameraKind, CameraLayout, CameraTypeMap, SlotBinding,
    HAND_CAMERA_SLOT, LEFT_VIEW_SUFFIX,
};

// Re-export action types
pub use action::ActionFamily;

// Re-export frame types
pub use frame::{ChannelOrder, Frame};

// Re-export error types
pub use error::{CameraError, CameraResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        frame_key, varied_camera_slot, ActionFamily, CameraError, CameraKind, CameraLayout,
        CameraResult, CameraTypeMap, ChannelOrder, Frame, SlotBinding, HAND_CAMERA_SLOT,
    };
}

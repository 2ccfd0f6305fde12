//! Camera identity resolution.
//!
//! A trajectory records one integer-coded dataset per raw camera
//! identifier under `observation/camera_type`. Resolution classifies each
//! identifier into a [`CameraKind`] and binds logical slot names to the
//! sorted identifiers, so the slot assignment is stable across conversion
//! runs and across separately recorded train/eval splits.

use tracing::warn;
use trajectory_store::{Node, TrajectoryStore};
use trajectory_types::{paths, CameraKind, CameraLayout, CameraTypeMap};

use crate::error::{ConvertError, ConvertResult};

/// Reads and classifies the trajectory's camera type records.
///
/// # Errors
///
/// Fails if the camera type group is missing, a record is not an integer
/// dataset, a record is empty, or a type code is unrecognized.
pub fn read_camera_types(store: &TrajectoryStore) -> ConvertResult<CameraTypeMap> {
    let group = store.group(paths::CAMERA_TYPE_GROUP)?;

    let mut cameras = CameraTypeMap::new();
    for (id, node) in group.iter() {
        let dataset = match node {
            Node::Dataset(ds) => ds,
            Node::Group(_) => {
                return Err(ConvertError::shape_mismatch(
                    format!("{}/{id}", paths::CAMERA_TYPE_GROUP),
                    "expected a dataset, found a group",
                ))
            }
        };
        let codes = dataset.data.as_i64().ok_or_else(|| {
            ConvertError::shape_mismatch(
                format!("{}/{id}", paths::CAMERA_TYPE_GROUP),
                format!("expected i64 type codes, found {}", dataset.data.dtype()),
            )
        })?;
        // The type is recorded per timestep but constant; the first
        // element is the camera's class.
        let code = codes
            .iter()
            .next()
            .copied()
            .ok_or_else(|| ConvertError::EmptyCameraType { id: id.to_string() })?;
        let kind = CameraKind::from_code(id, code)?;
        cameras.insert(id.to_string(), kind);
    }
    Ok(cameras)
}

/// Builds the logical slot layout from classified cameras.
///
/// # Errors
///
/// Returns an error if no hand camera was recorded.
pub fn resolve_layout(cameras: &CameraTypeMap) -> ConvertResult<CameraLayout> {
    let hand_count = cameras
        .values()
        .filter(|kind| **kind == CameraKind::Hand)
        .count();
    if hand_count > 1 {
        warn!(
            hand_count,
            "multiple hand cameras recorded; binding the first in sorted order"
        );
    }
    Ok(CameraLayout::resolve(cameras)?)
}

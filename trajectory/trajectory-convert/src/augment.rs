//! The dataset augmenter.
//!
//! One call converts one trajectory: duplicate the source file, attach
//! aligned camera imagery, re-derive action representations, normalize
//! array ranks, and prune idle timesteps. The source file is never
//! mutated; all work happens on the resolution-tagged copy.

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use ndarray::{s, Array2, Array3, Ix2};
use tracing::{debug, info};
use trajectory_store::{ArrayData, Dataset, Node, TrajectoryStore};
use trajectory_types::{paths, ActionFamily, Frame};

use crate::cameras::{read_camera_types, resolve_layout};
use crate::config::ResolvedConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::image::stack_frames;
use crate::provider::FrameProvider;
use crate::prune::{idle_timesteps, remove_timesteps};
use crate::rotation::RotationCodec;

/// Output path for a converted trajectory: a resolution-tagged sibling of
/// the source file.
#[must_use]
pub fn output_path(path: &Path, imsize: usize) -> PathBuf {
    path.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("trajectory_im{imsize}.traj"))
}

/// Converts one trajectory.
///
/// Steps, in order: copy the source file, resolve camera identities, pull
/// aligned frames for every timestep (zero-filling missing frames), stack
/// and write per-slot image datasets, re-derive both action families,
/// normalize action ranks, prune idle timesteps unless configured
/// otherwise, and save. Returns the output path.
///
/// # Errors
///
/// Fails on I/O errors, unrecognized camera types, and shape mismatches.
/// There are no retries; the caller decides whether to continue with other
/// trajectories.
pub fn convert_trajectory(
    path: &Path,
    provider: &mut dyn FrameProvider,
    config: &ResolvedConfig,
) -> ConvertResult<PathBuf> {
    let out = output_path(path, config.imsize);
    fs::copy(path, &out)?;
    let mut store = TrajectoryStore::open(&out)?;

    let episode_len = store
        .dataset(paths::CARTESIAN_POSITION)?
        .data
        .leading_dim()
        .ok_or_else(|| {
            ConvertError::shape_mismatch(paths::CARTESIAN_POSITION, "expected rank >= 1")
        })?;

    let cameras = read_camera_types(&store)?;
    let layout = resolve_layout(&cameras)?;
    info!(
        path = %path.display(),
        episode_len,
        varied_cameras = layout.num_varied(),
        "converting trajectory"
    );

    // Pull aligned frames for every timestep. A missing frame (or a whole
    // failed capture) becomes a zero-filled frame; conversion never aborts
    // for a dropped frame.
    let bindings: Vec<_> = layout.bindings().collect();
    let mut slot_frames: Vec<Vec<Array3<u8>>> = bindings
        .iter()
        .map(|_| Vec::with_capacity(episode_len))
        .collect();
    for index in 0..episode_len {
        let observed = provider.read_cameras(index, &cameras)?;
        for (slot, binding) in bindings.iter().enumerate() {
            let frame = match &observed {
                None => Frame::zeros(config.imsize),
                Some(set) => set
                    .get(&binding.frame_key)
                    .cloned()
                    .map_or_else(|| Frame::zeros(config.imsize), Frame::into_rgb),
            };
            if frame.pixels.dim() != (config.imsize, config.imsize, 3) {
                return Err(ConvertError::shape_mismatch(
                    &binding.slot,
                    format!(
                        "frame at timestep {index} has shape {shape:?}, expected [{size}, {size}, 3]",
                        shape = frame.pixels.shape(),
                        size = config.imsize
                    ),
                ));
            }
            slot_frames[slot].push(frame.pixels);
        }
    }

    // Stack each slot into [T, H, W, 3] and write it, replacing any prior
    // dataset of the same name.
    let image_group = store.ensure_group(paths::IMAGE_GROUP)?;
    for (binding, frames) in bindings.iter().zip(slot_frames) {
        let stacked = stack_frames(&frames, config.imsize)?;
        debug!(slot = %binding.slot, camera = %binding.raw_id, "writing image stack");
        if image_group.contains(&binding.slot) {
            image_group.remove(&binding.slot);
        }
        image_group.create_dataset(
            &binding.slot,
            Dataset::compressed(ArrayData::U8(stacked.into_dyn())),
        )?;
    }

    derive_action_arrays(&mut store, config.rotation.as_ref())?;
    normalize_action_ranks(&mut store)?;

    if config.keep_idle_timesteps {
        debug!("keeping idle timesteps");
    } else {
        let idle = idle_timesteps(&store.dataset(paths::MOVEMENT_ENABLED)?.data)?;
        info!(idle = idle.len(), "pruning idle timesteps");
        remove_timesteps(&mut store, &idle)?;
    }

    store.save()?;
    Ok(out)
}

/// Splits both raw action families into position, Euler rotation, and the
/// configured rotation encoding, replacing existing derived entries.
fn derive_action_arrays(
    store: &mut TrajectoryStore,
    codec: &dyn RotationCodec,
) -> ConvertResult<()> {
    for family in ActionFamily::ALL {
        let source_path = format!("{}/{}", paths::ACTION_GROUP, family.source_key());
        let source = store.dataset(&source_path)?.data.clone();
        let derived = split_action(&source, codec, &source_path)?;

        let outputs = [
            (family.prefixed("pos"), derived.pos),
            (family.prefixed("rot_euler"), derived.rot_euler),
            (
                family.prefixed(&format!("rot_{}", codec.name())),
                derived.rot_encoded,
            ),
        ];
        let action_group = store.group_mut(paths::ACTION_GROUP)?;
        for (name, data) in outputs {
            if action_group.contains(&name) {
                action_group.remove(&name);
            }
            action_group.create_dataset(&name, Dataset::new(ArrayData::F64(data.into_dyn())))?;
        }
    }
    Ok(())
}

struct DerivedActions {
    pos: Array2<f64>,
    rot_euler: Array2<f64>,
    rot_encoded: Array2<f64>,
}

fn split_action(
    source: &ArrayData,
    codec: &dyn RotationCodec,
    path: &str,
) -> ConvertResult<DerivedActions> {
    let raw = source
        .as_f64()
        .ok_or_else(|| {
            ConvertError::shape_mismatch(
                path,
                format!("expected f64 actions, found {}", source.dtype()),
            )
        })?
        .clone()
        .into_dimensionality::<Ix2>()
        .map_err(|_| {
            ConvertError::shape_mismatch(path, format!("expected rank 2, found {:?}", source.shape()))
        })?;
    if raw.ncols() < 6 {
        return Err(ConvertError::shape_mismatch(
            path,
            format!("expected >= 6 columns, found {}", raw.ncols()),
        ));
    }

    let pos = raw.slice(s![.., 0..3]).to_owned();
    let rot_euler = raw.slice(s![.., 3..6]).to_owned();

    let mut rot_encoded = Array2::zeros((raw.nrows(), codec.dim()));
    for (i, row) in rot_euler.rows().into_iter().enumerate() {
        let matrix = crate::rotation::euler_xyz_to_matrix(Vector3::new(row[0], row[1], row[2]));
        for (j, value) in codec.encode(&matrix).into_iter().enumerate().take(codec.dim()) {
            rot_encoded[[i, j]] = value;
        }
    }

    Ok(DerivedActions {
        pos,
        rot_euler,
        rot_encoded,
    })
}

/// Reshapes every rank-1 dataset directly under the action group to a
/// rank-2 column, so all action entries read as rows of a 2-D table.
fn normalize_action_ranks(store: &mut TrajectoryStore) -> ConvertResult<()> {
    let action_group = store.group_mut(paths::ACTION_GROUP)?;
    let flat: Vec<String> = action_group
        .iter()
        .filter_map(|(name, node)| match node {
            Node::Dataset(ds) if ds.data.ndim() == 1 => Some(name.to_string()),
            _ => None,
        })
        .collect();

    for name in flat {
        if let Some(Node::Dataset(ds)) = action_group.remove(&name) {
            let reshaped = Dataset {
                data: ds.data.insert_trailing_axis(),
                compression: ds.compression,
            };
            action_group.create_dataset(&name, reshaped)?;
        }
    }
    Ok(())
}

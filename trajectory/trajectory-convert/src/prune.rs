//! Idle timestep pruning.
//!
//! After conversion, timesteps recorded while robot movement was disabled
//! carry no training signal. Pruning removes those rows from every
//! per-timestep array in the store: any dataset whose leading dimension
//! equals the episode length, at any depth. Datasets with a different
//! leading dimension are per-episode metadata and are left untouched with
//! a notice.

use tracing::info;
use trajectory_store::{Dataset, Group, Node, TrajectoryStore};
use trajectory_types::paths;

use crate::error::{ConvertError, ConvertResult};

/// Indices of timesteps recorded with movement disabled.
///
/// # Errors
///
/// Returns a shape mismatch unless `flags` is a rank-1 boolean array.
pub fn idle_timesteps(flags: &trajectory_store::ArrayData) -> ConvertResult<Vec<usize>> {
    let bools = flags.as_bool().ok_or_else(|| {
        ConvertError::shape_mismatch(
            paths::MOVEMENT_ENABLED,
            format!("expected bool flags, found {}", flags.dtype()),
        )
    })?;
    if bools.ndim() != 1 {
        return Err(ConvertError::shape_mismatch(
            paths::MOVEMENT_ENABLED,
            format!("expected rank 1, found shape {:?}", bools.shape()),
        ));
    }
    Ok(bools
        .iter()
        .enumerate()
        .filter(|(_, enabled)| !**enabled)
        .map(|(i, _)| i)
        .collect())
}

/// Removes the given timestep indices from every per-timestep array.
///
/// The episode length is the leading dimension of
/// `action/cartesian_position`. Arrays are rewritten entry-by-entry
/// (remove, then create) since the store format does not resize in place;
/// remaining rows keep their original order.
///
/// # Errors
///
/// Fails if the episode-length reference dataset is missing or a rewrite
/// fails.
pub fn remove_timesteps(store: &mut TrajectoryStore, remove: &[usize]) -> ConvertResult<()> {
    let episode_len = store
        .dataset(paths::CARTESIAN_POSITION)?
        .data
        .leading_dim()
        .ok_or_else(|| {
            ConvertError::shape_mismatch(paths::CARTESIAN_POSITION, "expected rank >= 1")
        })?;

    if remove.is_empty() {
        return Ok(());
    }

    let keep = keep_indices(episode_len, remove);
    prune_group(store.root_mut(), "", episode_len, &keep)
}

/// Complement of `remove` within `0..len`, in ascending order.
fn keep_indices(len: usize, remove: &[usize]) -> Vec<usize> {
    let mut removed = vec![false; len];
    for &index in remove {
        if index < len {
            removed[index] = true;
        }
    }
    (0..len).filter(|&i| !removed[i]).collect()
}

fn prune_group(
    group: &mut Group,
    path: &str,
    episode_len: usize,
    keep: &[usize],
) -> ConvertResult<()> {
    let names: Vec<String> = group.names().map(ToString::to_string).collect();
    for name in names {
        let child_path = if path.is_empty() {
            name.clone()
        } else {
            format!("{path}/{name}")
        };
        match group.child_mut(&name) {
            Some(Node::Group(child)) => {
                prune_group(child, &child_path, episode_len, keep)?;
            }
            Some(Node::Dataset(dataset)) => {
                if dataset.data.leading_dim() != Some(episode_len) {
                    info!(
                        "skipping {child_path}: leading dimension {:?} != {episode_len}",
                        dataset.data.leading_dim()
                    );
                    continue;
                }
                let pruned = Dataset {
                    data: dataset.data.select_rows(keep)?,
                    compression: dataset.compression,
                };
                group.remove(&name);
                group.create_dataset(&name, pruned)?;
            }
            None => {}
        }
    }
    Ok(())
}

//! End-to-end conversion tests over synthetic trajectories.
//!
//! Each test builds a small recorded trajectory plus its frame archive in
//! a temp directory, runs the full conversion pass, and checks the
//! resulting store.
//!
//! Run with: cargo test -p trajectory-convert --test conversion

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2, Array4};
use tempfile::tempdir;

use trajectory_convert::{
    convert_trajectory, euler_xyz_to_matrix, matrix_to_rotation_6d, ConvertConfig, ConvertError,
    RecordedFrameProvider, ResolvedConfig, RotationCodecRegistry, FRAMES_FILE, RECORDINGS_DIR,
};
use trajectory_store::{Dataset, TrajectoryStore};
use trajectory_types::paths;

/// Episode length of the synthetic trajectory.
const T: usize = 6;

/// Target image resolution for the tests.
const IMSIZE: usize = 8;

const HAND_CAM: &str = "17225336";
const VARIED_CAM_A: &str = "24013089";
const VARIED_CAM_B: &str = "25047636";

/// Movement flags: timesteps 2 and 4 are idle.
const MOVEMENT: [bool; T] = [true, true, false, true, false, true];

fn euler_for_row(i: usize) -> [f64; 3] {
    [0.1 * i as f64, -0.05 * i as f64, 0.2 * i as f64]
}

fn action_rows() -> Array2<f64> {
    Array2::from_shape_fn((T, 6), |(i, j)| {
        if j < 3 {
            (i * 3 + j) as f64
        } else {
            euler_for_row(i)[j - 3]
        }
    })
}

/// Writes a synthetic trajectory store and returns its path.
fn write_trajectory(dir: &Path) -> PathBuf {
    let mut store = TrajectoryStore::new();

    let action = store.ensure_group(paths::ACTION_GROUP).unwrap();
    action
        .create_dataset("cartesian_position", Dataset::new(action_rows().into_dyn()))
        .unwrap();
    action
        .create_dataset("cartesian_velocity", Dataset::new(action_rows().into_dyn()))
        .unwrap();
    let gripper = Array1::from_shape_fn(T, |i| i as f64 / T as f64);
    action
        .create_dataset("gripper_position", Dataset::new(gripper.into_dyn()))
        .unwrap();

    let camera_type = store.ensure_group(paths::CAMERA_TYPE_GROUP).unwrap();
    for (id, code) in [(HAND_CAM, 0i64), (VARIED_CAM_A, 1), (VARIED_CAM_B, 1)] {
        let codes = Array1::from_vec(vec![code; T]).into_dyn();
        camera_type.create_dataset(id, Dataset::new(codes)).unwrap();
    }

    let info = store
        .ensure_group("observation/controller_info")
        .unwrap();
    info.create_dataset(
        "movement_enabled",
        Dataset::new(Array1::from_vec(MOVEMENT.to_vec()).into_dyn()),
    )
    .unwrap();

    let state = store.ensure_group("observation/robot_state").unwrap();
    let joints = Array2::from_shape_fn((T, 7), |(i, j)| (i + j) as f64);
    state
        .create_dataset("joint_positions", Dataset::new(joints.into_dyn()))
        .unwrap();

    let meta = store.ensure_group("observation/meta").unwrap();
    meta.create_dataset(
        "episode_id",
        Dataset::new(Array1::from_vec(vec![42i64]).into_dyn()),
    )
    .unwrap();

    let path = dir.join("trajectory.traj");
    store.save_as(&path).unwrap();
    path
}

/// BGR base values per camera, so channel reversal is observable.
fn bgr_for(id: &str) -> [u8; 3] {
    match id {
        HAND_CAM => [10, 20, 30],
        VARIED_CAM_A => [40, 50, 60],
        _ => [70, 80, 90],
    }
}

/// Writes the frame archive with `frames_len` frames per camera.
fn write_recordings(dir: &Path, frames_len: usize) {
    let recordings = dir.join(RECORDINGS_DIR);
    std::fs::create_dir_all(&recordings).unwrap();

    let mut archive = TrajectoryStore::new();
    let group = archive.ensure_group("frames").unwrap();
    for id in [HAND_CAM, VARIED_CAM_A, VARIED_CAM_B] {
        let [b, g, r] = bgr_for(id);
        let stack = Array4::from_shape_fn((frames_len, 4, 4, 3), |(_, _, _, c)| match c {
            0 => b,
            1 => g,
            _ => r,
        });
        group
            .create_dataset(id, Dataset::compressed(stack.into_dyn()))
            .unwrap();
    }
    archive.save_as(recordings.join(FRAMES_FILE)).unwrap();
}

fn config(keep_idle_timesteps: bool) -> ResolvedConfig {
    ConvertConfig {
        imsize: IMSIZE,
        keep_idle_timesteps,
        ..ConvertConfig::default()
    }
    .resolve(&RotationCodecRegistry::default())
    .unwrap()
}

fn convert(dir: &Path, keep_idle_timesteps: bool) -> TrajectoryStore {
    let trajectory = dir.join("trajectory.traj");
    let mut provider = RecordedFrameProvider::open(&trajectory, IMSIZE).unwrap();
    let out = convert_trajectory(&trajectory, &mut provider, &config(keep_idle_timesteps)).unwrap();
    assert_eq!(out, dir.join(format!("trajectory_im{IMSIZE}.traj")));
    TrajectoryStore::open(out).unwrap()
}

#[test]
fn slots_are_named_and_shaped() {
    let dir = tempdir().unwrap();
    write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    let store = convert(dir.path(), true);

    let image_group = store.group(paths::IMAGE_GROUP).unwrap();
    let slots: Vec<&str> = image_group.names().collect();
    assert_eq!(
        slots,
        vec![
            "hand_camera_image",
            "varied_camera_1_image",
            "varied_camera_2_image"
        ]
    );

    for slot in slots {
        let ds = image_group.dataset(slot).unwrap();
        assert_eq!(ds.data.shape(), &[T, IMSIZE, IMSIZE, 3]);
        assert_eq!(ds.data.dtype(), "u8");
    }

    // Slot numbering follows ascending raw identifier order.
    let varied_1 = image_group.dataset("varied_camera_1_image").unwrap();
    let pixels = varied_1.data.as_u8().unwrap();
    let [b, _, r] = bgr_for(VARIED_CAM_A);
    // Channel order was reversed from BGR to RGB.
    assert_eq!(pixels[[0, 0, 0, 0]], r);
    assert_eq!(pixels[[0, 0, 0, 2]], b);
}

#[test]
fn actions_are_rederived() {
    let dir = tempdir().unwrap();
    write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    let store = convert(dir.path(), true);

    for prefix in ["abs_", "rel_"] {
        let pos = store.dataset(&format!("action/{prefix}pos")).unwrap();
        assert_eq!(pos.data.shape(), &[T, 3]);

        let euler = store.dataset(&format!("action/{prefix}rot_euler")).unwrap();
        assert_eq!(euler.data.shape(), &[T, 3]);

        let six_d = store.dataset(&format!("action/{prefix}rot_6d")).unwrap();
        assert_eq!(six_d.data.shape(), &[T, 6]);

        let six_d = six_d.data.as_f64().unwrap();
        for i in 0..T {
            let [a, b, c] = euler_for_row(i);
            let expected =
                matrix_to_rotation_6d(&euler_xyz_to_matrix(nalgebra::Vector3::new(a, b, c)));
            for (j, want) in expected.iter().enumerate() {
                assert!((six_d[[i, j]] - want).abs() < 1e-12);
            }
        }
    }

    // Position columns are copied verbatim.
    let pos = store.dataset("action/abs_pos").unwrap();
    let pos = pos.data.as_f64().unwrap();
    assert_eq!(pos[[2, 1]], 7.0);
}

#[test]
fn flat_action_entries_become_columns() {
    let dir = tempdir().unwrap();
    write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    let store = convert(dir.path(), true);

    let gripper = store.dataset("action/gripper_position").unwrap();
    assert_eq!(gripper.data.shape(), &[T, 1]);

    // Every persisted action entry has rank >= 2.
    let action = store.group(paths::ACTION_GROUP).unwrap();
    for name in action.names() {
        let ds = action.dataset(name).unwrap();
        assert!(ds.data.ndim() >= 2, "{name} has rank {}", ds.data.ndim());
    }
}

#[test]
fn keep_flag_preserves_episode_length() {
    let dir = tempdir().unwrap();
    write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    let store = convert(dir.path(), true);
    let pos = store.dataset(paths::CARTESIAN_POSITION).unwrap();
    assert_eq!(pos.data.leading_dim(), Some(T));
}

#[test]
fn idle_timesteps_are_pruned() {
    let dir = tempdir().unwrap();
    write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    let store = convert(dir.path(), false);

    let idle = MOVEMENT.iter().filter(|enabled| !**enabled).count();
    let kept = T - idle;

    for path in [
        paths::CARTESIAN_POSITION,
        "action/abs_pos",
        "action/gripper_position",
        "observation/robot_state/joint_positions",
        paths::MOVEMENT_ENABLED,
        "observation/camera/image/hand_camera_image",
    ] {
        let ds = store.dataset(path).unwrap();
        assert_eq!(ds.data.leading_dim(), Some(kept), "{path}");
    }

    // Remaining rows keep their original order: row 2 was original row 3.
    let pos = store.dataset(paths::CARTESIAN_POSITION).unwrap();
    let pos = pos.data.as_f64().unwrap();
    assert_eq!(pos[[2, 0]], 9.0);

    // Per-episode metadata is untouched.
    let meta = store.dataset("observation/meta/episode_id").unwrap();
    assert_eq!(meta.data.leading_dim(), Some(1));
}

#[test]
fn missing_frames_become_zero_frames() {
    let dir = tempdir().unwrap();
    write_trajectory(dir.path());
    // One frame short: capture fails for the final timestep.
    write_recordings(dir.path(), T - 1);

    let store = convert(dir.path(), true);

    let hand = store
        .dataset("observation/camera/image/hand_camera_image")
        .unwrap();
    assert_eq!(hand.data.shape(), &[T, IMSIZE, IMSIZE, 3]);
    let pixels = hand.data.as_u8().unwrap();

    // Captured timesteps hold real pixels; the failed one is all zero.
    assert_ne!(pixels[[0, 0, 0, 0]], 0);
    let last = pixels.index_axis(ndarray::Axis(0), T - 1);
    assert!(last.iter().all(|&v| v == 0));
}

#[test]
fn unknown_camera_type_aborts_conversion() {
    let dir = tempdir().unwrap();
    let trajectory = write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    // Re-record one camera with an unrecognized type code.
    let mut store = TrajectoryStore::open(&trajectory).unwrap();
    let group = store.group_mut(paths::CAMERA_TYPE_GROUP).unwrap();
    group.remove(VARIED_CAM_B);
    group
        .create_dataset(
            VARIED_CAM_B,
            Dataset::new(Array1::from_vec(vec![9i64; T]).into_dyn()),
        )
        .unwrap();
    store.save().unwrap();

    let mut provider = RecordedFrameProvider::open(&trajectory, IMSIZE).unwrap();
    let result = convert_trajectory(&trajectory, &mut provider, &config(true));
    assert!(matches!(result, Err(ConvertError::Camera(_))));
}

#[test]
fn existing_derived_entries_are_replaced() {
    let dir = tempdir().unwrap();
    let trajectory = write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    // Plant stale derived entries in the source, as a previous conversion
    // of the copy would have left behind.
    let mut store = TrajectoryStore::open(&trajectory).unwrap();
    let image = store.ensure_group(paths::IMAGE_GROUP).unwrap();
    image
        .create_dataset(
            "hand_camera_image",
            Dataset::new(Array1::from_vec(vec![0u8]).into_dyn()),
        )
        .unwrap();
    let action = store.group_mut(paths::ACTION_GROUP).unwrap();
    action
        .create_dataset(
            "abs_pos",
            Dataset::new(Array1::from_vec(vec![0.0f64]).into_dyn()),
        )
        .unwrap();
    store.save().unwrap();

    let converted = convert(dir.path(), true);
    let hand = converted
        .dataset("observation/camera/image/hand_camera_image")
        .unwrap();
    assert_eq!(hand.data.shape(), &[T, IMSIZE, IMSIZE, 3]);
    let abs_pos = converted.dataset("action/abs_pos").unwrap();
    assert_eq!(abs_pos.data.shape(), &[T, 3]);
}

#[test]
fn source_file_is_never_mutated() {
    let dir = tempdir().unwrap();
    let trajectory = write_trajectory(dir.path());
    write_recordings(dir.path(), T);

    let _ = convert(dir.path(), false);

    let source = TrajectoryStore::open(&trajectory).unwrap();
    assert!(!source.contains(paths::IMAGE_GROUP));
    assert!(!source.contains("action/abs_pos"));
    let pos = source.dataset(paths::CARTESIAN_POSITION).unwrap();
    assert_eq!(pos.data.leading_dim(), Some(T));
}

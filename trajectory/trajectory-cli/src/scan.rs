//! Dataset folder scanning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name a recorded trajectory is stored under.
pub const TRAJECTORY_FILE_NAME: &str = "trajectory.traj";

/// Expands a leading `~` to the user's home directory.
pub fn expand_user(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Recursively collects every trajectory file under `root`, sorted.
pub fn find_trajectories(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, found)?;
        } else if entry.file_name() == TRAJECTORY_FILE_NAME {
            found.push(path);
        }
    }
    Ok(())
}

//! The file-backed trajectory store.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::file;
use crate::group::{Dataset, Group, Node};

/// A hierarchical array store bound to an optional backing file.
///
/// Paths are `/`-separated, rooted at the store root; empty components are
/// ignored, so `"observation/camera"` and `"/observation/camera/"` address
/// the same group.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use trajectory_store::{Dataset, TrajectoryStore};
///
/// let mut store = TrajectoryStore::new();
/// let pos = Array2::<f64>::zeros((5, 6)).into_dyn();
/// store.ensure_group("action").ok();
/// if let Ok(action) = store.group_mut("action") {
///     action.create_dataset("cartesian_position", Dataset::new(pos)).ok();
/// }
/// assert!(store.contains("action/cartesian_position"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectoryStore {
    root: Group,
    path: Option<PathBuf>,
}

fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty())
}

impl TrajectoryStore {
    /// Creates an empty in-memory store with no backing file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a store file and decodes the whole tree.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FileNotFound`] if the path does not exist and
    /// decode errors for malformed files.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                StoreError::Io(e)
            }
        })?;
        let mut reader = BufReader::new(file);
        let root = file::read_store(&mut reader)?;
        Ok(Self {
            root,
            path: Some(path.to_path_buf()),
        })
    }

    /// Persists the tree to the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unbound`] if the store was never opened or
    /// saved to a path.
    pub fn save(&self) -> StoreResult<()> {
        let path = self.path.clone().ok_or(StoreError::Unbound)?;
        self.write_to(&path)
    }

    /// Persists the tree to `path` and binds the store to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        self.write_to(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write_to(&self, path: &Path) -> StoreResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        file::write_store(&mut writer, &self.root)
    }

    /// The backing file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The root group.
    #[must_use]
    pub const fn root(&self) -> &Group {
        &self.root
    }

    /// The root group, mutably.
    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Returns `true` if an entry (group or dataset) exists at `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    fn node(&self, path: &str) -> Option<&Node> {
        let mut comps = components(path);
        let first = comps.next()?;
        let mut node = self.root.child(first)?;
        for comp in comps {
            node = match node {
                Node::Group(g) => g.child(comp)?,
                Node::Dataset(_) => return None,
            };
        }
        Some(node)
    }

    /// Resolves `path` to a group.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for missing components and
    /// [`StoreError::NotAGroup`] if the entry is a dataset.
    pub fn group(&self, path: &str) -> StoreResult<&Group> {
        let mut current = &self.root;
        for comp in components(path) {
            current = match current.child(comp) {
                Some(Node::Group(g)) => g,
                Some(Node::Dataset(_)) => return Err(StoreError::not_a_group(path)),
                None => return Err(StoreError::not_found(path)),
            };
        }
        Ok(current)
    }

    /// Resolves `path` to a group, mutably.
    ///
    /// # Errors
    ///
    /// Same as [`TrajectoryStore::group`].
    pub fn group_mut(&mut self, path: &str) -> StoreResult<&mut Group> {
        let mut current = &mut self.root;
        for comp in components(path) {
            current = match current.child_mut(comp) {
                Some(Node::Group(g)) => g,
                Some(Node::Dataset(_)) => return Err(StoreError::not_a_group(path)),
                None => return Err(StoreError::not_found(path)),
            };
        }
        Ok(current)
    }

    /// Resolves `path`, creating intermediate groups as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAGroup`] if any component resolves to a
    /// dataset.
    pub fn ensure_group(&mut self, path: &str) -> StoreResult<&mut Group> {
        let mut current = &mut self.root;
        for comp in components(path) {
            current = current.ensure_group(comp)?;
        }
        Ok(current)
    }

    /// Resolves `path` to a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for missing entries and
    /// [`StoreError::NotADataset`] if the entry is a group.
    pub fn dataset(&self, path: &str) -> StoreResult<&Dataset> {
        match self.node(path) {
            Some(Node::Dataset(ds)) => Ok(ds),
            Some(Node::Group(_)) => Err(StoreError::not_a_dataset(path)),
            None => Err(StoreError::not_found(path)),
        }
    }
}

//! Groups, datasets, and the node tree.
//!
//! A store is a tree of named nodes. Interior nodes are [`Group`]s, leaves
//! are [`Dataset`]s. The node set is closed: there is no third kind.
//!
//! Children are held in a sorted map, so iteration order is deterministic
//! across runs and platforms. Determinism matters downstream: camera slot
//! assignment and persisted layouts must be stable between conversion runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::array::ArrayData;
use crate::error::{StoreError, StoreResult};

/// Compression applied to a dataset's payload when the store is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Compression {
    /// Store the payload as-is.
    #[default]
    None,
    /// Compress the payload with zstd.
    Zstd,
}

/// A named leaf array with its persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// The array payload.
    pub data: ArrayData,
    /// Compression applied on save.
    pub compression: Compression,
}

impl Dataset {
    /// Creates an uncompressed dataset.
    #[must_use]
    pub fn new(data: impl Into<ArrayData>) -> Self {
        Self {
            data: data.into(),
            compression: Compression::None,
        }
    }

    /// Creates a zstd-compressed dataset (used for image payloads).
    #[must_use]
    pub fn compressed(data: impl Into<ArrayData>) -> Self {
        Self {
            data: data.into(),
            compression: Compression::Zstd,
        }
    }
}

/// A node in the store tree: either a nested group or a leaf dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A nested group of named children.
    Group(Group),
    /// A leaf array.
    Dataset(Dataset),
}

/// An ordered map of name to child node.
///
/// Mutation follows the underlying format's rules: entries are created and
/// removed whole. There is no in-place resize; replacing an array means
/// removing the named entry and creating a new one.
///
/// # Example
///
/// ```
/// use ndarray::Array1;
/// use trajectory_store::{Dataset, Group};
///
/// let mut group = Group::new();
/// let data = Array1::from_vec(vec![1.0, 2.0]).into_dyn();
/// group.create_dataset("pos", Dataset::new(data)).ok();
/// assert!(group.contains("pos"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    children: BTreeMap<String, Node>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if a child with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Child names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Iterates children in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Looks up a child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Looks up a child by name, mutably.
    #[must_use]
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Looks up a child dataset by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no child has this name and
    /// [`StoreError::NotADataset`] if the child is a group.
    pub fn dataset(&self, name: &str) -> StoreResult<&Dataset> {
        match self.children.get(name) {
            Some(Node::Dataset(ds)) => Ok(ds),
            Some(Node::Group(_)) => Err(StoreError::not_a_dataset(name)),
            None => Err(StoreError::not_found(name)),
        }
    }

    /// Creates an empty child group.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if a child with this name
    /// already exists.
    pub fn create_group(&mut self, name: &str) -> StoreResult<&mut Group> {
        if self.children.contains_key(name) {
            return Err(StoreError::already_exists(name));
        }
        match self
            .children
            .entry(name.to_string())
            .or_insert_with(|| Node::Group(Group::new()))
        {
            Node::Group(g) => Ok(g),
            Node::Dataset(_) => Err(StoreError::not_a_group(name)),
        }
    }

    /// Returns the named child group, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAGroup`] if the existing child is a dataset.
    pub fn ensure_group(&mut self, name: &str) -> StoreResult<&mut Group> {
        match self
            .children
            .entry(name.to_string())
            .or_insert_with(|| Node::Group(Group::new()))
        {
            Node::Group(g) => Ok(g),
            Node::Dataset(_) => Err(StoreError::not_a_group(name)),
        }
    }

    /// Creates a child dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if a child with this name
    /// already exists; remove the old entry first.
    pub fn create_dataset(&mut self, name: &str, dataset: Dataset) -> StoreResult<()> {
        if self.children.contains_key(name) {
            return Err(StoreError::already_exists(name));
        }
        self.children
            .insert(name.to_string(), Node::Dataset(dataset));
        Ok(())
    }

    /// Removes a child by name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.children.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn dataset() -> Dataset {
        Dataset::new(Array1::from_vec(vec![1.0, 2.0, 3.0]).into_dyn())
    }

    #[test]
    fn create_and_lookup() {
        let mut group = Group::new();
        assert!(group.create_dataset("pos", dataset()).is_ok());
        assert!(group.contains("pos"));
        assert_eq!(group.len(), 1);
        assert!(group.dataset("pos").is_ok());
    }

    #[test]
    fn create_duplicate_fails() {
        let mut group = Group::new();
        assert!(group.create_dataset("pos", dataset()).is_ok());
        assert!(matches!(
            group.create_dataset("pos", dataset()),
            Err(StoreError::AlreadyExists { .. })
        ));
        assert!(matches!(
            group.create_group("pos"),
            Err(StoreError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn ensure_group_is_idempotent() {
        let mut group = Group::new();
        assert!(group.ensure_group("camera").is_ok());
        assert!(group.ensure_group("camera").is_ok());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn ensure_group_rejects_dataset() {
        let mut group = Group::new();
        assert!(group.create_dataset("pos", dataset()).is_ok());
        assert!(matches!(
            group.ensure_group("pos"),
            Err(StoreError::NotAGroup { .. })
        ));
    }

    #[test]
    fn dataset_lookup_on_group_fails() {
        let mut group = Group::new();
        assert!(group.ensure_group("camera").is_ok());
        assert!(matches!(
            group.dataset("camera"),
            Err(StoreError::NotADataset { .. })
        ));
        assert!(matches!(
            group.dataset("missing"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_then_recreate() {
        let mut group = Group::new();
        assert!(group.create_dataset("pos", dataset()).is_ok());
        assert!(group.remove("pos").is_some());
        assert!(!group.contains("pos"));
        assert!(group.create_dataset("pos", dataset()).is_ok());
    }

    #[test]
    fn iteration_is_sorted() {
        let mut group = Group::new();
        assert!(group.create_dataset("zeta", dataset()).is_ok());
        assert!(group.create_dataset("alpha", dataset()).is_ok());
        assert!(group.create_dataset("mid", dataset()).is_ok());
        let names: Vec<&str> = group.names().collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}

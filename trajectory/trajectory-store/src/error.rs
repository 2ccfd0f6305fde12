//! Error types for the trajectory store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur when working with a trajectory store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store file not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The file is not a trajectory store (magic bytes do not match).
    #[error("not a trajectory store file: bad magic")]
    BadMagic,

    /// The file was written by an incompatible store version.
    #[error("unsupported store version: {got} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the file.
        got: u16,
        /// Version this build supports.
        supported: u16,
    },

    /// No entry exists at the given path.
    #[error("no such entry: {path}")]
    NotFound {
        /// The offending store path.
        path: String,
    },

    /// An entry with this name already exists.
    #[error("entry already exists: {path}")]
    AlreadyExists {
        /// The offending store path.
        path: String,
    },

    /// The entry at the given path is a dataset, not a group.
    #[error("not a group: {path}")]
    NotAGroup {
        /// The offending store path.
        path: String,
    },

    /// The entry at the given path is a group, not a dataset.
    #[error("not a dataset: {path}")]
    NotADataset {
        /// The offending store path.
        path: String,
    },

    /// Row selection on an array without a leading dimension.
    #[error("cannot select rows of a zero-rank array")]
    ZeroRank,

    /// Row index out of bounds for the array's leading dimension.
    #[error("row index {index} out of bounds for leading dimension {len}")]
    RowOutOfBounds {
        /// The offending index.
        index: usize,
        /// The array's leading dimension.
        len: usize,
    },

    /// The store has no backing file; use `save_as` first.
    #[error("store has no backing file; use save_as")]
    Unbound,

    /// Failed to encode the store tree.
    #[error("encode error: {0}")]
    Encode(String),

    /// Failed to decode the store tree.
    #[error("decode error: {0}")]
    Decode(String),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a not-found error for a store path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an already-exists error for a store path.
    #[must_use]
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Creates a not-a-group error for a store path.
    #[must_use]
    pub fn not_a_group(path: impl Into<String>) -> Self {
        Self::NotAGroup { path: path.into() }
    }

    /// Creates a not-a-dataset error for a store path.
    #[must_use]
    pub fn not_a_dataset(path: impl Into<String>) -> Self {
        Self::NotADataset { path: path.into() }
    }
}

//! Hierarchical array store for recorded robot trajectories.
//!
//! One store file holds one recorded episode: a tree of named groups with
//! n-dimensional array leaves, where every per-timestep array shares a
//! leading dimension equal to the episode length.
//!
//! # Store Model
//!
//! - [`TrajectoryStore`] - a root group bound to a backing file
//! - [`Group`] - ordered map of name to child node
//! - [`Dataset`] - a leaf array with its persistence settings
//! - [`ArrayData`] - dynamically-typed n-dimensional array
//!
//! # Mutation Rules
//!
//! The on-disk format is written in one pass and does not support in-place
//! resize. Replacing an array therefore means removing the named entry and
//! creating a new one; the API has no resize operation.
//!
//! # Example
//!
//! ```
//! use ndarray::Array2;
//! use trajectory_store::{Dataset, TrajectoryStore};
//!
//! let mut store = TrajectoryStore::new();
//! let actions = Array2::<f64>::zeros((10, 6)).into_dyn();
//! if let Ok(group) = store.ensure_group("action") {
//!     group.create_dataset("cartesian_position", Dataset::new(actions)).ok();
//! }
//!
//! let episode_len = store
//!     .dataset("action/cartesian_position")
//!     .ok()
//!     .and_then(|ds| ds.data.leading_dim());
//! assert_eq!(episode_len, Some(10));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod array;
mod error;
mod file;
mod group;
mod store;

// Re-export array types
pub use array::ArrayData;

// Re-export tree types
pub use group::{Compression, Dataset, Group, Node};

// Re-export the store
pub use store::TrajectoryStore;

// Re-export error types
pub use error::{StoreError, StoreResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ArrayData, Compression, Dataset, Group, Node, StoreError, StoreResult, TrajectoryStore,
    };
}

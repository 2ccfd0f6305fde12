//! Action family types.
//!
//! Each trajectory records two raw action streams: absolute cartesian
//! poses and relative (velocity) commands. Both are `[T, >=6]` arrays
//! whose first three columns are position and next three are Euler
//! rotation. Conversion re-derives per-family position/rotation arrays
//! under prefix-qualified names.

use serde::{Deserialize, Serialize};

/// One of the two recorded action streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionFamily {
    /// Absolute cartesian pose commands.
    Absolute,
    /// Relative (velocity) commands.
    Relative,
}

impl ActionFamily {
    /// Both families, in derivation order.
    pub const ALL: [Self; 2] = [Self::Absolute, Self::Relative];

    /// The source dataset name under the action group.
    #[must_use]
    pub const fn source_key(self) -> &'static str {
        match self {
            Self::Absolute => "cartesian_position",
            Self::Relative => "cartesian_velocity",
        }
    }

    /// The prefix for derived dataset names.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Absolute => "abs_",
            Self::Relative => "rel_",
        }
    }

    /// Prefixes a derived dataset name for this family.
    ///
    /// # Example
    ///
    /// ```
    /// use trajectory_types::ActionFamily;
    ///
    /// assert_eq!(ActionFamily::Absolute.prefixed("pos"), "abs_pos");
    /// assert_eq!(ActionFamily::Relative.prefixed("rot_euler"), "rel_rot_euler");
    /// ```
    #[must_use]
    pub fn prefixed(self, suffix: &str) -> String {
        format!("{}{suffix}", self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_keys() {
        assert_eq!(ActionFamily::Absolute.source_key(), "cartesian_position");
        assert_eq!(ActionFamily::Relative.source_key(), "cartesian_velocity");
    }

    #[test]
    fn prefixes() {
        assert_eq!(ActionFamily::Absolute.prefixed("rot_6d"), "abs_rot_6d");
        assert_eq!(ActionFamily::Relative.prefixed("pos"), "rel_pos");
    }

    #[test]
    fn all_covers_both() {
        assert_eq!(ActionFamily::ALL.len(), 2);
        assert_eq!(ActionFamily::ALL[0], ActionFamily::Absolute);
    }
}

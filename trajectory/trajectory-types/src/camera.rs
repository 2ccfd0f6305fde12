//! Camera identity and logical slot types.
//!
//! Recorded trajectories identify cameras by raw hardware serial (a string
//! like `"24013089"`). Downstream consumers need stable *logical* names that
//! survive hardware swaps and hold steady across separately recorded
//! train/eval splits. This module owns that mapping:
//!
//! - [`CameraKind`] classifies a raw identifier as hand-mounted or varied.
//! - [`CameraLayout`] binds logical slot names to raw identifiers, sorted
//!   so the assignment is deterministic across conversion runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CameraError, CameraResult};

/// Slot name of the single hand-mounted camera.
pub const HAND_CAMERA_SLOT: &str = "hand_camera_image";

/// View suffix for the left lens, the only view the conversion reads.
pub const LEFT_VIEW_SUFFIX: &str = "_left";

/// Returns the slot name for the `i`-th varied camera (1-based).
///
/// # Example
///
/// ```
/// use trajectory_types::varied_camera_slot;
///
/// assert_eq!(varied_camera_slot(1), "varied_camera_1_image");
/// ```
#[must_use]
pub fn varied_camera_slot(i: usize) -> String {
    format!("varied_camera_{i}_image")
}

/// Returns the frame key for a raw camera identifier (left view).
#[must_use]
pub fn frame_key(raw_id: &str) -> String {
    format!("{raw_id}{LEFT_VIEW_SUFFIX}")
}

/// Coarse camera class recorded with each trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraKind {
    /// Camera mounted on the robot hand.
    Hand,
    /// Free-standing camera whose placement varies between recordings.
    Varied,
}

impl CameraKind {
    /// The integer code this kind is recorded as.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Hand => 0,
            Self::Varied => 1,
        }
    }

    /// Classifies a recorded type code.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::UnknownCameraType`] for any code other than
    /// the two known kinds; a third camera class aborts conversion.
    pub fn from_code(id: &str, code: i64) -> CameraResult<Self> {
        match code {
            0 => Ok(Self::Hand),
            1 => Ok(Self::Varied),
            other => Err(CameraError::unknown_camera_type(id, other)),
        }
    }

    /// The recorded class name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hand => "hand_camera",
            Self::Varied => "varied_camera",
        }
    }
}

/// Raw camera identifier to kind, sorted by identifier.
///
/// A `BTreeMap` keeps classification output in ascending identifier order,
/// which the slot assignment below relies on.
pub type CameraTypeMap = BTreeMap<String, CameraKind>;

/// Binding of one logical slot to a raw camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBinding {
    /// Stable logical slot name (e.g. `varied_camera_1_image`).
    pub slot: String,
    /// Raw camera identifier.
    pub raw_id: String,
    /// Key under which the frame provider returns this camera's image.
    pub frame_key: String,
}

impl SlotBinding {
    fn new(slot: impl Into<String>, raw_id: &str) -> Self {
        Self {
            slot: slot.into(),
            raw_id: raw_id.to_string(),
            frame_key: frame_key(raw_id),
        }
    }
}

/// The resolved camera layout for one trajectory.
///
/// Invariants: exactly one hand camera slot; varied slots numbered from 1
/// in ascending raw-identifier order. Numbering is therefore invariant
/// under identifier relabeling that preserves relative order.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use trajectory_types::{CameraKind, CameraLayout};
///
/// let mut cameras = BTreeMap::new();
/// cameras.insert("17225336".to_string(), CameraKind::Hand);
/// cameras.insert("25047636".to_string(), CameraKind::Varied);
/// cameras.insert("24013089".to_string(), CameraKind::Varied);
///
/// let layout = CameraLayout::resolve(&cameras).ok();
/// let layout = layout.as_ref();
/// assert_eq!(layout.map(|l| l.hand.frame_key.as_str()), Some("17225336_left"));
/// assert_eq!(layout.map(|l| l.varied[0].raw_id.as_str()), Some("24013089"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraLayout {
    /// The single hand camera binding.
    pub hand: SlotBinding,
    /// Varied camera bindings, in slot-number order.
    pub varied: Vec<SlotBinding>,
}

impl CameraLayout {
    /// Resolves slot bindings from classified cameras.
    ///
    /// Identifiers of each class are taken in ascending order; the first
    /// hand camera becomes [`HAND_CAMERA_SLOT`] and varied cameras become
    /// `varied_camera_<i>_image` for `i = 1..N`.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::MissingHandCamera`] if no hand camera was
    /// recorded.
    pub fn resolve(cameras: &CameraTypeMap) -> CameraResult<Self> {
        // BTreeMap iteration is already in ascending identifier order.
        let hand_id = cameras
            .iter()
            .find(|(_, kind)| **kind == CameraKind::Hand)
            .map(|(id, _)| id.as_str())
            .ok_or(CameraError::MissingHandCamera)?;

        let varied = cameras
            .iter()
            .filter(|(_, kind)| **kind == CameraKind::Varied)
            .enumerate()
            .map(|(i, (id, _))| SlotBinding::new(varied_camera_slot(i + 1), id))
            .collect();

        Ok(Self {
            hand: SlotBinding::new(HAND_CAMERA_SLOT, hand_id),
            varied,
        })
    }

    /// All bindings, hand camera first.
    pub fn bindings(&self) -> impl Iterator<Item = &SlotBinding> {
        std::iter::once(&self.hand).chain(self.varied.iter())
    }

    /// Number of varied camera slots.
    #[must_use]
    pub fn num_varied(&self) -> usize {
        self.varied.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, CameraKind)]) -> CameraTypeMap {
        entries
            .iter()
            .map(|(id, kind)| ((*id).to_string(), *kind))
            .collect()
    }

    #[test]
    fn kind_codes_round_trip() {
        assert_eq!(CameraKind::from_code("a", 0).ok(), Some(CameraKind::Hand));
        assert_eq!(CameraKind::from_code("a", 1).ok(), Some(CameraKind::Varied));
        assert_eq!(CameraKind::Hand.code(), 0);
        assert_eq!(CameraKind::Varied.code(), 1);
    }

    #[test]
    fn kind_unknown_code() {
        assert!(matches!(
            CameraKind::from_code("25047636", 3),
            Err(CameraError::UnknownCameraType { code: 3, .. })
        ));
    }

    #[test]
    fn resolve_assigns_sorted_slots() {
        let cameras = map(&[
            ("25047636", CameraKind::Varied),
            ("17225336", CameraKind::Hand),
            ("24013089", CameraKind::Varied),
        ]);
        let layout = CameraLayout::resolve(&cameras);
        assert!(layout.is_ok());
        if let Ok(layout) = layout {
            assert_eq!(layout.hand.slot, HAND_CAMERA_SLOT);
            assert_eq!(layout.hand.frame_key, "17225336_left");
            assert_eq!(layout.num_varied(), 2);
            assert_eq!(layout.varied[0].slot, "varied_camera_1_image");
            assert_eq!(layout.varied[0].raw_id, "24013089");
            assert_eq!(layout.varied[1].slot, "varied_camera_2_image");
            assert_eq!(layout.varied[1].raw_id, "25047636");
        }
    }

    #[test]
    fn resolve_is_relabel_invariant() {
        // Relabeling identifiers while preserving relative order must keep
        // the same slot numbering.
        let first = map(&[
            ("1000", CameraKind::Hand),
            ("2000", CameraKind::Varied),
            ("3000", CameraKind::Varied),
        ]);
        let second = map(&[
            ("1111", CameraKind::Hand),
            ("2222", CameraKind::Varied),
            ("3333", CameraKind::Varied),
        ]);

        let slots = |cameras: &CameraTypeMap| -> Vec<String> {
            CameraLayout::resolve(cameras)
                .map(|l| l.bindings().map(|b| b.slot.clone()).collect())
                .unwrap_or_default()
        };
        assert_eq!(slots(&first), slots(&second));
    }

    #[test]
    fn resolve_requires_hand_camera() {
        let cameras = map(&[("24013089", CameraKind::Varied)]);
        assert!(matches!(
            CameraLayout::resolve(&cameras),
            Err(CameraError::MissingHandCamera)
        ));
    }

    #[test]
    fn resolve_uses_first_hand_camera() {
        let cameras = map(&[
            ("20000000", CameraKind::Hand),
            ("10000000", CameraKind::Hand),
        ]);
        let layout = CameraLayout::resolve(&cameras);
        assert_eq!(
            layout.ok().map(|l| l.hand.raw_id),
            Some("10000000".to_string())
        );
    }

    #[test]
    fn bindings_order_is_hand_first() {
        let cameras = map(&[
            ("b", CameraKind::Varied),
            ("a", CameraKind::Hand),
        ]);
        let layout = CameraLayout::resolve(&cameras);
        assert!(layout.is_ok());
        if let Ok(layout) = layout {
            let slots: Vec<&str> = layout.bindings().map(|b| b.slot.as_str()).collect();
            assert_eq!(slots, vec![HAND_CAMERA_SLOT, "varied_camera_1_image"]);
        }
    }

    #[test]
    fn frame_key_appends_left_view() {
        assert_eq!(frame_key("24013089"), "24013089_left");
    }
}

//! Observation modality registry.
//!
//! Learning pipelines transform raw observations into network inputs and
//! back: pixels are normalized, padded scans are trimmed, and so on. Each
//! such transformation is a *modality*: a named pair of pure array
//! functions (process, unprocess).
//!
//! The registry is an explicit owned value with a defined lifecycle:
//! defaults are installed at construction, overriding a modality replaces
//! its entry, and [`ModalityRegistry::reset`] restores the default table.
//! Nothing here is process-global.

use std::collections::BTreeMap;
use std::sync::Arc;

use ndarray::ArrayD;

use crate::error::{ConvertError, ConvertResult};

/// An observation array passed through modality functions.
pub type ObsArray = ArrayD<f64>;

/// A pure observation transform.
pub type ObsFn = Arc<dyn Fn(ObsArray) -> ObsArray + Send + Sync>;

/// Modality name for 8-bit color imagery.
pub const RGB_MODALITY: &str = "rgb";

/// Modality name for low-dimensional state vectors.
pub const LOW_DIM_MODALITY: &str = "low_dim";

/// A (process, unprocess) pair for one modality.
#[derive(Clone)]
pub struct ModalityCodec {
    process: ObsFn,
    unprocess: ObsFn,
}

impl ModalityCodec {
    /// Creates a codec from a process/unprocess pair.
    #[must_use]
    pub fn new(process: ObsFn, unprocess: ObsFn) -> Self {
        Self { process, unprocess }
    }

    /// An identity codec.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            process: Arc::new(|obs| obs),
            unprocess: Arc::new(|obs| obs),
        }
    }

    /// Maps a raw observation into its learning representation.
    #[must_use]
    pub fn process(&self, obs: ObsArray) -> ObsArray {
        (self.process)(obs)
    }

    /// Maps a learning representation back to the raw observation.
    #[must_use]
    pub fn unprocess(&self, obs: ObsArray) -> ObsArray {
        (self.unprocess)(obs)
    }
}

impl std::fmt::Debug for ModalityCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModalityCodec { .. }")
    }
}

/// Registry of modality codecs, keyed by modality name.
///
/// # Example
///
/// ```
/// use ndarray::arr1;
/// use trajectory_convert::{ModalityRegistry, RGB_MODALITY};
///
/// let registry = ModalityRegistry::default();
/// let codec = registry.get(RGB_MODALITY).ok();
///
/// // 255 maps to 1.0, 0 maps to -1.0.
/// let processed = codec.map(|c| c.process(arr1(&[0.0, 255.0]).into_dyn()));
/// assert_eq!(processed.map(|p| (p[[0]], p[[1]])), Some((-1.0, 1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct ModalityRegistry {
    entries: BTreeMap<String, ModalityCodec>,
}

impl Default for ModalityRegistry {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(RGB_MODALITY.to_string(), rgb_codec());
        entries.insert(LOW_DIM_MODALITY.to_string(), ModalityCodec::identity());
        Self { entries }
    }
}

impl ModalityRegistry {
    /// Registers a codec, replacing any existing entry of the same name.
    ///
    /// This is the override path: installing a custom processor for an
    /// existing modality swaps the registry entry rather than patching
    /// anything at runtime.
    pub fn register(&mut self, name: impl Into<String>, codec: ModalityCodec) {
        self.entries.insert(name.into(), codec);
    }

    /// Resolves a codec by modality name.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownModality`] for names that were never
    /// registered.
    pub fn get(&self, name: &str) -> ConvertResult<&ModalityCodec> {
        self.entries
            .get(name)
            .ok_or_else(|| ConvertError::UnknownModality {
                name: name.to_string(),
            })
    }

    /// Restores the default modality table, dropping all overrides.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Registered modality names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

/// Default pixel codec: `[0, 255]` bytes to `[-1, 1]` floats and back.
fn rgb_codec() -> ModalityCodec {
    ModalityCodec::new(
        Arc::new(|obs| obs.mapv(|v| (v / 255.0 - 0.5) * 2.0)),
        Arc::new(|obs| obs.mapv(|v| (v / 2.0 + 0.5) * 255.0)),
    )
}

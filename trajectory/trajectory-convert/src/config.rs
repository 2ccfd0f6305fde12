//! Conversion configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConvertResult;
use crate::rotation::{RotationCodec, RotationCodecRegistry};

/// User-facing conversion settings.
///
/// The rotation codec is referenced by name and resolved against a
/// [`RotationCodecRegistry`] before conversion starts; an unknown name
/// fails at resolution time, not mid-pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Target square image resolution.
    pub imsize: usize,
    /// Keep idle timesteps instead of pruning them.
    pub keep_idle_timesteps: bool,
    /// Name of the derived rotation encoding.
    pub rotation_codec: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            imsize: 128,
            keep_idle_timesteps: false,
            rotation_codec: "6d".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Resolves the codec name into a ready-to-run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConvertError::UnknownRotationCodec`] if the codec
    /// name is not registered.
    pub fn resolve(self, registry: &RotationCodecRegistry) -> ConvertResult<ResolvedConfig> {
        let rotation = registry.get(&self.rotation_codec)?;
        Ok(ResolvedConfig {
            imsize: self.imsize,
            keep_idle_timesteps: self.keep_idle_timesteps,
            rotation,
        })
    }
}

/// A configuration with its codec resolved.
#[derive(Clone)]
pub struct ResolvedConfig {
    /// Target square image resolution.
    pub imsize: usize,
    /// Keep idle timesteps instead of pruning them.
    pub keep_idle_timesteps: bool,
    /// The derived rotation encoding.
    pub rotation: Arc<dyn RotationCodec>,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("imsize", &self.imsize)
            .field("keep_idle_timesteps", &self.keep_idle_timesteps)
            .field("rotation", &self.rotation.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;

    #[test]
    fn default_matches_conversion_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.imsize, 128);
        assert!(!config.keep_idle_timesteps);
        assert_eq!(config.rotation_codec, "6d");
    }

    #[test]
    fn resolve_binds_codec() {
        let config = ConvertConfig::default();
        let resolved = config.resolve(&RotationCodecRegistry::default());
        assert!(resolved.is_ok());
        if let Ok(resolved) = resolved {
            assert_eq!(resolved.rotation.name(), "6d");
            assert_eq!(resolved.rotation.dim(), 6);
        }
    }

    #[test]
    fn resolve_rejects_unknown_codec() {
        let config = ConvertConfig {
            rotation_codec: "quaternion".to_string(),
            ..ConvertConfig::default()
        };
        assert!(matches!(
            config.resolve(&RotationCodecRegistry::default()),
            Err(ConvertError::UnknownRotationCodec { .. })
        ));
    }
}

//! Pipeline configuration, stored as RON.
//!
//! ```ron
//! (
//!     backend: Vulkan,
//!     asset_root: "game/assets",
//!     artifact_root: "game/artifacts",
//!     parallel_builds: true,
//!     texture_mipmaps: true,
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::backend::GraphicsBackend;
use crate::error::GraphicsError;

/// Settings for an import run. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Backend the artifacts are compiled for.
    pub backend: GraphicsBackend,
    /// Source tree, mounted as `assets`.
    pub asset_root: PathBuf,
    /// Derived output tree, mounted as `artifacts`.
    pub artifact_root: PathBuf,
    /// Compile flushed tasks on the rayon pool.
    pub parallel_builds: bool,
    /// Generate a full mip chain for compiled textures.
    pub texture_mipmaps: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backend: GraphicsBackend::Dummy,
            asset_root: PathBuf::from("assets"),
            artifact_root: PathBuf::from("artifacts"),
            parallel_builds: true,
            texture_mipmaps: true,
        }
    }
}

impl PipelineConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, GraphicsError> {
        ron::from_str(text).map_err(|e| GraphicsError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphicsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GraphicsError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_ron_str(&text)?;
        log::info!(
            "Loaded pipeline config from {} (backend: {})",
            path.display(),
            config.backend
        );
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, GraphicsError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| GraphicsError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.backend, GraphicsBackend::Dummy);
        assert_eq!(config.asset_root, PathBuf::from("assets"));
        assert_eq!(config.artifact_root, PathBuf::from("artifacts"));
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = PipelineConfig::from_ron_str("(backend: Vulkan, texture_mipmaps: false)").unwrap();
        assert_eq!(config.backend, GraphicsBackend::Vulkan);
        assert!(!config.texture_mipmaps);
        assert!(config.parallel_builds);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = PipelineConfig {
            backend: GraphicsBackend::Wgpu,
            asset_root: PathBuf::from("game/assets"),
            artifact_root: PathBuf::from("game/artifacts"),
            parallel_builds: false,
            texture_mipmaps: true,
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(PipelineConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let err = PipelineConfig::from_ron_str("(backend: Metal)").unwrap_err();
        assert!(matches!(err, GraphicsError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load("/definitely/not/here/pipeline.ron").unwrap_err();
        assert!(matches!(err, GraphicsError::Config(_)));
    }
}

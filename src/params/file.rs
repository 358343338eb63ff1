//! JSON configuration file layer.
//!
//! Every section is optional; missing sections and fields fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnimationConfig, ExportConfig, SceneObjectConfig};
use crate::error::{CurveError, Result};

/// On-disk configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub animation: AnimationConfig,
    pub object: SceneObjectConfig,
    pub export: ExportConfig,
}

impl ConfigFile {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CurveError::invalid(format!("cannot read config {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            CurveError::invalid(format!("cannot parse config {}: {}", path.display(), e))
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

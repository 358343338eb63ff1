//! Keyframe export configuration.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keyframe output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyframeFormat {
    /// Pretty-printed JSON, one entry per object
    #[default]
    Json,

    /// Flat `object,frame,x,y,z` rows
    Csv,
}

impl FromStr for KeyframeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown keyframe format '{}'", other)),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output format
    pub format: KeyframeFormat,

    /// Output file (stdout when unset)
    pub output: Option<PathBuf>,
}

impl ExportConfig {
    /// File extension matching the output format
    pub fn extension(&self) -> &'static str {
        match self.format {
            KeyframeFormat::Json => "json",
            KeyframeFormat::Csv => "csv",
        }
    }
}

//! Bounce animation timing and shape parameters.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};

/// Animation parameters shared by every stage of the curve pipeline.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Scene frame rate (frames per second)
    /// Beat onsets are quantized to this grid
    pub frame_rate: u32,

    /// Peak height of the object at each beat onset (meters)
    pub bounce_height_m: f64,

    /// Frames appended after the last beat so its bounce has somewhere to land
    pub pad_frames: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_rate: 24,
            bounce_height_m: 5.0,
            pad_frames: 30, // A bit over one second at 24 fps
        }
    }
}

impl AnimationConfig {
    /// Validate configuration (positive rate and height, non-empty final interval)
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(CurveError::invalid("frame rate must be > 0"));
        }
        if !self.bounce_height_m.is_finite() || self.bounce_height_m <= 0.0 {
            return Err(CurveError::invalid(format!(
                "bounce height must be a positive number, got {}",
                self.bounce_height_m
            )));
        }
        if self.pad_frames == 0 {
            return Err(CurveError::invalid(
                "pad frames must be > 0 so the last beat has a landing",
            ));
        }
        Ok(())
    }
}

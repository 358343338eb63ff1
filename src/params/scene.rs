//! Scene object targeting.

use serde::{Deserialize, Serialize};

/// Which scene object receives the bounce, and where it sits on the other axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneObjectConfig {
    /// Object name used for lookup-or-create in the scene
    pub object_name: String,

    /// Position the object is created at (meters, Z up)
    /// Only Z is animated; X and Y are carried into every keyframe
    pub rest_position_m: [f32; 3],
}

impl Default for SceneObjectConfig {
    fn default() -> Self {
        Self {
            object_name: "Ball".to_string(),
            rest_position_m: [0.0, 0.0, 5.0], // Starts in the air
        }
    }
}

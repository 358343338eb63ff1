//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Units (frames, frames per second, meters)
//! - Documented defaults and meanings
//! - Validation before the pipeline runs

mod animation;
mod export;
mod file;
mod scene;

// Re-export all types
pub use animation::AnimationConfig;
pub use export::{ExportConfig, KeyframeFormat};
pub use file::ConfigFile;
pub use scene::SceneObjectConfig;

//! Beatbounce library - beat-synchronized bounce animation curves

pub mod beats;
pub mod bounce;
pub mod cli;
pub mod curve;
pub mod error;
pub mod export;
pub mod params;
pub mod scene;
pub mod segment;
pub mod timeline;

pub use bounce::{BounceSampler, CurveSample};
pub use curve::BounceAnimator;
pub use error::{CurveError, Result};

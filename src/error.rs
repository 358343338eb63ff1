//! Error kinds raised while turning beats into a bounce curve.

use thiserror::Error;

/// Errors produced by the curve generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// The input cannot produce a timeline: no beats, a malformed or out-of-range onset,
    /// a zero frame rate, a non-positive bounce height, or zero `pad_frames` (the last
    /// beat would have no landing interval).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An interval with no frames reached the sampler stage.
    #[error(
        "degenerate interval [{start_frame}, {end_frame}) between beats {start_beat} and {end_beat}"
    )]
    DegenerateInterval {
        start_frame: u64,
        end_frame: u64,
        start_beat: usize,
        end_beat: usize,
    },
}

impl CurveError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result alias used throughout the curve pipeline.
pub type Result<T> = std::result::Result<T, CurveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_interval_message_has_context() {
        let err = CurveError::DegenerateInterval {
            start_frame: 48,
            end_frame: 48,
            start_beat: 3,
            end_beat: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("[48, 48)"));
        assert!(msg.contains("beats 3 and 4"));
    }
}

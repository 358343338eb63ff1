//! End-to-end bounce animation: beats in, per-frame heights out.

use anyhow::Context;

use crate::bounce::{BounceSampler, CurveSample};
use crate::error::Result;
use crate::params::AnimationConfig;
use crate::scene::SceneTarget;
use crate::segment::{segment, Segments};
use crate::timeline::BeatTimeline;

/// Timeline and intervals for one beat track, ready to be sampled
#[derive(Debug, Clone)]
pub struct BounceCurve {
    pub timeline: BeatTimeline,
    pub intervals: Segments,
}

/// High-level bounce animation system
pub struct BounceAnimator {
    sampler: BounceSampler,
}

impl BounceAnimator {
    /// Create new animator with validated parameters
    pub fn new(config: AnimationConfig) -> Result<Self> {
        Ok(Self {
            sampler: BounceSampler::new(config)?,
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        self.sampler.config()
    }

    pub fn sampler(&self) -> &BounceSampler {
        &self.sampler
    }

    /// Quantize and segment beat onsets (seconds).
    ///
    /// Every error the pipeline can raise surfaces here, before any sample exists.
    pub fn plan(&self, beat_times_s: &[f64]) -> Result<BounceCurve> {
        let config = self.sampler.config();
        let timeline = BeatTimeline::build(beat_times_s, config.frame_rate, config.pad_frames)?;
        let intervals = segment(&timeline)?;
        Ok(BounceCurve {
            timeline,
            intervals,
        })
    }

    /// Generate the full curve for a beat track
    pub fn generate(&self, beat_times_s: &[f64]) -> Result<Vec<CurveSample>> {
        let curve = self.plan(beat_times_s)?;
        let samples: Vec<CurveSample> = self.sampler.sample(&curve.intervals).collect();
        log::info!(
            "Generated {} samples for {} beats (frames {}..={})",
            samples.len(),
            curve.timeline.beats().len(),
            curve.timeline.first_frame(),
            curve.timeline.end_frame()
        );
        Ok(samples)
    }

    /// Stream the curve for a beat track into a scene object.
    ///
    /// Planning completes before the first height is pushed, so a rejected beat track
    /// leaves the scene untouched.
    ///
    /// # Returns
    /// Number of keyframes pushed
    pub fn animate<S: SceneTarget>(
        &self,
        beat_times_s: &[f64],
        scene: &mut S,
        object: &S::Handle,
    ) -> anyhow::Result<usize> {
        let curve = self.plan(beat_times_s)?;

        let mut pushed = 0;
        for sample in self.sampler.sample(&curve.intervals) {
            scene
                .set_object_height_at_frame(object, sample.frame, sample.height)
                .with_context(|| format!("Failed to set height at frame {}", sample.frame))?;
            pushed += 1;
        }

        log::info!(
            "Animated {} frames from {} beats",
            pushed,
            curve.timeline.beats().len()
        );
        Ok(pushed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use crate::scene::KeyframeScene;
    use glam::Vec3;

    #[test]
    fn test_generate_two_beats() {
        let animator = BounceAnimator::new(AnimationConfig::default()).unwrap();
        let samples = animator.generate(&[1.0, 2.0]).unwrap();

        assert_eq!(samples.first().unwrap().frame, 24);
        assert_eq!(samples.last().unwrap().frame, 78);
        assert_eq!(samples.last().unwrap().height, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = AnimationConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            BounceAnimator::new(config),
            Err(CurveError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_animate_fills_scene() {
        let animator = BounceAnimator::new(AnimationConfig::default()).unwrap();
        let mut scene = KeyframeScene::new();
        let ball = scene.object_or_insert("Ball", Vec3::new(1.0, 2.0, 5.0));

        let pushed = animator.animate(&[1.0, 2.0], &mut scene, &ball).unwrap();

        assert_eq!(pushed, 55);
        assert_eq!(scene.keyframe(&ball, 48), Some(Vec3::new(1.0, 2.0, 5.0)));
        assert_eq!(scene.keyframe(&ball, 78), Some(Vec3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_animate_leaves_scene_untouched_on_error() {
        let animator = BounceAnimator::new(AnimationConfig::default()).unwrap();
        let mut scene = KeyframeScene::new();
        let ball = scene.object_or_insert("Ball", Vec3::ZERO);

        let err = animator.animate(&[], &mut scene, &ball).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CurveError>(),
            Some(CurveError::InvalidInput(_))
        ));
        assert_eq!(scene.keyframe_count(&ball), 0);
    }
}

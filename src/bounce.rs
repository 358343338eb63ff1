//! Bounce curve sampling: one height per frame across a sequence of intervals.
//!
//! The shape inside an interval is the stylized parabola
//! `height = bounce_height * (1 - 4t(1 - t))` with `t = (frame - start) / length`.
//! It peaks at each beat, touches the ground halfway to the next beat and climbs back.
//! No velocity or restitution is carried across beats.

use crate::error::Result;
use crate::params::AnimationConfig;
use crate::segment::{Interval, Segments};

/// One `(frame, height)` pair of the animation signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub frame: u64,
    /// Height above the ground plane (meters), always in `[0, bounce_height]`
    pub height: f64,
}

/// Normalized bounce shape for `t` in `[0, 1]`, ranging over `[0, 1]`.
///
/// `1 - 4t(1 - t) = (1 - 2t)^2`, a square, so it cannot go negative; and
/// `4t(1 - t) >= 0` on `[0, 1]`, so it cannot exceed one.
pub fn bounce_shape(t: f64) -> f64 {
    1.0 - 4.0 * t * (1.0 - t)
}

/// Samples bounce curves with a fixed, validated configuration
#[derive(Debug, Clone)]
pub struct BounceSampler {
    config: AnimationConfig,
}

impl BounceSampler {
    /// Create a sampler, rejecting an invalid configuration up front
    pub fn new(config: AnimationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Height at `frame` inside `interval`.
    ///
    /// The interval start is pinned to the peak and the interval end to the ground.
    pub fn height_at(&self, interval: &Interval, frame: u64) -> f64 {
        let bounce_height = self.config.bounce_height_m;
        if frame <= interval.start_frame() {
            return bounce_height;
        }
        if frame >= interval.end_frame() {
            return 0.0;
        }
        let t = (frame - interval.start_frame()) as f64 / interval.length_frames() as f64;
        (bounce_height * bounce_shape(t)).clamp(0.0, bounce_height)
    }

    /// Lazily sample every frame of `segments` in order.
    ///
    /// Each interval contributes `[start, end)`; the end of the final interval is emitted
    /// once more as the landing sample. Calling this again yields the same sequence.
    pub fn sample<'a>(&'a self, segments: &'a Segments) -> BounceSamples<'a> {
        BounceSamples {
            sampler: self,
            intervals: &segments[..],
            end_frame: segments.end_frame(),
            interval_idx: 0,
            frame: segments.first_frame(),
            landed: false,
        }
    }
}

/// Iterator over the samples of a bounce curve
#[derive(Debug, Clone)]
pub struct BounceSamples<'a> {
    sampler: &'a BounceSampler,
    /// Non-empty and contiguous, as guaranteed by `Segments`
    intervals: &'a [Interval],
    end_frame: u64,
    interval_idx: usize,
    frame: u64,
    landed: bool,
}

impl Iterator for BounceSamples<'_> {
    type Item = CurveSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.landed {
            return None;
        }

        let interval = &self.intervals[self.interval_idx];
        if self.frame == interval.end_frame() {
            if self.interval_idx + 1 < self.intervals.len() {
                // Shared boundary: emitted as the next interval's peak
                self.interval_idx += 1;
            } else {
                self.landed = true;
                return Some(CurveSample {
                    frame: self.frame,
                    height: 0.0,
                });
            }
        }

        let interval = &self.intervals[self.interval_idx];
        let sample = CurveSample {
            frame: self.frame,
            height: self.sampler.height_at(interval, self.frame),
        };
        self.frame += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.landed {
            0
        } else {
            (self.end_frame - self.frame + 1) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BounceSamples<'_> {}

//! Beat timeline construction: quantizes beat onsets to the frame grid.

use crate::error::{CurveError, Result};

/// Whether an event came from the beat track or was appended to close the last interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatKind {
    Real,
    Sentinel,
}

/// A beat onset quantized to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatEvent {
    /// Position of the beat in the raw beat list
    pub index: usize,
    pub frame: u64,
    pub kind: BeatKind,
}

impl BeatEvent {
    pub fn is_real(&self) -> bool {
        self.kind == BeatKind::Real
    }
}

/// Frame-quantized beats in strictly increasing frame order, closed by a sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatTimeline {
    events: Vec<BeatEvent>,
    sentinel: BeatEvent,
}

impl BeatTimeline {
    /// Build a timeline from beat onsets (seconds from track start).
    ///
    /// Each onset lands on `round(t * frame_rate)`, rounding half away from zero.
    /// Onsets that quantize onto an already occupied frame are dropped, keeping the
    /// first one. A sentinel is placed `pad_frames` after the last real beat.
    ///
    /// # Errors
    /// `InvalidInput` when there are no beats, the frame rate or padding is zero, or an
    /// onset is negative, non-finite, earlier than the one before it, or lands past
    /// [`MAX_FRAME`].
    pub fn build(beat_times_s: &[f64], frame_rate: u32, pad_frames: u32) -> Result<Self> {
        if beat_times_s.is_empty() {
            return Err(CurveError::invalid("beat sequence is empty"));
        }
        if frame_rate == 0 {
            return Err(CurveError::invalid("frame rate must be > 0"));
        }
        if pad_frames == 0 {
            return Err(CurveError::invalid(
                "pad frames must be > 0 so the last beat has a landing",
            ));
        }

        let mut events: Vec<BeatEvent> = Vec::with_capacity(beat_times_s.len());
        let mut previous_s = 0.0_f64;

        for (index, &time_s) in beat_times_s.iter().enumerate() {
            if !time_s.is_finite() || time_s < 0.0 {
                return Err(CurveError::invalid(format!(
                    "beat {} has invalid time {}",
                    index, time_s
                )));
            }
            if time_s < previous_s {
                return Err(CurveError::invalid(format!(
                    "beat {} at {}s comes before beat {} at {}s",
                    index,
                    time_s,
                    index - 1,
                    previous_s
                )));
            }
            previous_s = time_s;

            let frame = quantize(time_s, frame_rate).ok_or_else(|| {
                CurveError::invalid(format!(
                    "beat {} at {}s lies beyond frame {} at {} fps",
                    index, time_s, MAX_FRAME, frame_rate
                ))
            })?;
            match events.last() {
                Some(last) if last.frame == frame => {
                    log::debug!(
                        "Beat {} collapses into beat {} at frame {}",
                        index,
                        last.index,
                        frame
                    );
                }
                _ => events.push(BeatEvent {
                    index,
                    frame,
                    kind: BeatKind::Real,
                }),
            }
        }

        let last_frame = events.last().map_or(0, |e| e.frame);
        let sentinel_frame = last_frame
            .checked_add(u64::from(pad_frames))
            .filter(|&frame| frame <= MAX_FRAME)
            .ok_or_else(|| {
                CurveError::invalid(format!(
                    "padding {} frames after frame {} passes frame {}",
                    pad_frames, last_frame, MAX_FRAME
                ))
            })?;
        let sentinel = BeatEvent {
            index: beat_times_s.len(),
            frame: sentinel_frame,
            kind: BeatKind::Sentinel,
        };

        log::debug!(
            "Timeline: {} beats ({} collapsed), frames {}..={}",
            events.len(),
            beat_times_s.len() - events.len(),
            events[0].frame,
            sentinel.frame
        );

        Ok(Self { events, sentinel })
    }

    /// Real beat events, without the sentinel
    pub fn beats(&self) -> &[BeatEvent] {
        &self.events
    }

    pub fn sentinel(&self) -> BeatEvent {
        self.sentinel
    }

    /// Real events followed by the sentinel
    pub fn events(&self) -> impl Iterator<Item = &BeatEvent> + '_ {
        self.events.iter().chain(std::iter::once(&self.sentinel))
    }

    pub fn first_frame(&self) -> u64 {
        self.events[0].frame
    }

    /// Frame of the sentinel, where the animation lands for the last time
    pub fn end_frame(&self) -> u64 {
        self.sentinel.frame
    }
}

/// Largest frame a timeline may use; every frame up to it is exact in `f64`
pub const MAX_FRAME: u64 = 1 << 53;

/// Map a time in seconds onto the frame grid (round half away from zero).
///
/// Returns `None` for negative or non-finite times and for frames past [`MAX_FRAME`].
pub fn quantize(time_s: f64, frame_rate: u32) -> Option<u64> {
    let frame = (time_s * frame_rate as f64).round();
    if !frame.is_finite() || frame < 0.0 || frame > MAX_FRAME as f64 {
        return None;
    }
    Some(frame as u64)
}

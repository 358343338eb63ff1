//! Splits a beat timeline into half-open frame intervals.

use std::ops::Deref;

use crate::error::{CurveError, Result};
use crate::timeline::BeatTimeline;

/// Half-open frame range `[start_frame, end_frame)` between two consecutive beats.
///
/// Always at least one frame long; construction rejects anything shorter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start_frame: u64,
    end_frame: u64,
    start_beat: usize,
    end_beat: usize,
}

impl Interval {
    /// Create an interval between two beats
    ///
    /// # Errors
    /// `DegenerateInterval` when `end_frame <= start_frame`.
    pub fn new(
        start_frame: u64,
        end_frame: u64,
        start_beat: usize,
        end_beat: usize,
    ) -> Result<Self> {
        if end_frame <= start_frame {
            return Err(CurveError::DegenerateInterval {
                start_frame,
                end_frame,
                start_beat,
                end_beat,
            });
        }
        Ok(Self {
            start_frame,
            end_frame,
            start_beat,
            end_beat,
        })
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    pub fn end_frame(&self) -> u64 {
        self.end_frame
    }

    pub fn length_frames(&self) -> u64 {
        self.end_frame - self.start_frame
    }

    /// Beat indices that open and close this interval
    pub fn beats(&self) -> (usize, usize) {
        (self.start_beat, self.end_beat)
    }
}

/// Non-empty run of intervals, each starting where the previous one ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments(Vec<Interval>);

impl Segments {
    /// Check that `intervals` form one unbroken span.
    ///
    /// # Errors
    /// `InvalidInput` for an empty list. `DegenerateInterval` naming the ill-formed
    /// span between two neighbours that leave a gap, overlap or run backwards.
    pub fn new(intervals: Vec<Interval>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(CurveError::invalid("no intervals to sample"));
        }
        for pair in intervals.windows(2) {
            if pair[0].end_frame != pair[1].start_frame {
                return Err(CurveError::DegenerateInterval {
                    start_frame: pair[0].end_frame,
                    end_frame: pair[1].start_frame,
                    start_beat: pair[0].end_beat,
                    end_beat: pair[1].start_beat,
                });
            }
        }
        Ok(Self(intervals))
    }

    pub fn first_frame(&self) -> u64 {
        self.0[0].start_frame
    }

    /// End of the last interval, where the curve lands
    pub fn end_frame(&self) -> u64 {
        self.0[self.0.len() - 1].end_frame
    }
}

impl Deref for Segments {
    type Target = [Interval];

    fn deref(&self) -> &[Interval] {
        &self.0
    }
}

/// Produce one interval per adjacent event pair, the sentinel included.
///
/// The intervals partition `[first beat frame, sentinel frame]` without gaps or overlaps.
pub fn segment(timeline: &BeatTimeline) -> Result<Segments> {
    let events: Vec<_> = timeline.events().collect();
    let intervals = events
        .windows(2)
        .map(|pair| Interval::new(pair[0].frame, pair[1].frame, pair[0].index, pair[1].index))
        .collect::<Result<Vec<_>>>()
        .and_then(Segments::new)?;

    log::debug!(
        "Segmented {} intervals over frames {}..{}",
        intervals.len(),
        timeline.first_frame(),
        timeline.end_frame()
    );
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_beat_gets_padded_interval() {
        let timeline = BeatTimeline::build(&[100.0 / 24.0], 24, 30).unwrap();
        let intervals = segment(&timeline).unwrap();

        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start_frame(), 100);
        assert_eq!(intervals[0].end_frame(), 130);
        assert_eq!(intervals[0].length_frames(), 30);
    }

    #[test]
    fn test_two_beats_two_intervals() {
        let timeline = BeatTimeline::build(&[1.0, 2.0], 24, 30).unwrap();
        let intervals = segment(&timeline).unwrap();

        assert_eq!(intervals.len(), 2);
        assert_eq!((intervals[0].start_frame(), intervals[0].end_frame()), (24, 48));
        assert_eq!(intervals[0].length_frames(), 24);
        assert_eq!((intervals[1].start_frame(), intervals[1].end_frame()), (48, 78));
        assert_eq!(intervals[1].beats(), (1, 2));
    }

    #[test]
    fn test_intervals_partition_timeline() {
        let times = [0.2, 0.7, 0.75, 1.3, 2.9, 3.0];
        let timeline = BeatTimeline::build(&times, 30, 12).unwrap();
        let intervals = segment(&timeline).unwrap();

        assert_eq!(intervals.first().unwrap().start_frame(), timeline.first_frame());
        assert_eq!(intervals.last().unwrap().end_frame(), timeline.end_frame());
        for pair in intervals.windows(2) {
            assert_eq!(pair[0].end_frame(), pair[1].start_frame());
        }
        let total: u64 = intervals.iter().map(Interval::length_frames).sum();
        assert_eq!(total, timeline.end_frame() - timeline.first_frame());
    }

    #[test]
    fn test_zero_length_interval_is_degenerate() {
        let err = Interval::new(48, 48, 2, 3).unwrap_err();
        assert_eq!(
            err,
            CurveError::DegenerateInterval {
                start_frame: 48,
                end_frame: 48,
                start_beat: 2,
                end_beat: 3,
            }
        );
        assert!(Interval::new(50, 40, 0, 1).is_err());
    }

    #[test]
    fn test_segments_reject_empty_list() {
        assert!(matches!(
            Segments::new(Vec::new()),
            Err(CurveError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_segments_reject_unordered_intervals() {
        let late = Interval::new(20, 30, 2, 3).unwrap();
        let early = Interval::new(0, 10, 0, 1).unwrap();

        assert_eq!(
            Segments::new(vec![late, early]).unwrap_err(),
            CurveError::DegenerateInterval {
                start_frame: 30,
                end_frame: 0,
                start_beat: 3,
                end_beat: 0,
            }
        );
    }

    #[test]
    fn test_segments_reject_gaps_and_overlaps() {
        let first = Interval::new(0, 10, 0, 1).unwrap();
        let after_gap = Interval::new(12, 20, 2, 3).unwrap();
        let overlapping = Interval::new(5, 20, 1, 2).unwrap();

        assert!(Segments::new(vec![first, after_gap]).is_err());
        assert!(Segments::new(vec![first, overlapping]).is_err());
    }

    #[test]
    fn test_segments_accept_contiguous_intervals() {
        let segments = Segments::new(vec![
            Interval::new(0, 10, 0, 1).unwrap(),
            Interval::new(10, 25, 1, 2).unwrap(),
        ])
        .unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments.first_frame(), 0);
        assert_eq!(segments.end_frame(), 25);
    }
}

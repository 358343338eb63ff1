//! Beat sources feeding the curve generator.
//!
//! Beat detection itself happens elsewhere; these sources only hand over onset times
//! in seconds, non-decreasing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CurveError, Result};

/// Beat onsets for one track
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeatTrack {
    /// Estimated tempo, when the detector reports one
    pub tempo_bpm: Option<f64>,
    /// Beat onsets in seconds from track start
    pub beat_times_s: Vec<f64>,
}

/// Anything that can supply beat onsets
pub trait BeatSource {
    fn detect_beats(&self) -> Result<BeatTrack>;
}

impl BeatSource for [f64] {
    fn detect_beats(&self) -> Result<BeatTrack> {
        Ok(BeatTrack {
            tempo_bpm: None,
            beat_times_s: self.to_vec(),
        })
    }
}

/// JSON layouts accepted in a beat file
#[derive(Deserialize)]
#[serde(untagged)]
enum BeatFileContent {
    Times(Vec<f64>),
    Track {
        #[serde(default)]
        tempo: Option<f64>,
        beats: Vec<f64>,
    },
}

/// Beat onsets exported by an external detector.
///
/// Accepts a JSON array of seconds, a JSON object `{ "tempo": 120.0, "beats": [...] }`,
/// or plain text with one time per line (`#` starts a comment).
#[derive(Debug, Clone)]
pub struct BeatFile {
    path: PathBuf,
}

impl BeatFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse beat file contents
    pub fn parse(content: &str) -> Result<BeatTrack> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            let parsed: BeatFileContent = serde_json::from_str(trimmed)
                .map_err(|e| CurveError::invalid(format!("malformed beat JSON: {}", e)))?;
            return Ok(match parsed {
                BeatFileContent::Times(beat_times_s) => BeatTrack {
                    tempo_bpm: None,
                    beat_times_s,
                },
                BeatFileContent::Track { tempo, beats } => BeatTrack {
                    tempo_bpm: tempo,
                    beat_times_s: beats,
                },
            });
        }

        let mut beat_times_s = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let time_s: f64 = line.parse().map_err(|_| {
                CurveError::invalid(format!("line {}: '{}' is not a time", line_no + 1, line))
            })?;
            beat_times_s.push(time_s);
        }
        Ok(BeatTrack {
            tempo_bpm: None,
            beat_times_s,
        })
    }
}

impl BeatSource for BeatFile {
    fn detect_beats(&self) -> Result<BeatTrack> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            CurveError::invalid(format!(
                "cannot read beat file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let track = Self::parse(&content)?;
        log::info!(
            "Loaded {} beats from {}",
            track.beat_times_s.len(),
            self.path.display()
        );
        Ok(track)
    }
}

/// Most beats a [`TempoGrid`] will lay out; ten hours at 1000 BPM fits
pub const MAX_GRID_BEATS: u64 = 1_000_000;

/// Steady beat grid derived from a tempo
#[derive(Debug, Clone)]
pub struct TempoGrid {
    /// Tempo (beats per minute)
    pub bpm: f64,

    /// Time of the first beat (seconds)
    pub first_beat_s: f64,

    /// Track length (seconds); beats at or past the end are dropped
    pub duration_s: f64,
}

impl BeatSource for TempoGrid {
    fn detect_beats(&self) -> Result<BeatTrack> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(CurveError::invalid(format!(
                "tempo must be positive, got {} BPM",
                self.bpm
            )));
        }
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(CurveError::invalid(format!(
                "duration must be positive, got {}s",
                self.duration_s
            )));
        }
        if !self.first_beat_s.is_finite() || self.first_beat_s < 0.0 {
            return Err(CurveError::invalid(format!(
                "first beat must be at or after 0s, got {}s",
                self.first_beat_s
            )));
        }

        let beat_interval_s = 60.0 / self.bpm;
        let span_beats = ((self.duration_s - self.first_beat_s) / beat_interval_s).ceil();
        if span_beats > MAX_GRID_BEATS as f64 {
            return Err(CurveError::invalid(format!(
                "{} BPM over {}s needs more than {} beats",
                self.bpm, self.duration_s, MAX_GRID_BEATS
            )));
        }

        let beat_times_s: Vec<f64> = (0u64..)
            .map(|i| self.first_beat_s + i as f64 * beat_interval_s)
            .take_while(|&t| t < self.duration_s)
            .collect();

        log::debug!(
            "Tempo grid: {} beats at {:.2} BPM",
            beat_times_s.len(),
            self.bpm
        );
        Ok(BeatTrack {
            tempo_bpm: Some(self.bpm),
            beat_times_s,
        })
    }
}

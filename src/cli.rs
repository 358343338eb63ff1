//! Command-line argument parsing.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use crate::beats::{BeatFile, BeatSource, TempoGrid};
use crate::params::{ConfigFile, KeyframeFormat};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "beatbounce")]
#[command(about = "Keyframe an object bouncing in time with a beat track", long_about = None)]
pub struct Args {
    /// Beat onsets file (JSON array, JSON {tempo, beats}, or one time per line)
    #[arg(long, value_name = "FILE", conflicts_with = "bpm")]
    pub beats: Option<PathBuf>,

    /// Generate a steady beat grid at this tempo instead of reading a file
    #[arg(long, value_name = "BPM", requires = "duration")]
    pub bpm: Option<f64>,

    /// Track length for the tempo grid (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// First beat of the tempo grid (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "0")]
    pub first_beat: f64,

    /// JSON config file (CLI flags override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Frame rate (frames per second)
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Peak bounce height (meters)
    #[arg(long, value_name = "METERS")]
    pub height: Option<f64>,

    /// Frames after the last beat before the final landing
    #[arg(long, value_name = "FRAMES")]
    pub pad_frames: Option<u32>,

    /// Scene object to animate
    #[arg(long, value_name = "NAME")]
    pub object: Option<String>,

    /// Output format: json (default), csv
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write height rows while sampling instead of building a scene first
    #[arg(long)]
    pub stream: bool,
}

impl Args {
    /// Assemble configuration: defaults, then config file, then flags
    pub fn build_config(&self) -> anyhow::Result<ConfigFile> {
        let mut config = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        if let Some(fps) = self.fps {
            config.animation.frame_rate = fps;
        }
        if let Some(height) = self.height {
            config.animation.bounce_height_m = height;
        }
        if let Some(pad_frames) = self.pad_frames {
            config.animation.pad_frames = pad_frames;
        }
        if let Some(name) = &self.object {
            config.object.object_name = name.clone();
        }
        if let Some(format) = &self.format {
            config.export.format = self.parse_format(format);
        }
        if let Some(output) = &self.output {
            config.export.output = Some(output.clone());
        }

        Ok(config)
    }

    /// Parse output format, falling back to JSON
    fn parse_format(&self, format: &str) -> KeyframeFormat {
        match format.parse() {
            Ok(format) => format,
            Err(e) => {
                log::warn!("{}, using json", e);
                KeyframeFormat::Json
            }
        }
    }

    /// Pick the beat source named on the command line
    pub fn beat_source(&self) -> anyhow::Result<Box<dyn BeatSource>> {
        if let Some(path) = &self.beats {
            return Ok(Box::new(BeatFile::new(path)));
        }
        match (self.bpm, self.duration) {
            (Some(bpm), Some(duration_s)) => {
                log::info!("Beats: {} BPM grid over {}s", bpm, duration_s);
                Ok(Box::new(TempoGrid {
                    bpm,
                    first_beat_s: self.first_beat,
                    duration_s,
                }))
            }
            _ => bail!("No beats given: pass --beats FILE or --bpm BPM --duration SECONDS"),
        }
    }
}

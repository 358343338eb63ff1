//! Beatbounce - keyframe an object bouncing in time with music
//!
//! Reads beat onsets, quantizes them to the scene frame rate and writes one
//! height keyframe per frame: peak on every beat, ground contact in between.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use glam::Vec3;

use beatbounce::cli::Args;
use beatbounce::curve::BounceAnimator;
use beatbounce::export::write_scene;
use beatbounce::params::{ConfigFile, KeyframeFormat};
use beatbounce::scene::{CsvKeyframeWriter, KeyframeScene};

fn open_output(config: &ConfigFile) -> anyhow::Result<Box<dyn Write>> {
    let Some(path) = &config.export.output else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };

    if path.extension().and_then(|e| e.to_str()) != Some(config.export.extension()) {
        log::warn!(
            "{} does not end in .{}",
            path.display(),
            config.export.extension()
        );
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.build_config()?;
    let animator = BounceAnimator::new(config.animation.clone())?;

    let track = args.beat_source()?.detect_beats()?;
    if let Some(tempo) = track.tempo_bpm {
        log::info!("Tempo: {:.2} BPM", tempo);
    }

    let output = open_output(&config)?;

    if args.stream {
        if config.export.format != KeyframeFormat::Csv {
            log::warn!("Streaming always writes CSV height rows");
        }
        let mut writer = CsvKeyframeWriter::new(output);
        animator.animate(
            &track.beat_times_s,
            &mut writer,
            &config.object.object_name,
        )?;
        writer.finish()?;
    } else {
        let mut scene = KeyframeScene::new();
        let object = scene.object_or_insert(
            &config.object.object_name,
            Vec3::from_array(config.object.rest_position_m),
        );
        animator.animate(&track.beat_times_s, &mut scene, &object)?;
        write_scene(&scene, config.export.format, output)?;
    }

    if let Some(path) = &config.export.output {
        log::info!("Keyframes written to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

//! Keyframe export for scenes built in memory.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::params::KeyframeFormat;
use crate::scene::{csv_field, KeyframeScene, SceneObject};

#[derive(Serialize)]
struct ExportedKeyframe {
    frame: u64,
    position: [f32; 3],
}

#[derive(Serialize)]
struct ExportedObject<'a> {
    name: &'a str,
    rest_position: [f32; 3],
    keyframes: Vec<ExportedKeyframe>,
}

impl<'a> From<&'a SceneObject> for ExportedObject<'a> {
    fn from(object: &'a SceneObject) -> Self {
        Self {
            name: &object.name,
            rest_position: object.rest_position.to_array(),
            keyframes: object
                .keyframes
                .iter()
                .map(|(&frame, position)| ExportedKeyframe {
                    frame,
                    position: position.to_array(),
                })
                .collect(),
        }
    }
}

/// Write every object's keyframes in the requested format
pub fn write_scene<W: Write>(
    scene: &KeyframeScene,
    format: KeyframeFormat,
    mut writer: W,
) -> anyhow::Result<()> {
    match format {
        KeyframeFormat::Json => {
            let objects: Vec<ExportedObject> =
                scene.objects().iter().map(ExportedObject::from).collect();
            serde_json::to_writer_pretty(&mut writer, &objects)
                .context("Failed to serialize keyframes")?;
            writeln!(writer)?;
        }
        KeyframeFormat::Csv => {
            writeln!(writer, "object,frame,x,y,z")?;
            for object in scene.objects() {
                for (frame, pos) in &object.keyframes {
                    writeln!(
                        writer,
                        "{},{},{},{},{}",
                        csv_field(&object.name),
                        frame,
                        pos.x,
                        pos.y,
                        pos.z
                    )?;
                }
            }
        }
    }
    writer.flush().context("Failed to flush keyframe output")?;
    Ok(())
}

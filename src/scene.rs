//! Scene collaborators that receive bounce heights.
//!
//! The curve generator only pushes `(frame, height)` pairs in increasing frame order.
//! Object creation and lookup belong to the scene.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{bail, Context};
use glam::Vec3;

/// A scene that can keyframe an object's height (the Z axis)
pub trait SceneTarget {
    /// Opaque reference to a scene object
    type Handle;

    fn set_object_height_at_frame(
        &mut self,
        object: &Self::Handle,
        frame: u64,
        height: f64,
    ) -> anyhow::Result<()>;
}

/// Handle into a [`KeyframeScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Scene object with location keyframes
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    /// Location before any keyframe applies (meters)
    pub rest_position: Vec3,
    /// Location keyframes by frame
    pub keyframes: BTreeMap<u64, Vec3>,
}

/// In-memory scene holding named objects and their location keyframes
#[derive(Debug, Clone, Default)]
pub struct KeyframeScene {
    objects: Vec<SceneObject>,
}

impl KeyframeScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look an object up by name
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Look an object up by name, creating it at `rest_position` if missing
    pub fn object_or_insert(&mut self, name: &str, rest_position: Vec3) -> ObjectId {
        if let Some(id) = self.find(name) {
            return id;
        }
        log::debug!("Creating scene object '{}' at {}", name, rest_position);
        self.objects.push(SceneObject {
            name: name.to_string(),
            rest_position,
            keyframes: BTreeMap::new(),
        });
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Keyframed location at exactly `frame`
    pub fn keyframe(&self, id: &ObjectId, frame: u64) -> Option<Vec3> {
        self.object(id)
            .and_then(|o| o.keyframes.get(&frame))
            .copied()
    }

    pub fn keyframe_count(&self, id: &ObjectId) -> usize {
        self.object(id).map_or(0, |o| o.keyframes.len())
    }
}

impl SceneTarget for KeyframeScene {
    type Handle = ObjectId;

    fn set_object_height_at_frame(
        &mut self,
        object: &ObjectId,
        frame: u64,
        height: f64,
    ) -> anyhow::Result<()> {
        let Some(target) = self.objects.get_mut(object.0) else {
            bail!("No scene object with id {}", object.0);
        };

        // Later frames inherit the other axes from the latest keyframe
        let base = target
            .keyframes
            .range(..frame)
            .next_back()
            .map_or(target.rest_position, |(_, pos)| *pos);
        target
            .keyframes
            .insert(frame, Vec3::new(base.x, base.y, height as f32));
        Ok(())
    }
}

/// Quote a CSV field when it holds a separator, a quote or a line break
pub(crate) fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Streams `object,frame,height` rows as heights arrive
pub struct CsvKeyframeWriter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> CsvKeyframeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> anyhow::Result<W> {
        self.writer.flush().context("Failed to flush keyframe output")?;
        Ok(self.writer)
    }
}

impl<W: Write> SceneTarget for CsvKeyframeWriter<W> {
    type Handle = String;

    fn set_object_height_at_frame(
        &mut self,
        object: &String,
        frame: u64,
        height: f64,
    ) -> anyhow::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "object,frame,height")?;
            self.header_written = true;
        }
        writeln!(self.writer, "{},{},{}", csv_field(object), frame, height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_or_insert_reuses_existing() {
        let mut scene = KeyframeScene::new();
        let a = scene.object_or_insert("Ball", Vec3::new(0.0, 0.0, 5.0));
        let b = scene.object_or_insert("Ball", Vec3::ZERO);
        let c = scene.object_or_insert("Ground", Vec3::ZERO);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(scene.objects().len(), 2);
        assert_eq!(scene.object(&a).unwrap().rest_position.z, 5.0);
    }

    #[test]
    fn test_height_keyframes_keep_other_axes() {
        let mut scene = KeyframeScene::new();
        let ball = scene.object_or_insert("Ball", Vec3::new(3.0, -1.0, 5.0));

        scene.set_object_height_at_frame(&ball, 10, 2.5).unwrap();
        scene.set_object_height_at_frame(&ball, 11, 0.0).unwrap();

        assert_eq!(scene.keyframe(&ball, 10), Some(Vec3::new(3.0, -1.0, 2.5)));
        assert_eq!(scene.keyframe(&ball, 11), Some(Vec3::new(3.0, -1.0, 0.0)));
        assert_eq!(scene.keyframe(&ball, 12), None);
    }

    #[test]
    fn test_unknown_object_is_an_error() {
        let mut scene = KeyframeScene::new();
        let ball = scene.object_or_insert("Ball", Vec3::ZERO);
        let mut other = KeyframeScene::new();

        assert!(other.set_object_height_at_frame(&ball, 0, 1.0).is_err());
    }

    #[test]
    fn test_csv_writer_rows() {
        let mut writer = CsvKeyframeWriter::new(Vec::new());
        let ball = "Ball".to_string();
        writer.set_object_height_at_frame(&ball, 24, 5.0).unwrap();
        writer.set_object_height_at_frame(&ball, 25, 4.5).unwrap();

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "object,frame,height\nBall,24,5\nBall,25,4.5\n");
    }

    #[test]
    fn test_csv_field_quotes_special_names() {
        assert_eq!(csv_field("Ball"), "Ball");
        assert_eq!(csv_field("Ball, big"), "\"Ball, big\"");
        assert_eq!(csv_field("Ball \"7\""), "\"Ball \"\"7\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_writer_quotes_object_name() {
        let mut writer = CsvKeyframeWriter::new(Vec::new());
        let ball = "Ball, \"big\"".to_string();
        writer.set_object_height_at_frame(&ball, 24, 5.0).unwrap();

        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "object,frame,height\n\"Ball, \"\"big\"\"\",24,5\n");
    }
}

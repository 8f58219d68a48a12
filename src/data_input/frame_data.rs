// src/data_input/frame_data.rs

use glam::DVec3;

use crate::constants::{
    COL_APPARATUS_ANGLE, COL_LEFT_EYE_ORIGIN, COL_LEFT_GAZE_DIRECTION, COL_RIGHT_EYE_ORIGIN,
    COL_RIGHT_GAZE_DIRECTION, COL_ROD_ANGLE, FRAME_FIELD_COUNT,
};
use crate::data_analysis::ray_intersection::Ray;

/// One parsed row of a session recording.
///
/// The raw fields are kept in source column order; the named view is
/// populated once at parse time so nothing downstream indexes by column.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    fields: Box<[f64]>,
    apparatus_angle: f64,          // Rotating frame orientation (degrees).
    rod_angle: f64,                // Rod orientation set by the participant (degrees).
    left_eye_origin: DVec3,        // World-space left eye position.
    right_eye_origin: DVec3,       // World-space right eye position.
    left_gaze_direction: DVec3,    // Left eye look direction, roughly in [-1, 1].
    right_gaze_direction: DVec3,   // Right eye look direction, roughly in [-1, 1].
}

fn vec3_at(fields: &[f64], start: usize) -> DVec3 {
    DVec3::new(fields[start], fields[start + 1], fields[start + 2])
}

impl Frame {
    /// Builds a frame from parsed fields.
    ///
    /// Returns `None` when fewer than `FRAME_FIELD_COUNT` fields are present.
    pub fn from_fields(fields: Vec<f64>) -> Option<Self> {
        if fields.len() < FRAME_FIELD_COUNT {
            return None;
        }
        Some(Self {
            apparatus_angle: fields[COL_APPARATUS_ANGLE],
            rod_angle: fields[COL_ROD_ANGLE],
            left_eye_origin: vec3_at(&fields, COL_LEFT_EYE_ORIGIN),
            right_eye_origin: vec3_at(&fields, COL_RIGHT_EYE_ORIGIN),
            left_gaze_direction: vec3_at(&fields, COL_LEFT_GAZE_DIRECTION),
            right_gaze_direction: vec3_at(&fields, COL_RIGHT_GAZE_DIRECTION),
            fields: fields.into_boxed_slice(),
        })
    }

    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn apparatus_angle(&self) -> f64 {
        self.apparatus_angle
    }

    pub fn rod_angle(&self) -> f64 {
        self.rod_angle
    }

    pub fn left_eye_origin(&self) -> DVec3 {
        self.left_eye_origin
    }

    pub fn right_eye_origin(&self) -> DVec3 {
        self.right_eye_origin
    }

    pub fn left_gaze_direction(&self) -> DVec3 {
        self.left_gaze_direction
    }

    pub fn right_gaze_direction(&self) -> DVec3 {
        self.right_gaze_direction
    }

    /// Mean eye height of the two origins.
    pub fn eye_height(&self) -> f64 {
        (self.left_eye_origin.y + self.right_eye_origin.y) / 2.0
    }

    pub fn left_ray(&self) -> Ray {
        Ray::new(self.left_eye_origin, self.left_gaze_direction)
    }

    pub fn right_ray(&self) -> Ray {
        Ray::new(self.right_eye_origin, self.right_gaze_direction)
    }
}

/// An ordered, 0-indexed sequence of frames from one recording.
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Vec<String>,
    frames: Vec<Frame>,
}

impl Dataset {
    pub(crate) fn new(header: Vec<String>, frames: Vec<Frame>) -> Self {
        Self { header, frames }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn first(&self) -> Option<&Frame> {
        self.frames.first()
    }
}

impl std::ops::Index<usize> for Dataset {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.frames[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Vec<f64> {
        (0..FRAME_FIELD_COUNT).map(|i| i as f64).collect()
    }

    #[test]
    fn test_named_view_matches_columns() {
        let frame = Frame::from_fields(sample_fields()).unwrap();
        assert_eq!(frame.apparatus_angle(), 0.0);
        assert_eq!(frame.rod_angle(), 1.0);
        assert_eq!(frame.left_eye_origin(), DVec3::new(7.0, 8.0, 9.0));
        assert_eq!(frame.right_eye_origin(), DVec3::new(10.0, 11.0, 12.0));
        assert_eq!(frame.left_gaze_direction(), DVec3::new(13.0, 14.0, 15.0));
        assert_eq!(frame.right_gaze_direction(), DVec3::new(16.0, 17.0, 18.0));
        assert_eq!(frame.eye_height(), 9.5);
    }

    #[test]
    fn test_extra_columns_are_kept() {
        let mut fields = sample_fields();
        fields.push(99.0);
        let frame = Frame::from_fields(fields).unwrap();
        assert_eq!(frame.field_count(), FRAME_FIELD_COUNT + 1);
        assert_eq!(frame.fields()[FRAME_FIELD_COUNT], 99.0);
    }

    #[test]
    fn test_short_row_rejected() {
        let fields = vec![0.0; FRAME_FIELD_COUNT - 1];
        assert!(Frame::from_fields(fields).is_none());
    }
}

// src/data_input/test_fixtures.rs
// Synthetic frames for unit tests.

use glam::DVec3;

use crate::constants::{
    COL_APPARATUS_ANGLE, COL_LEFT_EYE_ORIGIN, COL_LEFT_GAZE_DIRECTION, COL_RIGHT_EYE_ORIGIN,
    COL_RIGHT_GAZE_DIRECTION, COL_ROD_ANGLE, FRAME_FIELD_COUNT,
};
use crate::data_input::frame_data::{Dataset, Frame};

pub(crate) const LEFT_EYE: DVec3 = DVec3::new(-0.032, 1.52, 0.0);
pub(crate) const RIGHT_EYE: DVec3 = DVec3::new(0.032, 1.52, 0.0);

pub(crate) fn frame(
    apparatus_angle: f64,
    rod_angle: f64,
    left_gaze: DVec3,
    right_gaze: DVec3,
) -> Frame {
    let mut fields = vec![0.0; FRAME_FIELD_COUNT];
    fields[COL_APPARATUS_ANGLE] = apparatus_angle;
    fields[COL_ROD_ANGLE] = rod_angle;
    for (start, v) in [
        (COL_LEFT_EYE_ORIGIN, LEFT_EYE),
        (COL_RIGHT_EYE_ORIGIN, RIGHT_EYE),
        (COL_LEFT_GAZE_DIRECTION, left_gaze),
        (COL_RIGHT_GAZE_DIRECTION, right_gaze),
    ] {
        fields[start] = v.x;
        fields[start + 1] = v.y;
        fields[start + 2] = v.z;
    }
    Frame::from_fields(fields).expect("fixture has full width")
}

pub(crate) fn dataset(frames: Vec<Frame>) -> Dataset {
    let header = (0..FRAME_FIELD_COUNT).map(|i| format!("c{i}")).collect();
    Dataset::new(header, frames)
}

/// One frame per angle, both eyes looking at the grid center.
pub(crate) fn dataset_with_angles(angles: &[f64]) -> Dataset {
    let forward = DVec3::new(0.0, 0.0, 1.0);
    dataset(
        angles
            .iter()
            .enumerate()
            .map(|(i, &angle)| frame(angle, i as f64, forward, forward))
            .collect(),
    )
}

/// One frame per gaze sample, same sample for both eyes.
pub(crate) fn dataset_with_gaze(samples: &[(f64, f64)]) -> Dataset {
    dataset(
        samples
            .iter()
            .map(|&(x, y)| {
                let gaze = DVec3::new(x, y, 1.0);
                frame(0.0, 0.0, gaze, gaze)
            })
            .collect(),
    )
}

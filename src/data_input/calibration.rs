// src/data_input/calibration.rs

use tracing::{info, warn};

use crate::data_input::frame_data::Dataset;

/// Where the head height estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationSource {
    /// The requested rows were all available.
    Sampled { start_row: usize, rows: usize },
    /// The session was shorter than the requested sample point; the window
    /// was slid back to end at the last row.
    Clamped { start_row: usize, rows: usize },
}

/// Estimated participant head height.
///
/// The rig positions the rod relative to the participant's head, and the
/// only estimate of head position in a recording is the eye origin height,
/// which stays nearly constant across a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadCalibration {
    pub head_height: f64,
    pub source: CalibrationSource,
}

impl HeadCalibration {
    /// Averages the eye height over `window` rows starting at `sample_row`.
    ///
    /// `window` is treated as at least one row. Datasets are never empty, so
    /// a clamped window always has at least one row to sample.
    pub fn from_dataset(dataset: &Dataset, sample_row: usize, window: usize) -> Self {
        let len = dataset.len();
        let requested = window.max(1);
        let clamped = sample_row.saturating_add(requested) > len;
        let window = requested.min(len);
        let start_row = if clamped { len - window } else { sample_row };
        let rows = &dataset.frames()[start_row..start_row + window];

        let head_height = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|f| f.eye_height()).sum::<f64>() / rows.len() as f64
        };

        let source = if clamped {
            warn!(
                requested_row = sample_row,
                frames = len,
                start_row,
                "session shorter than calibration sample point, sampling last rows instead"
            );
            CalibrationSource::Clamped { start_row, rows: rows.len() }
        } else {
            CalibrationSource::Sampled { start_row, rows: rows.len() }
        };
        info!(head_height, "head height calibrated");

        Self { head_height, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FRAME_FIELD_COUNT;
    use crate::data_input::frame_data::Frame;

    fn dataset_with_heights(heights: &[(f64, f64)]) -> Dataset {
        let frames = heights
            .iter()
            .map(|&(left_y, right_y)| {
                let mut fields = vec![0.0; FRAME_FIELD_COUNT];
                fields[8] = left_y;
                fields[11] = right_y;
                Frame::from_fields(fields).unwrap()
            })
            .collect();
        Dataset::new(vec![String::new(); FRAME_FIELD_COUNT], frames)
    }

    #[test]
    fn test_samples_requested_row() {
        let dataset = dataset_with_heights(&[(1.0, 1.0), (1.5, 1.7), (2.0, 2.0)]);
        let calibration = HeadCalibration::from_dataset(&dataset, 1, 1);
        assert!((calibration.head_height - 1.6).abs() < 1e-12);
        assert_eq!(
            calibration.source,
            CalibrationSource::Sampled { start_row: 1, rows: 1 }
        );
    }

    #[test]
    fn test_window_averages_rows() {
        let dataset = dataset_with_heights(&[(1.0, 1.0), (1.5, 1.5), (2.0, 2.0)]);
        let calibration = HeadCalibration::from_dataset(&dataset, 0, 3);
        assert!((calibration.head_height - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_short_session_clamps_to_last_row() {
        let dataset = dataset_with_heights(&[(1.0, 1.0), (1.52, 1.54)]);
        let calibration = HeadCalibration::from_dataset(&dataset, 2000, 1);
        assert!((calibration.head_height - 1.53).abs() < 1e-12);
        assert_eq!(
            calibration.source,
            CalibrationSource::Clamped { start_row: 1, rows: 1 }
        );
    }

    #[test]
    fn test_window_larger_than_session_uses_everything() {
        let dataset = dataset_with_heights(&[(1.0, 1.0), (2.0, 2.0)]);
        let calibration = HeadCalibration::from_dataset(&dataset, 0, 10);
        assert!((calibration.head_height - 1.5).abs() < 1e-12);
        assert_eq!(
            calibration.source,
            CalibrationSource::Clamped { start_row: 0, rows: 2 }
        );
    }
}

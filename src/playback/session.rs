// src/playback/session.rs

use glam::DVec3;
use std::path::Path;
use tracing::{debug, info};

use crate::data_analysis::heatmap_accumulator::HeatmapAccumulator;
use crate::data_input::calibration::HeadCalibration;
use crate::data_input::frame_data::Dataset;
use crate::data_input::frame_parser::{load_dataset, LoadError};
use crate::playback::state::{PlaybackState, PlaybackStatus};
use crate::session_context::ReplayConfig;

/// Everything the host needs to mirror one live tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub frame_index: usize,
    pub apparatus_angle: f64,
    /// Rotation to apply to the rig, present only when the angle changed.
    pub apparatus_delta: Option<f64>,
    /// Absolute rod orientation.
    pub rod_angle: f64,
    pub trial: i32,
    pub gaze_point: DVec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Paused,
    Finished,
    Advanced(FrameUpdate),
}

/// A loaded recording being replayed.
///
/// Owns the dataset, the playhead and the heatmap; the host drives it with
/// one `tick()` per display refresh and mirrors the returned outcome.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    dataset: Dataset,
    config: ReplayConfig,
    calibration: HeadCalibration,
    state: PlaybackState,
    heatmap: HeatmapAccumulator,
    gaze_point: Option<DVec3>,
}

impl ReplaySession {
    pub fn new(dataset: Dataset, config: ReplayConfig) -> Self {
        let calibration = HeadCalibration::from_dataset(
            &dataset,
            config.calibration_sample_row,
            config.calibration_window,
        );
        let initial_angle = dataset.first().map(|f| f.apparatus_angle()).unwrap_or(0.0);
        let state = PlaybackState::new(dataset.len(), initial_angle);
        let heatmap = HeatmapAccumulator::new(
            config.heatmap_width,
            config.heatmap_height,
            config.saturation_count,
            config.gradient,
        );
        info!(
            frames = dataset.len(),
            width = heatmap.width(),
            height = heatmap.height(),
            "replay session ready"
        );
        Self {
            dataset,
            config,
            calibration,
            state,
            heatmap,
            gaze_point: None,
        }
    }

    /// Loads a recording and prepares it for playback.
    pub fn open(path: &Path, config: ReplayConfig) -> Result<Self, LoadError> {
        let dataset = load_dataset(path)?;
        Ok(Self::new(dataset, config))
    }

    /// Advances playback by one frame unless paused or finished.
    pub fn tick(&mut self) -> TickOutcome {
        match self.state.status() {
            PlaybackStatus::Paused => return TickOutcome::Paused,
            PlaybackStatus::Finished => {
                debug!(frames = self.dataset.len(), "end of session reached");
                return TickOutcome::Finished;
            }
            PlaybackStatus::Playing => {}
        }

        let frame_index = self.state.current_frame_index();
        let frame = &self.dataset[frame_index];
        let apparatus_angle = frame.apparatus_angle();
        let rod_angle = frame.rod_angle();

        let apparatus_delta = self.state.observe_frame(apparatus_angle);
        if let Some(delta) = apparatus_delta {
            debug!(frame_index, delta, trial = self.state.trial(), "apparatus rotated");
        }

        let head_height = self.calibration.head_height;
        let gaze_point = self.heatmap.update(&self.dataset, frame_index, head_height);
        self.gaze_point = Some(gaze_point);
        self.state.advance();

        TickOutcome::Advanced(FrameUpdate {
            frame_index,
            apparatus_angle,
            apparatus_delta,
            rod_angle,
            trial: self.state.trial(),
            gaze_point,
        })
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
        info!(paused = self.state.is_paused(), "resume/pause");
    }

    /// Sets the playhead directly; takes effect on the next tick.
    pub fn scrub_to(&mut self, position: f64) -> bool {
        self.state.scrub_to(position)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    pub fn calibration(&self) -> &HeadCalibration {
        &self.calibration
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status()
    }

    pub fn position(&self) -> f64 {
        self.state.position()
    }

    pub fn current_frame_index(&self) -> usize {
        self.state.current_frame_index()
    }

    pub fn trial(&self) -> i32 {
        self.state.trial()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn heatmap(&self) -> &HeatmapAccumulator {
        &self.heatmap
    }

    /// Live gaze indicator from the most recent live tick.
    pub fn gaze_point(&self) -> Option<DVec3> {
        self.gaze_point
    }

    pub fn convergence_points(&self) -> &[DVec3] {
        self.heatmap.convergence_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::test_fixtures::{dataset_with_angles, dataset_with_gaze};

    fn session(dataset: Dataset) -> ReplaySession {
        let config = ReplayConfig {
            heatmap_width: 8,
            heatmap_height: 8,
            ..ReplayConfig::default()
        };
        ReplaySession::new(dataset, config)
    }

    #[test]
    fn test_forward_playback_counts_angle_changes() {
        let mut replay = session(dataset_with_angles(&[0.0, 0.0, 5.0, 5.0, 5.0, 10.0]));
        let mut deltas = Vec::new();
        while let TickOutcome::Advanced(update) = replay.tick() {
            deltas.extend(update.apparatus_delta);
        }
        assert_eq!(replay.trial(), 2);
        assert_eq!(deltas, vec![5.0, 5.0]);
        assert_eq!(replay.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn test_scrubbing_back_undoes_trials() {
        let mut replay = session(dataset_with_angles(&[0.0, 0.0, 5.0, 5.0, 5.0, 10.0]));
        while let TickOutcome::Advanced(_) = replay.tick() {}
        assert_eq!(replay.trial(), 2);

        let mut deltas = Vec::new();
        for position in (0..=4).rev() {
            replay.scrub_to(position as f64);
            if let TickOutcome::Advanced(update) = replay.tick() {
                deltas.extend(update.apparatus_delta);
            }
        }
        assert_eq!(replay.trial(), 0);
        assert_eq!(deltas, vec![-5.0, -5.0]);
    }

    #[test]
    fn test_forward_jump_counts_one_change() {
        let mut replay = session(dataset_with_angles(&[0.0, 5.0, 10.0]));
        replay.tick();
        replay.scrub_to(2.0);
        match replay.tick() {
            TickOutcome::Advanced(update) => {
                assert_eq!(update.frame_index, 2);
                assert_eq!(update.apparatus_delta, Some(10.0));
                assert_eq!(update.trial, 1);
            }
            other => panic!("expected a live tick, got {other:?}"),
        }
    }

    #[test]
    fn test_replaying_same_frame_does_not_count() {
        let mut replay = session(dataset_with_angles(&[0.0, 5.0, 5.0]));
        replay.tick();
        replay.tick();
        assert_eq!(replay.trial(), 1);
        replay.scrub_to(1.0);
        match replay.tick() {
            TickOutcome::Advanced(update) => {
                assert_eq!(update.apparatus_delta, None);
                assert_eq!(update.trial, 1);
            }
            other => panic!("expected a live tick, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_angles_leave_rig_and_trials_alone() {
        let mut replay = session(dataset_with_angles(&[0.0, f64::NAN, f64::NAN, f64::NAN]));
        let mut deltas = Vec::new();
        while let TickOutcome::Advanced(update) = replay.tick() {
            deltas.push(update.apparatus_delta);
        }
        assert_eq!(deltas, vec![None; 4]);
        assert_eq!(replay.trial(), 0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut replay = session(dataset_with_gaze(&[(0.0, 0.0); 6]));
        replay.tick();
        replay.tick();
        replay.toggle_pause();
        let position = replay.position();
        let counts = replay.heatmap().counts().clone();
        for _ in 0..10 {
            assert_eq!(replay.tick(), TickOutcome::Paused);
        }
        assert_eq!(replay.position(), position);
        assert_eq!(replay.trial(), 0);
        assert_eq!(replay.heatmap().counts(), &counts);

        replay.toggle_pause();
        assert!(matches!(replay.tick(), TickOutcome::Advanced(_)));
    }

    #[test]
    fn test_scrub_while_paused_is_observed_next_tick() {
        let mut replay = session(dataset_with_gaze(&[(0.0, 0.0); 6]));
        replay.toggle_pause();
        replay.scrub_to(4.5);
        assert_eq!(replay.tick(), TickOutcome::Paused);
        replay.toggle_pause();
        match replay.tick() {
            TickOutcome::Advanced(update) => assert_eq!(update.frame_index, 4),
            other => panic!("expected a live tick, got {other:?}"),
        }
        assert_eq!(replay.heatmap().total_count(), 4);
    }

    #[test]
    fn test_finished_is_idempotent() {
        let mut replay = session(dataset_with_gaze(&[(0.0, 0.0); 3]));
        for _ in 0..3 {
            assert!(matches!(replay.tick(), TickOutcome::Advanced(_)));
        }
        let snapshot = replay.state().clone();
        for _ in 0..5 {
            assert_eq!(replay.tick(), TickOutcome::Finished);
        }
        assert_eq!(replay.state(), &snapshot);
        assert_eq!(replay.current_frame_index(), 3);
        assert_eq!(replay.heatmap().total_count(), 2);
    }

    #[test]
    fn test_rod_angle_is_absolute() {
        let mut replay = session(dataset_with_angles(&[0.0, 0.0, 0.0]));
        let rods: Vec<f64> = std::iter::from_fn(|| match replay.tick() {
            TickOutcome::Advanced(update) => Some(update.rod_angle),
            _ => None,
        })
        .collect();
        assert_eq!(rods, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_gaze_point_uses_head_height() {
        let mut replay = session(dataset_with_angles(&[0.0, 0.0]));
        assert_eq!(replay.gaze_point(), None);
        replay.tick();
        let point = replay.gaze_point().unwrap();
        let expected_y =
            crate::data_input::test_fixtures::LEFT_EYE.y + replay.calibration().head_height;
        assert!((point.y - expected_y).abs() < 1e-12);
    }
}

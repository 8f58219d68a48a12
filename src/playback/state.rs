// src/playback/state.rs

use tracing::warn;

use crate::playback::trial::{trial_delta, ScrubDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    /// The playhead is at or past the last frame; ticks no longer advance.
    Finished,
}

/// Playhead, pause flag and trial counter for one session.
///
/// `position` is continuous so a scrub control can set it freely; the frame
/// shown is always `floor(position)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    length: usize,
    position: f64,
    paused: bool,
    trial: i32,
    last_apparatus_angle: f64,
    last_position: f64,
}

impl PlaybackState {
    pub fn new(length: usize, initial_apparatus_angle: f64) -> Self {
        Self {
            length,
            position: 0.0,
            paused: false,
            trial: 0,
            last_apparatus_angle: if initial_apparatus_angle.is_finite() {
                initial_apparatus_angle
            } else {
                0.0
            },
            last_position: 0.0,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn current_frame_index(&self) -> usize {
        self.position.floor() as usize
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn trial(&self) -> i32 {
        self.trial
    }

    pub fn last_apparatus_angle(&self) -> f64 {
        self.last_apparatus_angle
    }

    pub fn last_position(&self) -> f64 {
        self.last_position
    }

    pub fn status(&self) -> PlaybackStatus {
        if self.paused {
            PlaybackStatus::Paused
        } else if self.current_frame_index() >= self.length {
            PlaybackStatus::Finished
        } else {
            PlaybackStatus::Playing
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Moves the playhead, clamped to `[0, length]`. Non-finite positions
    /// are ignored and `false` is returned.
    pub fn scrub_to(&mut self, position: f64) -> bool {
        if !position.is_finite() {
            warn!(position, "ignoring non-finite scrub position");
            return false;
        }
        self.position = position.clamp(0.0, self.length as f64);
        true
    }

    /// Records the apparatus angle of the frame under the playhead.
    ///
    /// Returns the rotation to apply to the rig when the angle changed. The
    /// trial counter moves with the scrub direction at each change. A
    /// non-finite angle never counts as a change.
    pub(crate) fn observe_frame(&mut self, apparatus_angle: f64) -> Option<f64> {
        let angle_changed =
            apparatus_angle.is_finite() && apparatus_angle != self.last_apparatus_angle;
        let delta = if angle_changed {
            let direction = ScrubDirection::between(self.last_position, self.position);
            self.trial += trial_delta(direction, true);
            let rotation = apparatus_angle - self.last_apparatus_angle;
            self.last_apparatus_angle = apparatus_angle;
            Some(rotation)
        } else {
            None
        };
        self.last_position = self.current_frame_index() as f64;
        delta
    }

    /// Moves the playhead one frame forward.
    pub(crate) fn advance(&mut self) {
        self.position = (self.position + 1.0).min(self.length as f64);
    }
}

// src/playback/trial.rs

/// Which way the playhead moved since the previous live tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubDirection {
    Forward,
    Backward,
    Stationary,
}

impl ScrubDirection {
    pub fn between(last_position: f64, position: f64) -> Self {
        if last_position < position {
            ScrubDirection::Forward
        } else if last_position > position {
            ScrubDirection::Backward
        } else {
            ScrubDirection::Stationary
        }
    }
}

/// Change to the trial counter for one live tick.
///
/// Only ticks landing on an apparatus-angle change move the counter, in the
/// direction the playhead travelled.
pub fn trial_delta(direction: ScrubDirection, angle_changed: bool) -> i32 {
    if !angle_changed {
        return 0;
    }
    match direction {
        ScrubDirection::Forward => 1,
        ScrubDirection::Backward => -1,
        ScrubDirection::Stationary => 0,
    }
}

// src/session_context.rs

use std::path::{Path, PathBuf};

use crate::constants::{
    CALIBRATION_SAMPLE_ROW, CALIBRATION_WINDOW_ROWS, EMPTY_ROOM_FILE_SUFFIX, HEATMAP_HEIGHT,
    HEATMAP_SATURATION_COUNT, HEATMAP_WIDTH, OBJECTS_ROOM_HEATMAP_PLANE_Z_OFFSET,
    OBJECTS_ROOM_ROD_Z_OFFSET, SESSION_FILE_EXTENSION, SESSION_FILE_PREFIX, SESSION_TRIAL_COUNT,
};
use crate::data_analysis::color_mapping::GradientPolicy;

/// Which room variant the session was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomLayout {
    #[default]
    EmptyRoom,
    ObjectsRoom,
}

impl RoomLayout {
    /// Z offset for the heatmap plane in the host scene.
    pub fn heatmap_plane_z_offset(&self) -> f64 {
        match self {
            RoomLayout::EmptyRoom => 0.0,
            RoomLayout::ObjectsRoom => OBJECTS_ROOM_HEATMAP_PLANE_Z_OFFSET,
        }
    }

    /// Z offset for the rod in the host scene.
    pub fn rod_z_offset(&self) -> f64 {
        match self {
            RoomLayout::EmptyRoom => 0.0,
            RoomLayout::ObjectsRoom => OBJECTS_ROOM_ROD_Z_OFFSET,
        }
    }
}

/// Settings for one replay session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub heatmap_width: usize,
    pub heatmap_height: usize,
    pub saturation_count: u32,
    pub gradient: GradientPolicy,
    /// Trials in a session; only used for display.
    pub trial_total: u32,
    pub calibration_sample_row: usize,
    pub calibration_window: usize,
    pub participant_id: String,
    pub room_layout: RoomLayout,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            heatmap_width: HEATMAP_WIDTH,
            heatmap_height: HEATMAP_HEIGHT,
            saturation_count: HEATMAP_SATURATION_COUNT,
            gradient: GradientPolicy::default(),
            trial_total: SESSION_TRIAL_COUNT,
            calibration_sample_row: CALIBRATION_SAMPLE_ROW,
            calibration_window: CALIBRATION_WINDOW_ROWS,
            participant_id: String::new(),
            room_layout: RoomLayout::default(),
        }
    }
}

/// Recording file name for a participant, e.g.
/// `[Rod-Frame]Participant_07 empty.csv`.
pub fn session_file_name(participant_id: &str, layout: RoomLayout) -> String {
    let suffix = match layout {
        RoomLayout::EmptyRoom => EMPTY_ROOM_FILE_SUFFIX,
        RoomLayout::ObjectsRoom => "",
    };
    format!("{SESSION_FILE_PREFIX}{participant_id}{suffix}.{SESSION_FILE_EXTENSION}")
}

pub fn resolve_session_path(logs_dir: &Path, participant_id: &str, layout: RoomLayout) -> PathBuf {
    logs_dir.join(session_file_name(participant_id, layout))
}

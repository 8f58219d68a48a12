// src/constants.rs

// --- Input Schema ---
// Every data row carries at least this many numeric fields.
pub const FRAME_FIELD_COUNT: usize = 19;

// Column indices into a session row.
pub const COL_APPARATUS_ANGLE: usize = 0;
pub const COL_ROD_ANGLE: usize = 1;
// Columns 2..=6 are recorded but not consumed by the replay.
pub const COL_LEFT_EYE_ORIGIN: usize = 7; // x, y, z at 7, 8, 9
pub const COL_RIGHT_EYE_ORIGIN: usize = 10; // x, y, z at 10, 11, 12
pub const COL_LEFT_GAZE_DIRECTION: usize = 13; // x, y, z at 13, 14, 15
pub const COL_RIGHT_GAZE_DIRECTION: usize = 16; // x, y, z at 16, 17, 18

// --- Heatmap ---
pub const HEATMAP_WIDTH: usize = 512;
pub const HEATMAP_HEIGHT: usize = 512;
// Visit count at which a cell reaches full gradient color.
pub const HEATMAP_SATURATION_COUNT: u32 = 10;

// --- Ray Intersection ---
// Below this |a*c - b^2| the two gaze rays are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-12;

// --- Playback ---
// Number of trials in a rod-and-frame session, used for the HUD label.
pub const SESSION_TRIAL_COUNT: u32 = 20;

// --- Head Height Calibration ---
// Row sampled for the participant's eye height. Eye origin Y is nearly
// constant across a session, so a single row well into the recording works.
pub const CALIBRATION_SAMPLE_ROW: usize = 2000;
pub const CALIBRATION_WINDOW_ROWS: usize = 1;

// --- Room Layout ---
// The furnished room is smaller than the empty one; these shift the heatmap
// plane and the rod along Z so they sit against its back wall.
pub const OBJECTS_ROOM_HEATMAP_PLANE_Z_OFFSET: f64 = -2.65;
pub const OBJECTS_ROOM_ROD_Z_OFFSET: f64 = -1.0;

// --- Session File Naming ---
pub const SESSION_FILE_PREFIX: &str = "[Rod-Frame]Participant_";
pub const EMPTY_ROOM_FILE_SUFFIX: &str = " empty";
pub const SESSION_FILE_EXTENSION: &str = "csv";

// --- Heatmap Plot ---
pub const PLOT_WIDTH: u32 = 1080;
pub const PLOT_HEIGHT: u32 = 1080;
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// src/constants.rs

// src/presentation.rs

use glam::DVec3;

use crate::data_analysis::color_mapping::HeatColor;
use crate::playback::session::{ReplaySession, TickOutcome};
use crate::session_context::RoomLayout;

/// Text shown alongside the replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLabels {
    pub current_time: String,
    pub participant: String,
    pub trial: String,
}

impl HudLabels {
    pub fn for_session(session: &ReplaySession) -> Self {
        let config = session.config();
        Self {
            current_time: format!("Current Time: {:.2}", session.position()),
            participant: format!("ParticipantID: {}", config.participant_id),
            trial: format!("Trial: {}/{}", session.trial(), config.trial_total),
        }
    }
}

/// The host side of a replay: scene, texture and labels.
///
/// The replay engine never touches a scene itself; it hands angles, points
/// and colors to an implementation of this trait.
pub trait ReplayPresenter {
    /// Called once before playback with the calibrated head height.
    fn apply_calibration(&mut self, head_height: f64, layout: RoomLayout);
    /// Rotates the apparatus by `delta_degrees` about its center.
    fn rotate_apparatus(&mut self, delta_degrees: f64);
    /// Sets the rod's absolute orientation.
    fn set_rod_angle(&mut self, degrees: f64);
    fn place_gaze_indicator(&mut self, point: DVec3);
    /// Row-major colors, `x + y * width`.
    fn upload_heatmap(&mut self, width: usize, height: usize, colors: &[HeatColor]);
    fn show_labels(&mut self, labels: &HudLabels);
}

/// Mirrors one tick's outcome onto the presenter.
///
/// Labels are refreshed on every tick; the scene only changes on live ticks.
pub fn present<P: ReplayPresenter>(
    session: &ReplaySession,
    outcome: &TickOutcome,
    presenter: &mut P,
) {
    if let TickOutcome::Advanced(update) = outcome {
        if let Some(delta) = update.apparatus_delta {
            presenter.rotate_apparatus(delta);
        }
        presenter.set_rod_angle(update.rod_angle);
        presenter.place_gaze_indicator(update.gaze_point);
        let heatmap = session.heatmap();
        presenter.upload_heatmap(heatmap.width(), heatmap.height(), heatmap.colors());
    }
    presenter.show_labels(&HudLabels::for_session(session));
}

/// Presenter that only records the scene state it would have shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessPresenter {
    pub head_height: f64,
    pub room_layout: RoomLayout,
    /// Net rotation applied to the apparatus since the start.
    pub apparatus_rotation: f64,
    pub rod_angle: f64,
    pub gaze_indicator: Option<DVec3>,
    pub heatmap_size: (usize, usize),
    pub heatmap_uploads: usize,
    pub labels: Option<HudLabels>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplayPresenter for HeadlessPresenter {
    fn apply_calibration(&mut self, head_height: f64, layout: RoomLayout) {
        self.head_height = head_height;
        self.room_layout = layout;
    }

    fn rotate_apparatus(&mut self, delta_degrees: f64) {
        self.apparatus_rotation += delta_degrees;
    }

    fn set_rod_angle(&mut self, degrees: f64) {
        self.rod_angle = degrees;
    }

    fn place_gaze_indicator(&mut self, point: DVec3) {
        self.gaze_indicator = Some(point);
    }

    fn upload_heatmap(&mut self, width: usize, height: usize, colors: &[HeatColor]) {
        debug_assert_eq!(colors.len(), width * height);
        self.heatmap_size = (width, height);
        self.heatmap_uploads += 1;
    }

    fn show_labels(&mut self, labels: &HudLabels) {
        self.labels = Some(labels.clone());
    }
}

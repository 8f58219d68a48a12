// src/data_analysis/heatmap_accumulator.rs

use glam::{DVec2, DVec3};
use ndarray::Array2;
use ndarray_stats::QuantileExt;

use crate::data_analysis::color_mapping::{heat_color, GradientPolicy, HeatColor};
use crate::data_analysis::ray_intersection::convergence_point;
use crate::data_input::frame_data::{Dataset, Frame};

/// Binocular gaze center in normalized gaze space, roughly [-1, 1] per axis.
pub fn gaze_center(frame: &Frame) -> DVec2 {
    let left = frame.left_gaze_direction();
    let right = frame.right_gaze_direction();
    DVec2::new((left.x + right.x) / 2.0, (left.y + right.y) / 2.0)
}

/// Maps a normalized gaze coordinate to a heatmap cell, clamped to the grid.
pub fn gaze_to_cell(gaze: DVec2, width: usize, height: usize) -> (usize, usize) {
    let to_cell = |g: f64, cells: usize| -> usize {
        let max_index = cells.saturating_sub(1) as f64;
        // NaN saturates to 0 on the cast.
        ((g + 1.0) * 0.5 * cells as f64).round().clamp(0.0, max_index) as usize
    };
    (to_cell(gaze.x, width), to_cell(gaze.y, height))
}

/// Visit-count heatmap over normalized gaze space.
///
/// Holds the counts for frames `[0, accumulated_upto)` of one dataset, the
/// derived color buffer (row-major, `x + y * width`), and the convergence
/// point of every counted frame.
#[derive(Debug, Clone)]
pub struct HeatmapAccumulator {
    counts: Array2<u32>, // Indexed [x, y].
    colors: Vec<HeatColor>,
    convergence_points: Vec<DVec3>,
    accumulated_upto: usize,
    saturation_count: u32,
    gradient: GradientPolicy,
}

impl HeatmapAccumulator {
    pub fn new(
        width: usize,
        height: usize,
        saturation_count: u32,
        gradient: GradientPolicy,
    ) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let saturation_count = saturation_count.max(1);
        Self {
            counts: Array2::zeros((width, height)),
            colors: vec![heat_color(0, saturation_count, gradient); width * height],
            convergence_points: Vec::new(),
            accumulated_upto: 0,
            saturation_count,
            gradient,
        }
    }

    pub fn width(&self) -> usize {
        self.counts.nrows()
    }

    pub fn height(&self) -> usize {
        self.counts.ncols()
    }

    pub fn counts(&self) -> &Array2<u32> {
        &self.counts
    }

    pub fn count_at(&self, x: usize, y: usize) -> u32 {
        self.counts[[x, y]]
    }

    pub fn colors(&self) -> &[HeatColor] {
        &self.colors
    }

    pub fn color_at(&self, x: usize, y: usize) -> HeatColor {
        self.colors[x + y * self.width()]
    }

    /// Convergence points of the counted frames, in frame order.
    pub fn convergence_points(&self) -> &[DVec3] {
        &self.convergence_points
    }

    pub fn accumulated_upto(&self) -> usize {
        self.accumulated_upto
    }

    pub fn saturation_count(&self) -> u32 {
        self.saturation_count
    }

    pub fn gradient(&self) -> GradientPolicy {
        self.gradient
    }

    pub fn total_count(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn peak_count(&self) -> u32 {
        self.counts.max().copied().unwrap_or(0)
    }

    /// Clears everything and replays frames `[0, upto)`.
    ///
    /// # Panics
    /// Panics if `upto` exceeds the dataset length.
    pub fn rebuild(&mut self, dataset: &Dataset, upto: usize) {
        assert!(
            upto <= dataset.len(),
            "heatmap rebuild past end of dataset: upto {} > length {}",
            upto,
            dataset.len()
        );
        self.counts.fill(0);
        self.convergence_points.clear();
        for frame in &dataset.frames()[..upto] {
            let (x, y) = self.cell_for(frame);
            self.counts[[x, y]] += 1;
            self.convergence_points.push(convergence_point(frame));
        }
        self.accumulated_upto = upto;
        self.recolor_all();
    }

    /// Brings the heatmap to frames `[0, upto)` by touching only the frames
    /// between the previous and the new bound.
    ///
    /// Every frame maps to exactly one cell, so stepping backwards
    /// decrements the same cells a forward step incremented and the result
    /// always equals `rebuild(dataset, upto)`. `dataset` must be the one
    /// accumulated so far; call `rebuild` to switch datasets.
    ///
    /// # Panics
    /// Panics if `upto` exceeds the dataset length, or if `dataset` is
    /// shorter than what has already been accumulated.
    pub fn accumulate(&mut self, dataset: &Dataset, upto: usize) {
        assert!(
            upto <= dataset.len(),
            "heatmap accumulate past end of dataset: upto {} > length {}",
            upto,
            dataset.len()
        );
        assert!(
            self.accumulated_upto <= dataset.len(),
            "heatmap holds {} frames but dataset has {}",
            self.accumulated_upto,
            dataset.len()
        );

        let previous = self.accumulated_upto;
        if upto >= previous {
            for frame in &dataset.frames()[previous..upto] {
                let (x, y) = self.cell_for(frame);
                self.counts[[x, y]] += 1;
                self.recolor(x, y);
                self.convergence_points.push(convergence_point(frame));
            }
        } else {
            for frame in &dataset.frames()[upto..previous] {
                let (x, y) = self.cell_for(frame);
                self.counts[[x, y]] = self.counts[[x, y]].saturating_sub(1);
                self.recolor(x, y);
            }
            self.convergence_points.truncate(upto);
        }
        self.accumulated_upto = upto;
    }

    /// Accumulates frames `[0, index)` and returns the live gaze indicator
    /// for frame `index`.
    ///
    /// # Panics
    /// Panics if `index` is not a valid frame index.
    pub fn update(&mut self, dataset: &Dataset, index: usize, head_height: f64) -> DVec3 {
        let gaze_point = live_gaze_point(dataset, index, head_height);
        self.accumulate(dataset, index);
        gaze_point
    }

    fn cell_for(&self, frame: &Frame) -> (usize, usize) {
        gaze_to_cell(gaze_center(frame), self.width(), self.height())
    }

    fn recolor(&mut self, x: usize, y: usize) {
        let width = self.width();
        let count = self.counts[[x, y]];
        self.colors[x + y * width] = heat_color(count, self.saturation_count, self.gradient);
    }

    fn recolor_all(&mut self) {
        let width = self.width();
        for ((x, y), &count) in self.counts.indexed_iter() {
            self.colors[x + y * width] = heat_color(count, self.saturation_count, self.gradient);
        }
    }
}

/// Convergence point of frame `index`, lifted by the calibrated head height.
///
/// # Panics
/// Panics if `index` is not a valid frame index.
pub fn live_gaze_point(dataset: &Dataset, index: usize, head_height: f64) -> DVec3 {
    assert!(
        index < dataset.len(),
        "gaze point requested for frame {} of {}",
        index,
        dataset.len()
    );
    convergence_point(&dataset[index]) + DVec3::Y * head_height
}

// src/plot_functions/plot_gaze_heatmap.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::data_analysis::heatmap_accumulator::HeatmapAccumulator;
use crate::plot_framework::{draw_heatmap_plot, HeatmapCell, HeatmapPlotConfig};

/// Builds the plot config for the current heatmap over normalized gaze
/// space `[-1, 1]` on both axes. Only visited cells become rectangles; the
/// background already matches the zero-count color.
pub fn gaze_heatmap_config(heatmap: &HeatmapAccumulator, title: String) -> HeatmapPlotConfig {
    let width = heatmap.width();
    let height = heatmap.height();
    let cell_w = 2.0 / width as f64;
    let cell_h = 2.0 / height as f64;

    let cells = heatmap
        .counts()
        .indexed_iter()
        .filter(|(_, &count)| count > 0)
        .map(|((x, y), _)| HeatmapCell {
            // Cell centers sit on the rounded grid points.
            x: x as f64 * cell_w - 1.0 - cell_w * 0.5,
            y: y as f64 * cell_h - 1.0 - cell_h * 0.5,
            color: heatmap.color_at(x, y).to_rgb8(),
        })
        .collect();

    HeatmapPlotConfig {
        title,
        x_range: -1.0..1.0,
        y_range: -1.0..1.0,
        x_label: "Gaze X (normalized)".to_string(),
        y_label: "Gaze Y (normalized)".to_string(),
        cell_size: (cell_w, cell_h),
        cells,
    }
}

/// Writes `<root_name>_Gaze_Heatmap.png` into `output_dir` and returns its path.
pub fn plot_gaze_heatmap(
    heatmap: &HeatmapAccumulator,
    output_dir: &Path,
    root_name: &str,
    frame_index: usize,
    trial: i32,
) -> Result<PathBuf, Box<dyn Error>> {
    let output_file = output_dir.join(format!("{root_name}_Gaze_Heatmap.png"));
    let plot_type_name = "Gaze Heatmap";
    let title = format!(
        "{plot_type_name}: {} samples up to frame {frame_index}, trial {trial} (peak {})",
        heatmap.total_count(),
        heatmap.peak_count()
    );

    let config = gaze_heatmap_config(heatmap, title);
    if draw_heatmap_plot(&output_file, root_name, plot_type_name, &config)? {
        println!("  Heatmap plot saved as '{}'.", output_file.display());
    } else {
        println!(
            "  Heatmap plot '{}' written with placeholder: no gaze samples accumulated.",
            output_file.display()
        );
    }
    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_analysis::color_mapping::GradientPolicy;
    use crate::data_input::test_fixtures::dataset_with_gaze;
    use plotters::style::RGBColor;

    #[test]
    fn test_config_contains_visited_cells_only() {
        let dataset = dataset_with_gaze(&[(0.0, 0.0), (0.0, 0.0), (1.0, 1.0)]);
        let mut heatmap = HeatmapAccumulator::new(4, 4, 10, GradientPolicy::Clamped);
        heatmap.rebuild(&dataset, 3);

        let config = gaze_heatmap_config(&heatmap, "t".to_string());
        assert_eq!(config.cells.len(), 2);
        assert_eq!(config.cell_size, (0.5, 0.5));

        let center = config
            .cells
            .iter()
            .find(|c| c.x == -0.25 && c.y == -0.25)
            .unwrap();
        assert_eq!(center.color, RGBColor(204, 204, 255));
    }

    #[test]
    fn test_empty_heatmap_has_no_cells() {
        let heatmap = HeatmapAccumulator::new(4, 4, 10, GradientPolicy::Clamped);
        let config = gaze_heatmap_config(&heatmap, "t".to_string());
        assert!(config.cells.is_empty());
    }
}

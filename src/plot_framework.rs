// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::ChartBuilder;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Rectangle, Text};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE,
    PLOT_HEIGHT, PLOT_WIDTH,
};

/// One colored cell of a heatmap, in chart coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapCell {
    pub x: f64,
    pub y: f64,
    pub color: RGBColor,
}

#[derive(Clone, Debug)]
pub struct HeatmapPlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub x_label: String,
    pub y_label: String,
    /// Width and height of every cell in chart units.
    pub cell_size: (f64, f64),
    /// Cells to paint; anything not listed is left at the background color.
    pub cells: Vec<HeatmapCell>,
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable: {reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_text_width = (message.len() as i32).saturating_mul(estimated_char_width);

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

fn draw_heatmap_chart(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    config: &HeatmapPlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&config.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d(config.x_range.clone(), config.y_range.clone())?;

    let (cell_w, cell_h) = config.cell_size;
    chart.draw_series(config.cells.iter().map(|cell| {
        Rectangle::new(
            [(cell.x, cell.y), (cell.x + cell_w, cell.y + cell_h)],
            cell.color.filled(),
        )
    }))?;

    // Mesh last so the grid stays visible over dense regions.
    chart
        .configure_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_labels(9)
        .y_labels(9)
        .y_label_formatter(&|y| format!("{:.2}", y))
        .x_label_formatter(&|x| format!("{:.2}", x))
        .light_line_style(BLACK.mix(0.05))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;
    Ok(())
}

/// Renders a single heatmap plot to a PNG file.
///
/// Returns `Ok(false)` when the config has no cells; a placeholder message
/// is written in that case.
pub fn draw_heatmap_plot(
    output_file: &Path,
    root_name: &str,
    plot_type_name: &str,
    config: &HeatmapPlotConfig,
) -> Result<bool, Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_file, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE)
            .into_font()
            .color(&BLACK),
    ))?;
    let plot_area = root_area.margin(50, 5, 5, 5);

    let valid_ranges =
        config.x_range.end > config.x_range.start && config.y_range.end > config.y_range.start;
    let drawn = if !config.cells.is_empty() && valid_ranges {
        draw_heatmap_chart(&plot_area, config)?;
        true
    } else {
        let reason = if config.cells.is_empty() {
            "No gaze samples"
        } else {
            "Invalid ranges"
        };
        draw_unavailable_message(&plot_area, plot_type_name, reason)?;
        false
    };

    root_area.present()?;
    Ok(drawn)
}

// src/plot_framework.rs

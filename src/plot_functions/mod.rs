// src/plot_functions/mod.rs

pub mod plot_gaze_heatmap;

// src/plot_functions/mod.rs

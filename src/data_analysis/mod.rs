// src/data_analysis/mod.rs

pub mod color_mapping;
pub mod heatmap_accumulator;
pub mod ray_intersection;

// src/data_analysis/mod.rs

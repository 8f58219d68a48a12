// src/lib.rs - Library interface for the replay engine and its exporters

pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod playback;
pub mod plot_framework;
pub mod plot_functions;
pub mod presentation;
pub mod session_context;

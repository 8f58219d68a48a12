// src/data_input/mod.rs

pub mod calibration;
pub mod frame_data;
pub mod frame_parser;

#[cfg(test)]
pub(crate) mod test_fixtures;

// src/data_input/mod.rs

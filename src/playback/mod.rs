// src/playback/mod.rs

pub mod session;
pub mod state;
pub mod trial;

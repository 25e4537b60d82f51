//! Grid Snake - the classic arcade game in the terminal
//!
//! This library provides:
//! - Core game logic: movement, growth, collisions and food placement (game module)
//! - Device-independent scenes and the TUI renderer (render module)
//! - Keyboard mapping and per-tick steering (input module)
//! - Sound cues behind a small trait (audio module)
//! - The play session that ties them together (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

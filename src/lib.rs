//! Grid Snake - a single-player Snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard mapping and the per-tick direction queue (input module)
//! - TUI rendering (render module)
//! - The tick scheduler and the interactive loop (scheduler, modes)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;

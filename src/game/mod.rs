//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it one tick at a time.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use collision::check_collision;
pub use config::{BOARD_HEIGHT, BOARD_WIDTH, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::FoodSpawner;
pub use state::{CollisionType, GameState, Phase, Position, Snake};

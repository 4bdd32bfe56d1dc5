//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board wraps at every edge; the snake shares it with one good and one bad food item.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, SpeedRequest};
pub use config::{GameConfig, MAX_BOARD_CELLS, SPEED_LEVEL_COUNT, SpeedControl};
pub use engine::{GameEngine, ResetCause, TickReport};
pub use food::{Food, FoodKind};
pub use grid::{Cell, Grid};
pub use state::{Advance, Snake};

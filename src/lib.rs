//! Wrap Snake - the classic Snake arcade game in the terminal
//!
//! This library provides:
//! - Core game logic on a wrap-around board (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logger;
pub mod metrics;
pub mod modes;
pub mod render;

//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Both the keyboard-driven and the autoplay front ends drive it through
//! [`GameEngine::step`].

pub mod action;
pub mod autoplay;
pub mod config;
pub mod engine;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use autoplay::{autoplay_direction, safe_directions};
pub use config::{Difficulty, GameConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use snapshot::{Cell, Snapshot};
pub use state::{CollisionType, GameState, Outcome, Position, Snake};

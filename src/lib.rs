//! Terminal Snake with a greedy autoplay mode
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - A play session tying the engine to the persisted high score (session module)
//! - High score storage (storage module)
//! - TUI rendering, keyboard input and the interactive loop (render, input, modes)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
pub mod storage;

//! Snake Engine - a toroidal grid Snake simulation
//!
//! This library provides:
//! - Core game logic (game module): one session advancing one cell per tick
//! - A C ABI over the session (ffi module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Interactive and headless execution modes (modes module)

pub mod ffi;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

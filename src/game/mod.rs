//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A [`GameEngine`] is one session: it holds the snake, the food and the score on a
//! toroidal grid and advances by exactly one cell per [`GameEngine::tick`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{FoodValue, GameConfig};
pub use engine::{GameEngine, TickOutcome, TickResult};
pub use error::GameError;
pub use food::FoodSpawner;
pub use grid::Grid;
pub use state::{Advance, EndReason, Food, GamePhase, Position, Snake};

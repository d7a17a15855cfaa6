//! Core simulation for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers plug a [`Frontend`] into the engine to draw frames and deliver quit requests.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod sensor;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{Frontend, GameEngine, Headless, StepInfo, StepOutcome};
pub use error::GameError;
pub use food::FoodPlacer;
pub use grid::Grid;
pub use sensor::{Danger, danger_ahead};
pub use state::{Cell, GameState, Phase, Snake, Termination, Velocity};

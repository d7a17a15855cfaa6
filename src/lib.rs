//! Grid Snake - a deterministic, step-driven Snake simulation
//!
//! This library provides:
//! - Core simulation: grid, occupancy, food, danger sensing, step engine (game module)
//! - Agent interface: 14-feature observations and an environment wrapper (agent module)
//! - Terminal rendering and keyboard input (render, input modules)
//! - Session statistics (metrics module)
//! - Drivers for human play and headless runs (modes module)

pub mod agent;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

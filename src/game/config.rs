use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Configuration for the game, fixed for the lifetime of an engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in logical units
    pub width: i32,
    /// Board height in logical units
    pub height: i32,
    /// Side length of one cell in logical units
    pub block_size: i32,
    /// Steps per second when a driver paces the game
    pub tick_rate: u32,
    /// Initial length of the snake
    pub initial_length: usize,

    /// Reward for eating food
    pub food_reward: i32,
    /// Reward for crashing or stalling
    pub death_penalty: i32,
    /// An episode stalls once its frame counter exceeds this many frames per body cell
    pub stall_factor: u32,

    /// Random draws before food placement scans for free cells
    pub food_attempts: usize,
    /// Seed for food placement; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            block_size: 20,
            tick_rate: 20,
            initial_length: 3,
            food_reward: 10,
            death_penalty: -10,
            stall_factor: 100,
            food_attempts: 1024,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn columns(&self) -> i32 {
        self.width / self.block_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.block_size
    }

    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.block_size <= 0 {
            return invalid(format!("block size must be positive, got {}", self.block_size));
        }
        if self.width <= 0 || self.height <= 0 {
            return invalid(format!(
                "board must have positive size, got {}x{}",
                self.width, self.height
            ));
        }
        if self.width % self.block_size != 0 || self.height % self.block_size != 0 {
            return invalid(format!(
                "board {}x{} is not a whole number of {}-unit blocks",
                self.width, self.height, self.block_size
            ));
        }
        if self.initial_length == 0 {
            return invalid("initial snake length must be at least 1".to_string());
        }
        // The snake starts centred and extends left from the head
        let head_column = (self.columns() / 2) as usize;
        if head_column + 1 < self.initial_length {
            return invalid(format!(
                "board with {} columns cannot hold a snake of length {}",
                self.columns(),
                self.initial_length
            ));
        }
        if self.tick_rate == 0 {
            return invalid("tick rate must be positive".to_string());
        }
        if self.food_attempts == 0 {
            return invalid("food placement needs at least one attempt".to_string());
        }
        Ok(())
    }
}

use std::io;

use thiserror::Error;

/// Errors surfaced by the simulation core.
///
/// Ordinary play never produces one of these: crashes, stalls and food are all
/// reported through [`StepOutcome`](super::StepOutcome).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid snake layout: {0}")]
    InvalidSnake(String),

    /// No free cell is left for food. The engine terminates long before this
    /// can happen, so seeing it means a caller built an impossible state.
    #[error("no free cell left to place food")]
    BoardFull,

    /// The frontend asked the whole process to stop.
    #[error("quit requested by frontend")]
    QuitRequested,

    #[error("frontend failed to present frame")]
    Frontend(#[from] io::Error),
}

impl GameError {
    pub fn is_quit(&self) -> bool {
        matches!(self, GameError::QuitRequested)
    }
}

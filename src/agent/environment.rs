use super::observation::{Observation, create_observation};
use crate::game::{Action, Frontend, GameConfig, GameEngine, GameError, GameState, Headless};

/// Snake environment for an external agent
///
/// Owns the engine and the live episode, and offers the classic agent loop:
/// - `reset` starts an episode and returns its first observation
/// - `step` applies one relative action and returns `(reward, terminated, score)`
/// - `observation` encodes the current state on demand
pub struct SnakeEnvironment<F: Frontend = Headless> {
    engine: GameEngine<F>,
    state: GameState,
}

impl SnakeEnvironment<Headless> {
    /// Create a headless environment
    pub fn headless(config: GameConfig) -> Result<Self, GameError> {
        Self::new(config, Headless)
    }
}

impl<F: Frontend> SnakeEnvironment<F> {
    /// Create a new environment with a fresh episode already running
    pub fn new(config: GameConfig, frontend: F) -> Result<Self, GameError> {
        let mut engine = GameEngine::with_frontend(config, frontend)?;
        let state = engine.reset()?;
        Ok(Self { engine, state })
    }

    /// Replace the running episode with a fresh one
    pub fn reset(&mut self) -> Result<Observation, GameError> {
        self.state = self.engine.reset()?;
        Ok(create_observation(&self.state))
    }

    /// Step the environment with a relative action
    ///
    /// Returns: (reward, terminated, score)
    pub fn step(&mut self, action: Action) -> Result<(i32, bool, u32), GameError> {
        let outcome = self.engine.step(&mut self.state, action)?;
        Ok(outcome.triple())
    }

    /// Step with a `[straight, right, left]` one-hot action
    pub fn step_one_hot(&mut self, action: &[u8]) -> Result<(i32, bool, u32), GameError> {
        self.step(Action::from_one_hot(action))
    }

    /// Step with a discrete action index (0 straight, 1 right, 2 left)
    pub fn step_index(&mut self, action_idx: usize) -> Result<(i32, bool, u32), GameError> {
        self.step(Action::from_index(action_idx))
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.state)
    }

    /// Read access to the live episode
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &GameEngine<F> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine<F> {
        &mut self.engine
    }

    /// Swap in a hand-built state, e.g. to replay a known position
    pub fn load_state(&mut self, state: GameState) {
        self.state = state;
    }
}

use std::io;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::GameError,
    food::FoodPlacer,
    grid::Grid,
    sensor,
    state::{GameState, Snake, Termination},
};

/// Display and event collaborator of the engine.
///
/// The engine never talks to a screen directly: it asks the frontend for
/// pending events at the start of a step and hands it the finished state at
/// the end.
pub trait Frontend {
    /// Drain queued UI events. Returns true when the user asked to quit.
    fn drain_events(&mut self) -> bool {
        false
    }

    /// Draw a settled state
    fn present(&mut self, state: &GameState) -> io::Result<()>;
}

/// Frontend for running without any display
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl Frontend for Headless {
    fn present(&mut self, _state: &GameState) -> io::Result<()> {
        Ok(())
    }
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the episode ended, if it did
    pub termination: Option<Termination>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub reward: i32,
    pub terminated: bool,
    pub score: u32,
    pub info: StepInfo,
}

impl StepOutcome {
    /// The `(reward, terminated, score)` triple handed to agents
    pub fn triple(&self) -> (i32, bool, u32) {
        (self.reward, self.terminated, self.score)
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<F: Frontend = Headless, R: Rng = StdRng> {
    config: GameConfig,
    grid: Grid,
    food: FoodPlacer<R>,
    frontend: F,
}

impl GameEngine<Headless, StdRng> {
    /// Create a headless engine. Food is seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_frontend(config, Headless)
    }

    /// Create a headless engine with a fixed food seed
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config.with_seed(seed))
    }
}

impl<F: Frontend> GameEngine<F, StdRng> {
    pub fn with_frontend(config: GameConfig, frontend: F) -> Result<Self, GameError> {
        let food = FoodPlacer::seeded(config.seed, config.food_attempts);
        Self::from_parts(config, food, frontend)
    }
}

impl<F: Frontend, R: Rng> GameEngine<F, R> {
    /// Assemble an engine from an explicit food placer and frontend
    pub fn from_parts(
        config: GameConfig,
        food: FoodPlacer<R>,
        frontend: F,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::from_config(&config),
            config,
            food,
            frontend,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// Start a fresh episode: centred snake heading right, new food, score 0
    pub fn reset(&mut self) -> Result<GameState, GameError> {
        let snake = Snake::new(
            self.grid.center(),
            Direction::Right,
            self.config.initial_length,
            self.grid.block_size,
        );
        let food = self.food.place(&self.grid, &snake)?;

        debug!(head = ?snake.head(), ?food, "episode reset");
        Ok(GameState::new(snake, food, self.grid))
    }

    /// Draw `state` through the frontend outside of a step
    pub fn present(&mut self, state: &GameState) -> Result<(), GameError> {
        self.frontend.present(state)?;
        Ok(())
    }

    /// Advance the game by one tick.
    ///
    /// Crashes and stalls are reported in the outcome. Errors are reserved
    /// for a quit request from the frontend, a failing frontend, or a board
    /// with no room left for food. A quit or a full board leaves `state`
    /// exactly as it was.
    ///
    /// Geometry comes from `state.grid`, the same grid the danger sensor
    /// reads, so a loaded state with its own board stays consistent.
    pub fn step(
        &mut self,
        state: &mut GameState,
        action: Action,
    ) -> Result<StepOutcome, GameError> {
        if state.terminated {
            return Ok(StepOutcome {
                reward: 0,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    termination: None,
                },
            });
        }

        if self.frontend.drain_events() {
            debug!(frame = state.frame + 1, "frontend requested quit");
            return Err(GameError::QuitRequested);
        }

        let grid = state.grid;
        let previous_direction = state.snake.direction;
        let previous_velocity = state.velocity;

        state.frame += 1;

        // The watchdog budget is taken from the length before this move
        let stall_limit = self.config.stall_factor.saturating_mul(state.snake.len() as u32);

        let direction = previous_direction.turned(action);
        state.snake.direction = direction;
        state.velocity.record(direction);

        let new_head = grid.neighbor(state.snake.head(), direction);
        state.snake.advance(new_head);

        if let Some(termination) = self.check_termination(state, stall_limit) {
            state.terminated = true;
            debug!(
                ?termination,
                frame = state.frame,
                score = state.score,
                "episode terminated"
            );
            self.frontend.present(state)?;

            return Ok(StepOutcome {
                reward: self.config.death_penalty,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    termination: Some(termination),
                },
            });
        }

        let ate_food = new_head == state.food;
        let reward = if ate_food {
            match self.food.place(&grid, &state.snake) {
                Ok(food) => {
                    state.food = food;
                    state.score += 1;
                    self.config.food_reward
                }
                Err(err) => {
                    state.snake.retract();
                    state.snake.direction = previous_direction;
                    state.velocity = previous_velocity;
                    state.frame -= 1;
                    debug!(frame = state.frame + 1, %err, "step rolled back");
                    return Err(err);
                }
            }
        } else {
            state.snake.shrink();
            0
        };

        trace!(
            frame = state.frame,
            ?action,
            head = ?new_head,
            ate_food,
            "step"
        );
        self.frontend.present(state)?;

        Ok(StepOutcome {
            reward,
            terminated: false,
            score: state.score,
            info: StepInfo {
                ate_food,
                termination: None,
            },
        })
    }

    /// Check the freshly prepended head against walls, body and the watchdog
    fn check_termination(&self, state: &GameState, stall_limit: u32) -> Option<Termination> {
        let head = state.snake.head();

        if !state.grid.is_in_bounds(head) {
            return Some(Termination::Wall);
        }

        if sensor::is_collision(state, head) {
            return Some(Termination::SelfCollision);
        }

        if state.frame > stall_limit {
            return Some(Termination::Stalled);
        }

        None
    }
}

//! Headless mode: drives episodes with a simple built-in agent
//!
//! The agent only sees what any external controller would see: the
//! observation vector and the current heading. It picks uniformly among the
//! relative actions whose target cell the danger features mark as safe.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, trace};

use crate::agent::{Observation, SnakeEnvironment};
use crate::game::{Action, Direction, Frontend, GameConfig, GameState};
use crate::metrics::GameMetrics;

/// Configuration for headless mode
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of episodes to play
    pub episodes: usize,
    /// Wait between steps at the configured tick rate
    pub paced: bool,
    pub game_config: GameConfig,
}

impl HeadlessConfig {
    pub fn new(episodes: usize, game_config: GameConfig) -> Self {
        Self {
            episodes,
            paced: false,
            game_config,
        }
    }
}

/// Frontend without a display whose only event is an external quit flag
#[derive(Debug, Clone, Default)]
pub struct SignalFrontend {
    quit: Arc<AtomicBool>,
}

impl SignalFrontend {
    pub fn new(quit: Arc<AtomicBool>) -> Self {
        Self { quit }
    }
}

impl Frontend for SignalFrontend {
    fn drain_events(&mut self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    fn present(&mut self, state: &GameState) -> io::Result<()> {
        trace!(
            frame = state.frame,
            score = state.score,
            length = state.snake.len(),
            "frame"
        );
        Ok(())
    }
}

/// Random agent that avoids moves flagged as dangerous
pub struct CautiousAgent {
    rng: StdRng,
}

impl CautiousAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn choose(&mut self, observation: &Observation, heading: Direction) -> Action {
        let safe: Vec<Action> = Action::ALL
            .into_iter()
            .filter(|action| !is_dangerous(observation, heading.turned(*action)))
            .collect();

        safe.choose(&mut self.rng).copied().unwrap_or(Action::Straight)
    }
}

/// Read the danger flag for an absolute direction out of the observation
fn is_dangerous(observation: &Observation, direction: Direction) -> bool {
    let idx = match direction {
        Direction::Left => 0,
        Direction::Right => 1,
        Direction::Up => 2,
        Direction::Down => 3,
    };
    observation.0[idx] != 0
}

pub struct HeadlessMode {
    config: HeadlessConfig,
    metrics: GameMetrics,
    quit: Arc<AtomicBool>,
}

impl HeadlessMode {
    pub fn new(config: HeadlessConfig) -> Self {
        Self {
            config,
            metrics: GameMetrics::new(),
            quit: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that makes the next step report a quit
    pub fn quit_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    /// Play all episodes. A quit request ends the run with
    /// [`GameError::QuitRequested`](crate::game::GameError::QuitRequested).
    pub async fn run(&mut self) -> Result<()> {
        let quit = self.quit_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                quit.store(true, Ordering::Relaxed);
            }
        });

        let game_config = self.config.game_config.clone();
        let mut agent = CautiousAgent::new(game_config.seed.map(|s| s.wrapping_add(1)));
        let frontend = SignalFrontend::new(self.quit_handle());
        let mut env = SnakeEnvironment::new(game_config.clone(), frontend)
            .context("Failed to create environment")?;

        let mut pacer = self.config.paced.then(|| {
            interval(Duration::from_secs_f64(1.0 / f64::from(game_config.tick_rate)))
        });

        info!(
            episodes = self.config.episodes,
            width = game_config.width,
            height = game_config.height,
            "starting headless run"
        );

        for episode in 1..=self.config.episodes {
            let mut observation = env.reset()?;
            self.metrics.on_game_start();

            loop {
                if let Some(pacer) = pacer.as_mut() {
                    pacer.tick().await;
                }

                let action = agent.choose(&observation, env.state().direction());
                let result = env.step(action);
                let (_reward, terminated, score) = match result {
                    Ok(triple) => triple,
                    Err(err) => {
                        if err.is_quit() {
                            info!(episode, "quit requested, {}", self.metrics.format_summary());
                        }
                        return Err(err.into());
                    }
                };

                if terminated {
                    let frames = env.state().frame;
                    self.metrics.on_game_over(score, frames);
                    self.metrics.update();
                    info!(
                        episode,
                        score,
                        frames,
                        elapsed = %self.metrics.format_time(),
                        "episode finished"
                    );
                    break;
                }

                observation = env.observation();
            }

            // Let the signal watcher run between episodes
            tokio::task::yield_now().await;
            debug!(episode, high_score = self.metrics.high_score, "episode recorded");
        }

        info!("{}", self.metrics.format_summary());
        Ok(())
    }
}

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stderr;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::game::{Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::render::TerminalFrontend;

/// Keyboard-driven play in the terminal
pub struct HumanMode {
    config: GameConfig,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Reject a bad board before touching the terminal
        self.config.validate().context("Invalid game configuration")?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let frontend = TerminalFrontend::new(terminal);
        let mut engine = GameEngine::with_frontend(self.config.clone(), frontend)
            .context("Failed to create game engine")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut engine).await;

        let metrics = engine.frontend().metrics();
        info!(
            games = metrics.games_played,
            high_score = metrics.high_score,
            "leaving terminal session"
        );

        Self::cleanup_terminal(engine.frontend_mut())?;

        result
    }

    async fn run_game_loop(&mut self, engine: &mut GameEngine<TerminalFrontend>) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_secs_f64(1.0 / f64::from(self.config.tick_rate));
        let mut tick_timer = interval(tick_interval);

        let mut state = engine.reset().context("Failed to start game")?;
        engine.frontend_mut().start_game();
        engine.present(&state).context("Failed to draw frame")?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, engine, &mut state)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !state.terminated {
                        self.update_game(engine, &mut state)?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(
        &mut self,
        event: Event,
        engine: &mut GameEngine<TerminalFrontend>,
        state: &mut GameState,
    ) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => {
                        self.pending_direction = Some(direction);
                    }
                    KeyAction::Restart => {
                        *state = engine.reset().context("Failed to restart game")?;
                        engine.frontend_mut().start_game();
                        self.pending_direction = None;
                        engine.present(state).context("Failed to draw frame")?;
                    }
                    KeyAction::Quit => {
                        self.should_quit = true;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Resize(_, _) => {
                engine.present(state).context("Failed to draw frame")?;
            }
            _ => {}
        }

        Ok(())
    }

    fn update_game(
        &mut self,
        engine: &mut GameEngine<TerminalFrontend>,
        state: &mut GameState,
    ) -> Result<()> {
        let action = self
            .input_handler
            .resolve(state.direction(), self.pending_direction.take());

        let outcome = engine.step(state, action).context("Game step failed")?;

        if outcome.terminated {
            info!(
                score = outcome.score,
                frames = state.frame,
                termination = ?outcome.info.termination,
                "game over"
            );
        }

        Ok(())
    }

    fn cleanup_terminal(frontend: &mut TerminalFrontend) -> Result<()> {
        let terminal = frontend.terminal_mut();
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_initialization() {
        let mode = HumanMode::new(GameConfig::default());
        assert!(!mode.should_quit);
        assert!(mode.pending_direction.is_none());
        assert_eq!(mode.config.tick_rate, 20);
    }
}

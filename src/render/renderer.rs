use std::io::{self, Stderr};

use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Frontend, GameState};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the board horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.terminated {
            let game_over = self.render_game_over(game_area, state);
            frame.render_widget(game_over, game_area);
        } else {
            let board = self.render_board(game_area, state);
            frame.render_widget(board, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_board(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let grid = state.grid;
        let head = state.head();
        let mut lines = Vec::with_capacity(grid.rows() as usize);

        for row in 0..grid.rows() {
            let spans: Vec<Span> = (0..grid.columns())
                .map(|column| {
                    let cell = grid.cell_at(column, row);
                    if cell == head {
                        Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Blue)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if state.snake.is_occupied(cell, false) {
                        Span::styled("□ ", Style::default().fg(Color::LightBlue))
                    } else if cell == state.food {
                        Span::styled(
                            "● ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Frame: ", label),
            Span::styled(state.frame.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Frontend that draws every settled state to the terminal
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    metrics: GameMetrics,
}

impl TerminalFrontend {
    pub fn new(terminal: Terminal<CrosstermBackend<Stderr>>) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
            metrics: GameMetrics::new(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stderr>> {
        &mut self.terminal
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    /// Begin a fresh game on the scoreboard
    pub fn start_game(&mut self) {
        self.metrics.on_game_start();
    }
}

impl Frontend for TerminalFrontend {
    fn present(&mut self, state: &GameState) -> io::Result<()> {
        if !state.terminated {
            self.metrics.on_progress(state.score, state.frame);
        } else if self.metrics.is_game_running() {
            self.metrics.on_game_over(state.score, state.frame);
        }
        self.metrics.update();

        let renderer = &self.renderer;
        let metrics = &self.metrics;
        self.terminal
            .draw(|frame| renderer.render(frame, state, metrics))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::backend::TestBackend;

    fn draw(state: &GameState) -> String {
        let backend = TestBackend::new(90, 34);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, state, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_board_shows_snake_and_food() {
        let mut engine = GameEngine::with_seed(GameConfig::new(200, 200), 9).unwrap();
        let state = engine.reset().unwrap();

        let screen = draw(&state);

        assert!(screen.contains("Score:"));
        assert_eq!(screen.matches('■').count(), 1);
        assert_eq!(screen.matches('□').count(), 2);
        assert_eq!(screen.matches('●').count(), 1);
    }

    #[test]
    fn test_game_over_screen() {
        let mut engine = GameEngine::with_seed(GameConfig::new(200, 200), 9).unwrap();
        let mut state = engine.reset().unwrap();
        state.terminated = true;

        let screen = draw(&state);

        assert!(screen.contains("GAME OVER"));
    }
}

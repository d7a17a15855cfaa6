use std::collections::{HashSet, VecDeque};

use super::action::Direction;
use super::error::GameError;
use super::grid::Grid;

/// A cell on the board, addressed by its top-left corner in logical units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True if `other` shares an edge with this cell
    pub fn is_adjacent(&self, other: Cell, block_size: i32) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        (dx == block_size && dy == 0) || (dx == 0 && dy == block_size)
    }
}

/// The snake: an ordered run of cells, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake of `length` cells trailing behind `head`
    pub fn new(head: Cell, direction: Direction, length: usize, block_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx * block_size, -dy * block_size);

        let body = std::iter::successors(Some(head), |cell| Some(cell.moved_by(back_dx, back_dy)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first.
    ///
    /// The cells must be non-empty, pairwise distinct and edge-contiguous.
    pub fn from_cells(
        cells: impl IntoIterator<Item = Cell>,
        direction: Direction,
        block_size: i32,
    ) -> Result<Self, GameError> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return Err(GameError::InvalidSnake("snake has no cells".to_string()));
        }

        let mut seen = HashSet::with_capacity(body.len());
        if let Some(dup) = body.iter().find(|cell| !seen.insert(**cell)) {
            return Err(GameError::InvalidSnake(format!(
                "cell ({}, {}) appears twice",
                dup.x, dup.y
            )));
        }

        if let Some((a, b)) = body
            .iter()
            .zip(body.iter().skip(1))
            .find(|(a, b)| !a.is_adjacent(**b, block_size))
        {
            return Err(GameError::InvalidSnake(format!(
                "cells ({}, {}) and ({}, {}) are not adjacent",
                a.x, a.y, b.x, b.y
            )));
        }

        Ok(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// All cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Membership test against the body, optionally skipping the head
    pub fn is_occupied(&self, cell: Cell, include_head: bool) -> bool {
        let skip = if include_head { 0 } else { 1 };
        self.body.iter().skip(skip).any(|c| *c == cell)
    }

    /// Prepend a new head
    pub fn advance(&mut self, new_head: Cell) {
        self.body.push_front(new_head);
    }

    /// Undo the last `advance`
    pub fn retract(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_front();
        }
    }

    /// Drop the tail segment
    pub fn shrink(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// True if no cell appears twice
    pub fn has_unique_cells(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.body.len());
        self.body.iter().all(|cell| seen.insert(*cell))
    }
}

/// Per-axis velocity of the last move.
///
/// Only the axis of the latest move is written; the other keeps whatever it
/// held before. Agents trained against this encoding expect that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
}

impl Velocity {
    pub fn record(&mut self, direction: Direction) {
        match direction {
            Direction::Right => self.x = 1,
            Direction::Left => self.x = -1,
            Direction::Down => self.y = 1,
            Direction::Up => self.y = -1,
        }
    }
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Frame counter outran the stall watchdog
    Stalled,
}

/// Lifecycle phase of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated,
}

/// Complete game state for one episode
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub grid: Grid,
    pub velocity: Velocity,
    pub score: u32,
    /// Steps since the last reset
    pub frame: u32,
    pub terminated: bool,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Cell, grid: Grid) -> Self {
        Self {
            snake,
            food,
            grid,
            velocity: Velocity::default(),
            score: 0,
            frame: 0,
            terminated: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.terminated {
            Phase::Terminated
        } else {
            Phase::Running
        }
    }

    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    /// Check if a position is occupied by the snake, head included
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.is_occupied(cell, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(100, 100);
        assert_eq!(cell.moved_by(20, 0), Cell::new(120, 100));
        assert_eq!(cell.moved_by(-20, 0), Cell::new(80, 100));
        assert_eq!(cell.moved_by(0, 20), Cell::new(100, 120));
        assert_eq!(cell.moved_by(0, -20), Cell::new(100, 80));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(320, 240), Direction::Right, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(320, 240));
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            vec![
                Cell::new(320, 240),
                Cell::new(300, 240),
                Cell::new(280, 240)
            ]
        );
        assert_eq!(snake.tail(), Cell::new(280, 240));
    }

    #[test]
    fn test_advance_and_shrink() {
        let mut snake = Snake::new(Cell::new(100, 100), Direction::Right, 3, 20);

        snake.advance(Cell::new(120, 100));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(120, 100));

        snake.shrink();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(80, 100));

        snake.advance(Cell::new(120, 120));
        snake.retract();
        assert_eq!(snake.head(), Cell::new(120, 100));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_occupancy_with_and_without_head() {
        let snake = Snake::new(Cell::new(100, 100), Direction::Right, 3, 20);
        assert!(snake.is_occupied(Cell::new(100, 100), true));
        assert!(!snake.is_occupied(Cell::new(100, 100), false));
        assert!(snake.is_occupied(Cell::new(80, 100), false));
        assert!(snake.is_occupied(Cell::new(60, 100), false));
        assert!(!snake.is_occupied(Cell::new(200, 200), true));
    }

    #[test]
    fn test_from_cells_validation() {
        let ok = Snake::from_cells(
            [Cell::new(20, 0), Cell::new(0, 0), Cell::new(0, 20)],
            Direction::Right,
            20,
        );
        assert!(ok.is_ok());

        let gap = Snake::from_cells([Cell::new(40, 0), Cell::new(0, 0)], Direction::Right, 20);
        assert!(matches!(gap, Err(GameError::InvalidSnake(_))));

        let diagonal =
            Snake::from_cells([Cell::new(20, 20), Cell::new(0, 0)], Direction::Right, 20);
        assert!(diagonal.is_err());

        let empty = Snake::from_cells(Vec::<Cell>::new(), Direction::Right, 20);
        assert!(empty.is_err());

        let dup = Snake::from_cells(
            [Cell::new(0, 0), Cell::new(20, 0), Cell::new(0, 0)],
            Direction::Left,
            20,
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_velocity_keeps_orthogonal_axis() {
        let mut velocity = Velocity::default();
        velocity.record(Direction::Right);
        assert_eq!(velocity, Velocity { x: 1, y: 0 });

        velocity.record(Direction::Down);
        assert_eq!(velocity, Velocity { x: 1, y: 1 });

        velocity.record(Direction::Left);
        assert_eq!(velocity, Velocity { x: -1, y: 1 });

        velocity.record(Direction::Up);
        assert_eq!(velocity, Velocity { x: -1, y: -1 });
    }

    #[test]
    fn test_phase() {
        let grid = Grid::new(200, 200, 20);
        let snake = Snake::new(Cell::new(100, 100), Direction::Right, 3, 20);
        let mut state = GameState::new(snake, Cell::new(0, 0), grid);
        assert_eq!(state.phase(), Phase::Running);

        state.terminated = true;
        assert_eq!(state.phase(), Phase::Terminated);
    }
}

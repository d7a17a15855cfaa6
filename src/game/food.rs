use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::warn;

use super::error::GameError;
use super::grid::Grid;
use super::state::{Cell, Snake};

/// Picks food cells uniformly among the cells the snake does not cover
#[derive(Debug, Clone)]
pub struct FoodPlacer<R: Rng = StdRng> {
    rng: R,
    max_attempts: usize,
}

impl FoodPlacer<StdRng> {
    /// Seeded placer; `None` seeds from OS entropy
    pub fn seeded(seed: Option<u64>, max_attempts: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, max_attempts)
    }
}

impl<R: Rng> FoodPlacer<R> {
    pub fn new(rng: R, max_attempts: usize) -> Self {
        Self {
            rng,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Choose a cell not covered by any part of `snake`, head included.
    ///
    /// Samples the whole board up to `max_attempts` times, then falls back to
    /// choosing among the enumerated free cells so crowded boards still
    /// terminate.
    pub fn place(&mut self, grid: &Grid, snake: &Snake) -> Result<Cell, GameError> {
        for _ in 0..self.max_attempts {
            let candidate = self.sample(grid);
            if !snake.is_occupied(candidate, true) {
                return Ok(candidate);
            }
        }

        let free: Vec<Cell> = grid
            .cells()
            .filter(|cell| !snake.is_occupied(*cell, true))
            .collect();
        warn!(
            attempts = self.max_attempts,
            free_cells = free.len(),
            "random food placement exhausted, scanning free cells"
        );
        free.choose(&mut self.rng).copied().ok_or(GameError::BoardFull)
    }

    fn sample(&mut self, grid: &Grid) -> Cell {
        let column = self.rng.gen_range(0..grid.columns());
        let row = self.rng.gen_range(0..grid.rows());
        grid.cell_at(column, row)
    }
}

use super::action::Direction;
use super::config::GameConfig;
use super::state::Cell;

/// Board geometry: a `width` x `height` area cut into square blocks.
///
/// Cells are addressed by the logical coordinates of their top-left corner,
/// so every valid cell is a multiple of `block_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub block_size: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, block_size: i32) -> Self {
        Self {
            width,
            height,
            block_size,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.width, config.height, config.block_size)
    }

    pub fn columns(&self) -> i32 {
        self.width / self.block_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.block_size
    }

    pub fn cell_count(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    /// True iff the whole footprint of `cell` lies on the board
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x <= self.width - self.block_size
            && cell.y >= 0
            && cell.y <= self.height - self.block_size
    }

    /// Cell at a column/row index
    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.block_size, row * self.block_size)
    }

    /// Block-aligned cell closest to the board centre
    pub fn center(&self) -> Cell {
        self.cell_at(self.columns() / 2, self.rows() / 2)
    }

    /// Neighbour one block away in `direction`; may be off the board
    pub fn neighbor(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        cell.moved_by(dx * self.block_size, dy * self.block_size)
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| self.cell_at(col, row))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count() {
        let grid = Grid::new(640, 480, 20);
        assert_eq!(grid.columns(), 32);
        assert_eq!(grid.rows(), 24);
        assert_eq!(grid.cell_count(), 768);
        assert_eq!(grid.cells().count(), 768);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(640, 480, 20);

        assert!(grid.is_in_bounds(Cell::new(0, 0)));
        assert!(grid.is_in_bounds(Cell::new(620, 460)));
        assert!(!grid.is_in_bounds(Cell::new(640, 0)));
        assert!(!grid.is_in_bounds(Cell::new(0, 480)));
        assert!(!grid.is_in_bounds(Cell::new(-20, 0)));
        assert!(!grid.is_in_bounds(Cell::new(0, -20)));
        // Footprint would hang over the right edge
        assert!(!grid.is_in_bounds(Cell::new(630, 0)));
    }

    #[test]
    fn test_center_is_block_aligned() {
        assert_eq!(Grid::new(640, 480, 20).center(), Cell::new(320, 240));
        assert_eq!(Grid::new(660, 500, 20).center(), Cell::new(320, 240));
    }

    #[test]
    fn test_neighbor() {
        let grid = Grid::new(640, 480, 20);
        let cell = Cell::new(100, 100);
        assert_eq!(grid.neighbor(cell, Direction::Right), Cell::new(120, 100));
        assert_eq!(grid.neighbor(cell, Direction::Left), Cell::new(80, 100));
        assert_eq!(grid.neighbor(cell, Direction::Up), Cell::new(100, 80));
        assert_eq!(grid.neighbor(cell, Direction::Down), Cell::new(100, 120));
    }

    #[test]
    fn test_cells_are_in_bounds() {
        let grid = Grid::new(100, 60, 20);
        assert!(grid.cells().all(|cell| grid.is_in_bounds(cell)));
    }
}

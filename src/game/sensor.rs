use super::action::Direction;
use super::state::{Cell, GameState};

/// Collision risk one block ahead in each absolute direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Danger {
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
}

impl Danger {
    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Right => self.right,
            Direction::Left => self.left,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Flags in fixed order: right, left, up, down
    pub fn as_tuple(&self) -> (bool, bool, bool, bool) {
        (self.right, self.left, self.up, self.down)
    }
}

/// Would the head crash if it moved to `cell` right now?
///
/// Out of bounds or on the body (head excluded) counts as a crash.
pub fn is_collision(state: &GameState, cell: Cell) -> bool {
    !state.grid.is_in_bounds(cell) || state.snake.is_occupied(cell, false)
}

/// Evaluate every absolute direction from the current head
pub fn danger_ahead(state: &GameState) -> Danger {
    let head = state.head();
    let probe = |direction| is_collision(state, state.grid.neighbor(head, direction));

    Danger {
        right: probe(Direction::Right),
        left: probe(Direction::Left),
        up: probe(Direction::Up),
        down: probe(Direction::Down),
    }
}

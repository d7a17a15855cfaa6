use tracing::debug;

/// Absolute heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Clockwise ordering used to resolve relative turns
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Returns the unit delta (dx, dy) for moving in this direction.
    /// Screen coordinates: y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    fn clockwise_index(&self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    /// Heading after applying a relative action
    pub fn turned(&self, action: Action) -> Direction {
        let idx = self.clockwise_index();
        let next = match action {
            Action::Straight => idx,
            Action::TurnRight => (idx + 1) % 4,
            Action::TurnLeft => (idx + 3) % 4,
        };
        Self::CLOCKWISE[next]
    }
}

/// Relative move chosen once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    Straight,
    TurnRight,
    TurnLeft,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Straight, Action::TurnRight, Action::TurnLeft];

    /// Decode a 3-element one-hot vector `[straight, right, left]`.
    ///
    /// Anything that is not exactly one-hot falls back to `Straight`.
    pub fn from_one_hot(encoded: &[u8]) -> Action {
        match encoded {
            [1, 0, 0] => Action::Straight,
            [0, 1, 0] => Action::TurnRight,
            [0, 0, 1] => Action::TurnLeft,
            other => {
                debug!(?other, "malformed action encoding, moving straight");
                Action::Straight
            }
        }
    }

    /// Decode a discrete action index (0 straight, 1 right, 2 left).
    pub fn from_index(idx: usize) -> Action {
        match Self::ALL.get(idx) {
            Some(action) => *action,
            None => {
                debug!(idx, "action index out of range, moving straight");
                Action::Straight
            }
        }
    }

    pub fn one_hot(&self) -> [u8; 3] {
        match self {
            Action::Straight => [1, 0, 0],
            Action::TurnRight => [0, 1, 0],
            Action::TurnLeft => [0, 0, 1],
        }
    }

    /// Relative action that steers `current` towards `desired`.
    ///
    /// A reversal cannot be expressed as one turn, so it maps to `Straight`.
    pub fn toward(current: Direction, desired: Direction) -> Action {
        Self::ALL
            .into_iter()
            .find(|action| current.turned(*action) == desired)
            .unwrap_or(Action::Straight)
    }
}

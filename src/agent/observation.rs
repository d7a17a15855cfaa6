use crate::game::{GameState, danger_ahead};

/// Number of features in an [`Observation`]
pub const OBSERVATION_LEN: usize = 14;

/// Feature vector handed to an external agent.
///
/// Layout:
/// - 0..4: danger left, right, up, down (0/1)
/// - 4..6: x velocity, y velocity (-1/0/1)
/// - 6..10: food is left of, right of, above, below the head (0/1)
/// - 10..12: head x, head y
/// - 12..14: food x, food y
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation(pub [i32; OBSERVATION_LEN]);

impl Observation {
    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    /// Features as floats, for agents that want them
    pub fn as_f32(&self) -> [f32; OBSERVATION_LEN] {
        self.0.map(|v| v as f32)
    }
}

/// Project the game state onto the observation vector
pub fn create_observation(state: &GameState) -> Observation {
    let danger = danger_ahead(state);
    let head = state.head();
    let food = state.food;
    let flag = |b: bool| i32::from(b);

    Observation([
        flag(danger.left),
        flag(danger.right),
        flag(danger.up),
        flag(danger.down),
        state.velocity.x,
        state.velocity.y,
        flag(food.x < head.x),
        flag(food.x > head.x),
        flag(food.y < head.y),
        flag(food.y > head.y),
        head.x,
        head.y,
        food.x,
        food.y,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Grid, Snake, Velocity};

    fn state(cells: &[(i32, i32)], direction: Direction, food: (i32, i32)) -> GameState {
        let grid = Grid::new(640, 480, 20);
        let snake = Snake::from_cells(
            cells.iter().map(|&(x, y)| Cell::new(x, y)),
            direction,
            20,
        )
        .unwrap();
        GameState::new(snake, Cell::new(food.0, food.1), grid)
    }

    #[test]
    fn test_fresh_state_observation() {
        let state = state(
            &[(320, 240), (300, 240), (280, 240)],
            Direction::Right,
            (100, 400),
        );

        let obs = create_observation(&state);

        assert_eq!(
            obs.0,
            [1, 0, 0, 0, 0, 0, 1, 0, 0, 1, 320, 240, 100, 400]
        );
    }

    #[test]
    fn test_wall_dangers_in_corner() {
        let state = state(&[(0, 0), (20, 0), (40, 0)], Direction::Left, (300, 0));

        let obs = create_observation(&state);

        // left wall, right neck, up wall, down free
        assert_eq!(&obs.0[0..4], &[1, 1, 1, 0]);
        // food is to the right on the same row
        assert_eq!(&obs.0[6..10], &[0, 1, 0, 0]);
    }

    #[test]
    fn test_velocity_is_copied() {
        let mut state = state(&[(320, 240), (300, 240), (280, 240)], Direction::Right, (0, 0));
        state.velocity = Velocity { x: 1, y: -1 };

        let obs = create_observation(&state);
        assert_eq!(obs.0[4], 1);
        assert_eq!(obs.0[5], -1);
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let state = state(&[(320, 240), (300, 240), (280, 240)], Direction::Right, (0, 0));

        assert_eq!(create_observation(&state), create_observation(&state));
    }

    #[test]
    fn test_as_f32() {
        let state = state(&[(320, 240), (300, 240), (280, 240)], Direction::Right, (0, 0));
        let obs = create_observation(&state);
        let floats = obs.as_f32();

        assert_eq!(floats.len(), OBSERVATION_LEN);
        assert_eq!(floats[10], 320.0);
        assert_eq!(obs.as_slice().len(), OBSERVATION_LEN);
    }
}

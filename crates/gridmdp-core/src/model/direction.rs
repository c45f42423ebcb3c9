use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four compass moves available in every open cell.
///
/// Movement vectors are `(dx, dy)` with `x` along columns and `y` along rows,
/// rows growing downward, so `Up` decreases the row index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Canonical enumeration order; greedy selection breaks ties by it.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Unit movement vector `(dx, dy)`.
    pub fn vector(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// Arrow used when printing a policy.
    pub fn glyph(self) -> char {
        match self {
            Direction::Left => '←',
            Direction::Up => '↑',
            Direction::Right => '→',
            Direction::Down => '↓',
        }
    }

    pub fn rotate_clockwise(self) -> Self {
        match self {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
        }
    }

    pub fn rotate_anticlockwise(self) -> Self {
        match self {
            Direction::Left => Direction::Down,
            Direction::Up => Direction::Left,
            Direction::Right => Direction::Up,
            Direction::Down => Direction::Right,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

use serde::{Deserialize, Serialize};

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum State {
    /// Impassable cell. Moves into it bounce back to the origin.
    Wall,
    /// Traversable cell paying `reward` on every visit.
    /// Terminal cells are absorbing: their utility is pinned to `reward`.
    Open { reward: f64, terminal: bool },
}

impl State {
    /// Create an ordinary traversable cell.
    pub fn open(reward: f64) -> Self {
        State::Open {
            reward,
            terminal: false,
        }
    }

    /// Create an absorbing cell.
    pub fn terminal(reward: f64) -> Self {
        State::Open {
            reward,
            terminal: true,
        }
    }

    pub fn wall() -> Self {
        State::Wall
    }

    /// Reward collected in this cell. Walls report `0.0`.
    pub fn reward(&self) -> f64 {
        match self {
            State::Wall => 0.0,
            State::Open { reward, .. } => *reward,
        }
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, State::Wall)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Open { terminal: true, .. })
    }
}

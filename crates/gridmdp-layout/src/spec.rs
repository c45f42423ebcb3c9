use gridmdp_core::{Grid, State};
use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Reward of a plain tile when a layout does not override it.
pub const DEFAULT_REWARD: f64 = -0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Serializable grid layout used for YAML IO and validation.
pub struct LayoutSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    /// Reward of `"."` cells (defaults to [`DEFAULT_REWARD`] if omitted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_reward: Option<f64>,
    /// Cells, row by row from the top.
    pub rows: Vec<Vec<CellSpec>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// One cell of a layout.
///
/// - a number is an ordinary tile with that reward,
/// - `"#"`, `"x"` or `"wall"` is a wall and `"."` a tile with the default reward
///   (quote `"#"` in YAML, it otherwise starts a comment),
/// - `{ reward, terminal }` spells a tile out, typically an absorbing one.
pub enum CellSpec {
    Reward(f64),
    Marker(String),
    Detailed {
        reward: f64,
        #[serde(default)]
        terminal: bool,
    },
}

impl CellSpec {
    fn to_state(&self, default_reward: f64, row: usize, col: usize) -> Result<State, LayoutError> {
        let state = match self {
            CellSpec::Reward(reward) => State::open(*reward),
            CellSpec::Detailed { reward, terminal } => State::Open {
                reward: *reward,
                terminal: *terminal,
            },
            CellSpec::Marker(marker) => match marker.trim() {
                "#" | "x" | "wall" => State::wall(),
                "." => State::open(default_reward),
                other => {
                    return Err(LayoutError::UnknownMarker {
                        row,
                        col,
                        marker: other.to_string(),
                    });
                }
            },
        };

        if !state.reward().is_finite() {
            return Err(LayoutError::InvalidReward {
                row,
                col,
                value: state.reward(),
            });
        }
        Ok(state)
    }
}

impl From<&State> for CellSpec {
    fn from(state: &State) -> Self {
        match *state {
            State::Wall => CellSpec::Marker("#".to_string()),
            State::Open {
                reward,
                terminal: false,
            } => CellSpec::Reward(reward),
            State::Open {
                reward,
                terminal: true,
            } => CellSpec::Detailed {
                reward,
                terminal: true,
            },
        }
    }
}

impl LayoutSpec {
    /// Describe an existing grid, e.g. to save a generated maze.
    pub fn from_grid(grid: &Grid) -> Self {
        let rows = grid
            .states()
            .chunks(grid.width())
            .map(|row| row.iter().map(CellSpec::from).collect())
            .collect();

        Self {
            version: Some(1),
            default_reward: None,
            rows,
        }
    }

    fn default_reward(&self) -> f64 {
        self.default_reward.unwrap_or(DEFAULT_REWARD)
    }

    /// Validate shape, markers and rewards.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.resolve().map(|_| ())
    }

    /// Compile this layout into a solver grid.
    pub fn compile(&self) -> Result<Grid, LayoutError> {
        let rows = self.resolve()?;
        Ok(Grid::new(rows)?)
    }

    fn resolve(&self) -> Result<Vec<Vec<State>>, LayoutError> {
        let default_reward = self.default_reward();
        if !default_reward.is_finite() {
            return Err(LayoutError::InvalidDefaultReward(default_reward));
        }

        // Grid::new rejects these too, but with less context.
        let width = self.rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut rows = Vec::with_capacity(self.rows.len());
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != width {
                return Err(LayoutError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }

            let states = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| cell.to_state(default_reward, row, col))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(states);
        }

        Ok(rows)
    }
}

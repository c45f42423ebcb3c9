use serde::Serialize;

use crate::model::direction::Direction;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Final utilities and policy handed to rendering collaborators.
///
/// Both arrays are row-major with the grid's indexing. Wall cells carry a
/// utility of `0.0` and no action.
pub struct Solution {
    pub algorithm: &'static str,
    pub iterations: usize,
    pub height: usize,
    pub width: usize,
    pub utilities: Vec<f64>,
    pub policy: Vec<Option<Direction>>,
}

impl Solution {
    pub fn utility(&self, row: usize, col: usize) -> Option<f64> {
        self.flat_index(row, col).map(|idx| self.utilities[idx])
    }

    pub fn action(&self, row: usize, col: usize) -> Option<Direction> {
        self.flat_index(row, col).and_then(|idx| self.policy[idx])
    }

    /// Utilities split into rows.
    pub fn utility_rows(&self) -> Vec<Vec<f64>> {
        self.utilities
            .chunks(self.width)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Policy split into rows.
    pub fn policy_rows(&self) -> Vec<Vec<Option<Direction>>> {
        self.policy.chunks(self.width).map(<[_]>::to_vec).collect()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn flat_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }
}

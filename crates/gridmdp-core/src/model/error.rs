use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
/// Error type for grid construction.
pub enum GridError {
    #[error("grid must contain at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) has non-finite reward {value}")]
    NonFiniteReward { row: usize, col: usize, value: f64 },
}

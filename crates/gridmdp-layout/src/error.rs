use gridmdp_core::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for layout loading, validation, compilation, and builder operations.
pub enum LayoutError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("layout must contain at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell marker '{marker}' at ({row}, {col})")]
    UnknownMarker {
        row: usize,
        col: usize,
        marker: String,
    },

    #[error("invalid reward at ({row}, {col}): {value}")]
    InvalidReward { row: usize, col: usize, value: f64 },

    #[error("default reward must be finite, got {0}")]
    InvalidDefaultReward(f64),

    #[error("builder referenced cell ({row}, {col}) outside a {height}x{width} layout")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("random layout ratios must be within [0, 1] and sum to at most 1")]
    InvalidRatios,

    #[error(transparent)]
    Grid(#[from] GridError),
}

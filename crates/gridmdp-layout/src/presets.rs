use gridmdp_core::Grid;

use crate::{LayoutError, LayoutSpec};

const TEST_MAZE_YAML: &str = include_str!("../layouts/test_maze.yaml");
const ASSIGNMENT_MAZE_YAML: &str = include_str!("../layouts/assignment_maze.yaml");

fn compile_bundled(yaml: &str) -> Result<Grid, LayoutError> {
    let spec: LayoutSpec = serde_yaml::from_str(yaml)?;
    spec.compile()
}

/// 3x4 world with absorbing `+1`/`-1` cells in the top row and a wall at (1, 1).
pub fn test_maze() -> Result<Grid, LayoutError> {
    compile_bundled(TEST_MAZE_YAML)
}

/// 6x6 maze of `+1`/`-1` tiles on a `-0.05` floor, without absorbing cells.
pub fn assignment_maze() -> Result<Grid, LayoutError> {
    compile_bundled(ASSIGNMENT_MAZE_YAML)
}

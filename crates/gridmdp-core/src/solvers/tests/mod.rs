mod modified_policy_iteration_tests;
mod property_solver_tests;
mod value_iteration_tests;

use crate::model::{grid::Grid, state::State};

/// Reward of an ordinary tile in the assignment maze.
const STEP_REWARD: f64 = -0.05;

/// 3x4 world: terminal `+1` top right, terminal `-1` to its left, wall at (1, 1).
pub(super) fn scenario_grid() -> Grid {
    let o = || State::open(0.0);
    Grid::new(vec![
        vec![o(), o(), State::terminal(-1.0), State::terminal(1.0)],
        vec![o(), State::wall(), o(), o()],
        vec![o(), o(), o(), o()],
    ])
    .expect("scenario grid is valid")
}

/// 6x6 maze with no terminal cells.
pub(super) fn assignment_grid() -> Grid {
    let w = State::wall;
    let s = || State::open(STEP_REWARD);
    let g = || State::open(1.0);
    let b = || State::open(-1.0);
    Grid::new(vec![
        vec![g(), w(), g(), s(), s(), g()],
        vec![s(), b(), s(), g(), w(), b()],
        vec![s(), s(), b(), s(), g(), s()],
        vec![s(), s(), s(), b(), s(), g()],
        vec![s(), w(), w(), w(), b(), s()],
        vec![s(), s(), s(), s(), s(), s()],
    ])
    .expect("assignment grid is valid")
}

/// Largest absolute difference between two utility arrays.
pub(super) fn max_difference(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

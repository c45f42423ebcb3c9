pub mod config;
pub mod error;
mod linear;
pub mod mdp;
pub mod modified_policy_iteration;
pub mod policy_iteration;
pub mod solution;
pub mod value_iteration;

#[cfg(test)]
mod tests;

use crate::{
    model::{direction::Direction, grid::Grid},
    solvers::{config::SolverConfig, error::SolveError, solution::Solution},
};

/// Progress report emitted after every outer iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterationEvent<'a> {
    /// 1-based outer iteration index.
    pub iteration: usize,
    /// Largest utility change in this iteration.
    pub delta: f64,
    /// Number of cells whose action changed.
    pub policy_changes: usize,
    /// Row-major utilities after the iteration.
    pub utilities: &'a [f64],
    /// Row-major policy after the iteration. Entries for walls are meaningless.
    pub policy: &'a [Direction],
}

/// Common interface of the three solution strategies.
pub trait Solver {
    /// Short identifier used in logs and solutions.
    fn name(&self) -> &'static str;

    fn config(&self) -> &SolverConfig;

    /// Solve `grid`, invoking `on_iteration` after each outer iteration.
    fn solve_with_hook(
        &self,
        grid: &Grid,
        on_iteration: &mut dyn FnMut(&IterationEvent<'_>),
    ) -> Result<Solution, SolveError>;

    /// Solve `grid` without observing progress.
    fn solve(&self, grid: &Grid) -> Result<Solution, SolveError> {
        self.solve_with_hook(grid, &mut |_| {})
    }
}

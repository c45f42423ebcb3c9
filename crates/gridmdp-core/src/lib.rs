mod model;
mod solvers;

pub use model::direction::Direction;
pub use model::error::GridError;
pub use model::grid::Grid;
pub use model::state::State;
pub use solvers::config::SolverConfig;
pub use solvers::error::{ConfigError, SolveError};
pub use solvers::mdp::{INTENDED_PROBABILITY, Mdp, Outcome, SLIP_PROBABILITY};
pub use solvers::modified_policy_iteration::ModifiedPolicyIteration;
pub use solvers::policy_iteration::PolicyIteration;
pub use solvers::solution::Solution;
pub use solvers::value_iteration::ValueIteration;
pub use solvers::{IterationEvent, Solver};

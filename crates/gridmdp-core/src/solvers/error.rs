use thiserror::Error;

use crate::solvers::solution::Solution;

#[derive(Debug, Error)]
/// Error type for loading and validating `SolverConfig`.
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("discount must lie strictly between 0 and 1, got {0}")]
    Discount(f64),

    #[error("error tolerance must be finite and > 0, got {0}")]
    Tolerance(f64),

    #[error("max_iterations must be greater than 0")]
    ZeroIterations,

    #[error("evaluation_sweeps must be greater than 0 when set")]
    ZeroEvaluationSweeps,
}

#[derive(Debug, Error)]
/// Error type for a solve that could not produce a converged solution.
pub enum SolveError {
    /// The iteration budget ran out. `last` holds the final iterate.
    #[error("{algorithm} did not converge within {iterations} iterations (last delta {delta})")]
    DidNotConverge {
        algorithm: &'static str,
        iterations: usize,
        delta: f64,
        last: Box<Solution>,
    },

    #[error("policy evaluation failed: {0}")]
    LinearSystem(String),
}

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::solvers::error::ConfigError;

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// Parameters shared by every solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Discount factor `γ`, strictly inside `(0, 1)`.
    pub discount: f64,
    /// Tolerance on the final utilities. Sweeps stop once the largest change
    /// drops below `error * (1 - γ) / γ`. Ignored by exact policy iteration.
    pub error: f64,
    /// Upper bound on outer iterations.
    pub max_iterations: usize,
    /// Cap on evaluation sweeps per modified policy iteration step.
    /// `None` evaluates until the sweep delta drops below the threshold.
    pub evaluation_sweeps: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            discount: 0.99,
            error: 1e-4,
            max_iterations: 100_000,
            evaluation_sweeps: None,
        }
    }
}

impl SolverConfig {
    /// Default config with the given discount and tolerance.
    pub fn new(discount: f64, error: f64) -> Self {
        SolverConfig {
            discount,
            error,
            ..Self::default()
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_evaluation_sweeps(mut self, sweeps: usize) -> Self {
        self.evaluation_sweeps = Some(sweeps);
        self
    }

    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a solver config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check every parameter before any iteration starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.discount.is_finite() || self.discount <= 0.0 || self.discount >= 1.0 {
            return Err(ConfigError::Discount(self.discount));
        }
        if !self.error.is_finite() || self.error <= 0.0 {
            return Err(ConfigError::Tolerance(self.error));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.evaluation_sweeps == Some(0) {
            return Err(ConfigError::ZeroEvaluationSweeps);
        }
        Ok(())
    }

    /// Sweep-delta threshold `error * (1 - γ) / γ`.
    pub fn threshold(&self) -> f64 {
        self.error * (1.0 - self.discount) / self.discount
    }
}

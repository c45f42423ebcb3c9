use tracing::{debug, info, warn};

use crate::{
    model::grid::Grid,
    solvers::{
        IterationEvent, Solver,
        config::SolverConfig,
        error::{ConfigError, SolveError},
        mdp::Mdp,
        solution::Solution,
    },
};

/// Synchronous value iteration.
///
/// Each sweep applies the Bellman optimality backup to every open cell and
/// stops once the largest change falls below `error * (1 - γ) / γ`, which
/// keeps the utilities within `error` of optimal.
#[derive(Debug, Clone)]
pub struct ValueIteration {
    config: SolverConfig,
}

impl ValueIteration {
    pub const NAME: &'static str = "value_iteration";

    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Solver for ValueIteration {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn solve_with_hook(
        &self,
        grid: &Grid,
        on_iteration: &mut dyn FnMut(&IterationEvent<'_>),
    ) -> Result<Solution, SolveError> {
        let mut mdp = Mdp::with_discount(grid, self.config.discount);
        let threshold = self.config.threshold();
        let mut delta = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let (sweep_delta, policy_changes) = mdp.optimality_sweep();
            delta = sweep_delta;
            debug!(iteration, delta, policy_changes, "value iteration sweep");

            on_iteration(&IterationEvent {
                iteration,
                delta,
                policy_changes,
                utilities: mdp.utilities(),
                policy: mdp.policy(),
            });

            if delta < threshold {
                info!(iterations = iteration, "value iteration converged");
                return Ok(mdp.solution(Self::NAME, iteration));
            }
        }

        let iterations = self.config.max_iterations;
        warn!(iterations, delta, "value iteration exhausted its iteration budget");
        Err(SolveError::DidNotConverge {
            algorithm: Self::NAME,
            iterations,
            delta,
            last: Box::new(mdp.solution(Self::NAME, iterations)),
        })
    }
}

use tracing::{debug, info, trace, warn};

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

/// Policy iteration with approximate evaluation.
///
/// Instead of solving the linear system, each evaluation step repeats
/// synchronous backups under the fixed policy until the sweep delta drops
/// below `error * (1 - γ) / γ`, or until `evaluation_sweeps` sweeps when that
/// cap is set. Utilities carry over between outer iterations.
///
/// A solve only counts as converged once the policy is stable and the last
/// evaluation settled on the threshold; a capped evaluation that ran out of
/// sweeps is simply continued in the next outer iteration.
#[derive(Debug, Clone)]
pub struct ModifiedPolicyIteration {
    config: SolverConfig,
}

impl ModifiedPolicyIteration {
    pub const NAME: &'static str = "modified_policy_iteration";

    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Approximate evaluation of the current policy.
    fn evaluate(&self, mdp: &mut Mdp<'_>) -> Evaluation {
        let threshold = self.config.threshold();
        let mut evaluation = Evaluation {
            sweeps: 0,
            largest_delta: 0.0,
            settled: false,
        };

        loop {
            let delta = mdp.evaluation_sweep();
            evaluation.sweeps += 1;
            evaluation.largest_delta = evaluation.largest_delta.max(delta);
            trace!(sweeps = evaluation.sweeps, delta, "evaluation sweep");

            if delta < threshold {
                evaluation.settled = true;
                break;
            }
            if self
                .config
                .evaluation_sweeps
                .is_some_and(|cap| evaluation.sweeps >= cap)
            {
                break;
            }
        }

        evaluation
    }
}

/// Outcome of one approximate evaluation step.
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    sweeps: usize,
    /// Largest change seen across all sweeps.
    largest_delta: f64,
    /// Whether the last sweep fell below the threshold, as opposed to
    /// stopping on the sweep cap.
    settled: bool,
}

impl Solver for ModifiedPolicyIteration {
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
        let mut delta = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            let evaluation = self.evaluate(&mut mdp);
            delta = evaluation.largest_delta;

            let policy_changes = mdp.improve_policy();
            debug!(
                iteration,
                sweeps = evaluation.sweeps,
                settled = evaluation.settled,
                delta,
                policy_changes,
                "modified policy iteration step"
            );

            on_iteration(&IterationEvent {
                iteration,
                delta,
                policy_changes,
                utilities: mdp.utilities(),
                policy: mdp.policy(),
            });

            if policy_changes == 0 && evaluation.settled {
                info!(
                    iterations = iteration,
                    "modified policy iteration converged"
                );
                return Ok(mdp.solution(Self::NAME, iteration));
            }
        }

        let iterations = self.config.max_iterations;
        warn!(
            iterations,
            delta, "modified policy iteration exhausted its iteration budget"
        );
        Err(SolveError::DidNotConverge {
            algorithm: Self::NAME,
            iterations,
            delta,
            last: Box::new(mdp.solution(Self::NAME, iterations)),
        })
    }
}

use nalgebra::{DMatrix, DVector};
use tracing::{debug, info, warn};

use crate::{
    model::grid::Grid,
    solvers::{
        IterationEvent, Solver,
        config::SolverConfig,
        error::{ConfigError, SolveError},
        linear::solve_least_squares,
        mdp::Mdp,
        solution::Solution,
    },
};

/// Policy iteration with exact policy evaluation.
///
/// Evaluation solves `U = R + γ P_π U` as a linear system over every cell;
/// improvement then makes the policy greedy. The loop ends when improvement
/// leaves every action unchanged. `SolverConfig::error` is not used.
#[derive(Debug, Clone)]
pub struct PolicyIteration {
    config: SolverConfig,
}

impl PolicyIteration {
    pub const NAME: &'static str = "policy_iteration";

    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }
}

/// Assemble `A · U = b` for the current policy.
///
/// Row `s` encodes `-U(s) + γ Σ P(s'|s,π(s)) U(s') = -R(s)`. Wall rows stay
/// zero and terminal rows reduce to `-U(s) = -R(s)`.
pub(crate) fn linear_system(mdp: &Mdp<'_>) -> (DMatrix<f64>, DVector<f64>) {
    let grid = mdp.grid();
    let n = grid.len();
    let mut a = DMatrix::<f64>::zeros(n, n);
    let mut b = DVector::<f64>::zeros(n);

    for s in grid.open_cells() {
        let state = &grid.states()[s];
        a[(s, s)] -= 1.0;
        b[s] = -state.reward();

        if state.is_terminal() {
            continue;
        }

        for (next, prob) in mdp.transitions(s, mdp.policy()[s]) {
            a[(s, next)] += mdp.discount() * prob;
        }
    }

    (a, b)
}

impl Solver for PolicyIteration {
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
            let (a, b) = linear_system(&mdp);
            let utilities = solve_least_squares(a, &b)?;
            delta = mdp.replace_utilities(utilities.iter().copied());

            let policy_changes = mdp.improve_policy();
            debug!(iteration, delta, policy_changes, "policy iteration step");

            on_iteration(&IterationEvent {
                iteration,
                delta,
                policy_changes,
                utilities: mdp.utilities(),
                policy: mdp.policy(),
            });

            if policy_changes == 0 {
                info!(iterations = iteration, "policy iteration converged");
                return Ok(mdp.solution(Self::NAME, iteration));
            }
        }

        let iterations = self.config.max_iterations;
        warn!(iterations, delta, "policy iteration exhausted its iteration budget");
        Err(SolveError::DidNotConverge {
            algorithm: Self::NAME,
            iterations,
            delta,
            last: Box::new(mdp.solution(Self::NAME, iterations)),
        })
    }
}

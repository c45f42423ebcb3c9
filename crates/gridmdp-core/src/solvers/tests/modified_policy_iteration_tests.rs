use super::{assignment_grid, max_difference, scenario_grid};
use crate::solvers::{
    Solver,
    config::SolverConfig,
    error::ConfigError,
    mdp::Mdp,
    modified_policy_iteration::ModifiedPolicyIteration,
    policy_iteration::PolicyIteration,
};

#[test]
fn scenario_matches_exact_policy_iteration() {
    let grid = scenario_grid();
    let config = SolverConfig::new(0.99, 1e-4);
    let approx = ModifiedPolicyIteration::new(config.clone())
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");
    let exact = PolicyIteration::new(config)
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");

    assert!(max_difference(&approx.utilities, &exact.utilities) < 1e-4);
    assert_eq!(approx.policy, exact.policy);
    assert_eq!(approx.utility(0, 3), Some(1.0));
    assert_eq!(approx.algorithm, ModifiedPolicyIteration::NAME);
}

#[test]
fn capped_evaluation_still_reaches_exact_utilities() {
    let grid = assignment_grid();
    let capped = SolverConfig::new(0.99, 1e-4).with_evaluation_sweeps(50);
    let approx = ModifiedPolicyIteration::new(capped.clone())
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");
    let exact = PolicyIteration::new(capped.clone())
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");

    assert_eq!(approx.policy, exact.policy);
    assert!(max_difference(&approx.utilities, &exact.utilities) < capped.error);
}

#[test]
fn capped_solution_is_a_fixed_point() {
    let grid = assignment_grid();
    let config = SolverConfig::new(0.99, 1e-4).with_evaluation_sweeps(50);
    let solution = ModifiedPolicyIteration::new(config.clone())
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");

    let mut mdp = Mdp::with_discount(&grid, config.discount);
    mdp.replace_utilities(solution.utilities.iter().copied());
    let (delta, _) = mdp.optimality_sweep();

    assert!(delta < config.error, "delta {delta}");
}

#[test]
fn capped_evaluation_keeps_iterating_until_settled() {
    let grid = assignment_grid();
    let capped = SolverConfig::new(0.99, 1e-4).with_evaluation_sweeps(50);
    let mut changes = Vec::new();

    ModifiedPolicyIteration::new(capped)
        .expect("valid config")
        .solve_with_hook(&grid, &mut |event| changes.push(event.policy_changes))
        .expect("should converge");

    // The policy stabilises long before fifty-sweep evaluations settle.
    let stable_steps = changes.iter().rev().take_while(|c| **c == 0).count();
    assert!(stable_steps > 1, "changes per step: {changes:?}");
}

#[test]
fn uncapped_evaluation_tracks_exact_utilities() {
    let grid = assignment_grid();
    let config = SolverConfig::new(0.99, 1e-4);
    let approx = ModifiedPolicyIteration::new(config.clone())
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");
    let exact = PolicyIteration::new(config)
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");

    assert!(max_difference(&approx.utilities, &exact.utilities) < 1e-4);
}

#[test]
fn zero_evaluation_sweeps_are_rejected() {
    let config = SolverConfig::new(0.99, 1e-4).with_evaluation_sweeps(0);
    let err = ModifiedPolicyIteration::new(config).expect_err("zero sweeps rejected");
    assert!(matches!(err, ConfigError::ZeroEvaluationSweeps));
}

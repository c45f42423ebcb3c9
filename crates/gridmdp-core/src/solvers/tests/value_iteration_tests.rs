use super::{assignment_grid, scenario_grid};
use crate::{
    model::direction::Direction,
    solvers::{
        Solver,
        config::SolverConfig,
        error::{ConfigError, SolveError},
        mdp::Mdp,
        value_iteration::ValueIteration,
    },
};

fn solver(discount: f64, error: f64) -> ValueIteration {
    ValueIteration::new(SolverConfig::new(discount, error)).expect("valid config")
}

#[test]
fn scenario_routes_around_the_penalty() {
    let grid = scenario_grid();
    let solution = solver(0.99, 1e-4).solve(&grid).expect("should converge");

    for col in 0..3 {
        assert_eq!(solution.action(2, col), Some(Direction::Right), "col {col}");
    }
    assert_eq!(solution.action(2, 3), Some(Direction::Up));
    assert_eq!(solution.action(1, 3), Some(Direction::Up));
    // Next to the penalty, move away from it.
    assert_eq!(solution.action(0, 1), Some(Direction::Left));
    assert_eq!(solution.action(1, 2), Some(Direction::Down));

    assert_eq!(solution.utility(0, 3), Some(1.0));
    assert_eq!(solution.utility(0, 2), Some(-1.0));
    assert_eq!(solution.utility(1, 1), Some(0.0));
    assert_eq!(solution.action(1, 1), None);
    assert_eq!(solution.algorithm, ValueIteration::NAME);
}

#[test]
fn utilities_increase_towards_the_goal() {
    let grid = scenario_grid();
    let solution = solver(0.99, 1e-4).solve(&grid).expect("should converge");

    let bottom: Vec<f64> = (0..4).map(|col| solution.utility(2, col).unwrap()).collect();
    assert!(bottom.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(solution.utility(1, 3).unwrap() > bottom[3]);
}

#[test]
fn one_more_backup_stays_within_tolerance() {
    let grid = assignment_grid();
    let config = SolverConfig::new(0.99, 1e-4);
    let solution = ValueIteration::new(config.clone())
        .expect("valid config")
        .solve(&grid)
        .expect("should converge");

    let mut mdp = Mdp::with_discount(&grid, config.discount);
    mdp.replace_utilities(solution.utilities.iter().copied());
    let (delta, _) = mdp.optimality_sweep();

    assert!(delta < config.error, "delta {delta}");
}

#[test]
fn sweep_deltas_contract() {
    let grid = assignment_grid();
    let mut deltas = Vec::new();
    let mut indices = Vec::new();

    let solution = solver(0.9, 1e-6)
        .solve_with_hook(&grid, &mut |event| {
            deltas.push(event.delta);
            indices.push(event.iteration);
            assert_eq!(event.utilities.len(), 36);
        })
        .expect("should converge");

    assert_eq!(deltas.len(), solution.iterations);
    assert_eq!(indices, (1..=solution.iterations).collect::<Vec<_>>());
    for pair in deltas.windows(2) {
        assert!(pair[1] <= 0.9 * pair[0] + 1e-12, "{pair:?}");
    }
}

#[test]
fn exhausted_budget_is_reported() {
    let grid = assignment_grid();
    let config = SolverConfig::new(0.99, 1e-4).with_max_iterations(3);
    let err = ValueIteration::new(config)
        .expect("valid config")
        .solve(&grid)
        .expect_err("three sweeps cannot converge");

    match err {
        SolveError::DidNotConverge {
            algorithm,
            iterations,
            delta,
            last,
        } => {
            assert_eq!(algorithm, ValueIteration::NAME);
            assert_eq!(iterations, 3);
            assert!(delta > 0.0);
            assert_eq!(last.iterations, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let err = ValueIteration::new(SolverConfig::new(1.0, 1e-4)).expect_err("gamma 1 rejected");
    assert!(matches!(err, ConfigError::Discount(_)));

    let err = ValueIteration::new(SolverConfig::new(0.9, 0.0)).expect_err("zero error rejected");
    assert!(matches!(err, ConfigError::Tolerance(_)));
}

use proptest::prelude::*;

use super::max_difference;
use crate::{
    model::{direction::Direction, grid::Grid, state::State},
    solvers::{
        Solver, config::SolverConfig, mdp::Mdp, modified_policy_iteration::ModifiedPolicyIteration,
        policy_iteration::PolicyIteration, value_iteration::ValueIteration,
    },
};

fn any_state() -> impl Strategy<Value = State> {
    prop_oneof![
        1 => Just(State::wall()),
        4 => Just(State::open(-0.04)),
        1 => Just(State::open(0.5)),
        1 => Just(State::terminal(1.0)),
        1 => Just(State::terminal(-1.0)),
    ]
}

fn any_grid() -> impl Strategy<Value = Grid> {
    (1usize..5, 1usize..5)
        .prop_flat_map(|(h, w)| prop::collection::vec(prop::collection::vec(any_state(), w), h))
        .prop_map(|rows| Grid::new(rows).expect("generated grids are rectangular"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn outcome_probabilities_sum_to_one(grid in any_grid(), cell in 0usize..16, action_idx in 0usize..4) {
        let mdp = Mdp::with_discount(&grid, 0.9);
        let cell = cell % grid.len();
        let outcomes = mdp.transitions(cell, Direction::ALL[action_idx]);
        let total: f64 = outcomes.iter().map(|(_, p)| p).sum();
        prop_assert_eq!(total, 1.0);
    }

    #[test]
    fn all_solvers_agree(grid in any_grid()) {
        let config = SolverConfig::new(0.9, 1e-4);
        let vi = ValueIteration::new(config.clone()).unwrap().solve(&grid).unwrap();
        let pi = PolicyIteration::new(config.clone()).unwrap().solve(&grid).unwrap();
        let mpi = ModifiedPolicyIteration::new(config.clone()).unwrap().solve(&grid).unwrap();

        prop_assert!(max_difference(&vi.utilities, &pi.utilities) < config.error);
        prop_assert!(max_difference(&mpi.utilities, &pi.utilities) < config.error);

        for s in grid.open_cells() {
            prop_assert!(vi.policy[s].is_some());
        }
    }

    #[test]
    fn policy_iteration_ends_at_a_greedy_policy(grid in any_grid()) {
        let solution = PolicyIteration::new(SolverConfig::new(0.9, 1e-4))
            .unwrap()
            .solve(&grid)
            .unwrap();
        let mut mdp = Mdp::with_discount(&grid, 0.9);
        mdp.replace_utilities(solution.utilities.iter().copied());

        for s in grid.open_cells() {
            let chosen = mdp.q_value(s, solution.policy[s].unwrap());
            let (_, best) = mdp.greedy(s);
            prop_assert!(best <= chosen + 1e-8);
        }
    }
}

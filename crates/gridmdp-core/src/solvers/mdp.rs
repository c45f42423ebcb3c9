use crate::{
    model::{direction::Direction, grid::Grid},
    solvers::{error::ConfigError, solution::Solution},
};

/// Probability that the actuator moves in the intended direction.
pub const INTENDED_PROBABILITY: f64 = 0.8;

/// Probability of slipping to each side of the intended direction.
pub const SLIP_PROBABILITY: f64 = 0.1;

/// Relative margin a new action must beat the current one by during policy
/// improvement. Keeps round-off from the evaluation step from flipping ties.
pub(crate) const IMPROVEMENT_SLACK: f64 = 1e-10;

/// One possible result of taking an action: landing cell and its probability.
pub type Outcome = (usize, f64);

#[derive(Debug, Clone)]
/// Working state of a single solve over a borrowed grid.
///
/// Holds the policy plus a double-buffered utility estimate. Sweeps read
/// `prev_utilities` only and write `utilities`, then [`Mdp::commit`] copies
/// the new values across, so every cell in a sweep sees the same snapshot.
pub struct Mdp<'g> {
    grid: &'g Grid,
    discount: f64,
    policy: Vec<Direction>,
    utilities: Vec<f64>,
    prev_utilities: Vec<f64>,
}

impl<'g> Mdp<'g> {
    /// Wrap `grid` with zeroed utilities and an all-`Left` policy.
    pub fn new(grid: &'g Grid, discount: f64) -> Result<Self, ConfigError> {
        if !discount.is_finite() || discount <= 0.0 || discount >= 1.0 {
            return Err(ConfigError::Discount(discount));
        }
        Ok(Self::with_discount(grid, discount))
    }

    /// Constructor for discounts already checked by `SolverConfig::validate`.
    pub(crate) fn with_discount(grid: &'g Grid, discount: f64) -> Self {
        Self {
            grid,
            discount,
            policy: vec![Direction::default(); grid.len()],
            utilities: vec![0.0; grid.len()],
            prev_utilities: vec![0.0; grid.len()],
        }
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn policy(&self) -> &[Direction] {
        &self.policy
    }

    /// Utilities written by the latest sweep.
    pub fn utilities(&self) -> &[f64] {
        &self.utilities
    }

    /// Snapshot every backup reads from.
    pub fn previous_utilities(&self) -> &[f64] {
        &self.prev_utilities
    }

    /// The three outcomes of attempting `action` from `index`: the intended
    /// move, then the anticlockwise and clockwise slips.
    pub fn transitions(&self, index: usize, action: Direction) -> [Outcome; 3] {
        [
            (
                self.grid.destination(index, action),
                INTENDED_PROBABILITY,
            ),
            (
                self.grid.destination(index, action.rotate_anticlockwise()),
                SLIP_PROBABILITY,
            ),
            (
                self.grid.destination(index, action.rotate_clockwise()),
                SLIP_PROBABILITY,
            ),
        ]
    }

    /// `Σ P(s'|s,a) U'(s')` over the previous snapshot.
    pub fn expected_utility(&self, index: usize, action: Direction) -> f64 {
        self.transitions(index, action)
            .iter()
            .map(|&(next, prob)| prob * self.prev_utilities[next])
            .sum()
    }

    /// `Q(s,a) = R(s) + γ Σ P(s'|s,a) U'(s')`. Terminal cells return their reward.
    pub fn q_value(&self, index: usize, action: Direction) -> f64 {
        let state = &self.grid.states()[index];
        if state.is_terminal() {
            return state.reward();
        }
        state.reward() + self.discount * self.expected_utility(index, action)
    }

    /// Best action and its Q-value; ties go to the earliest of [`Direction::ALL`].
    pub fn greedy(&self, index: usize) -> (Direction, f64) {
        let mut best = (Direction::Left, f64::NEG_INFINITY);
        for action in Direction::ALL {
            let value = self.q_value(index, action);
            if value > best.1 {
                best = (action, value);
            }
        }
        best
    }

    /// Bellman optimality backup over every open cell.
    ///
    /// Returns the largest utility change and how many actions changed.
    pub(crate) fn optimality_sweep(&mut self) -> (f64, usize) {
        let grid = self.grid;
        let mut delta = 0.0_f64;
        let mut changes = 0;

        for idx in grid.open_cells() {
            let (action, value) = self.greedy(idx);
            if action != self.policy[idx] {
                changes += 1;
            }
            self.policy[idx] = action;
            self.utilities[idx] = value;
            delta = delta.max((value - self.prev_utilities[idx]).abs());
        }

        self.commit();
        (delta, changes)
    }

    /// Bellman backup under the current policy. Returns the largest change.
    pub(crate) fn evaluation_sweep(&mut self) -> f64 {
        let grid = self.grid;
        let mut delta = 0.0_f64;

        for idx in grid.open_cells() {
            let value = self.q_value(idx, self.policy[idx]);
            self.utilities[idx] = value;
            delta = delta.max((value - self.prev_utilities[idx]).abs());
        }

        self.commit();
        delta
    }

    /// Make each open cell greedy with respect to the previous snapshot.
    ///
    /// Terminal cells are skipped. Returns the number of cells whose action changed.
    pub(crate) fn improve_policy(&mut self) -> usize {
        let grid = self.grid;
        let mut changes = 0;

        for idx in grid.open_cells() {
            if grid.states()[idx].is_terminal() {
                continue;
            }

            let current = self.q_value(idx, self.policy[idx]);
            let (best_action, best_value) = self.greedy(idx);
            if best_value > current + IMPROVEMENT_SLACK * current.abs().max(1.0) {
                self.policy[idx] = best_action;
                changes += 1;
            }
        }

        changes
    }

    /// Replace both utility buffers, returning the largest change against the
    /// old snapshot. Walls are pinned to zero.
    pub(crate) fn replace_utilities(&mut self, values: impl IntoIterator<Item = f64>) -> f64 {
        let grid = self.grid;
        let mut delta = 0.0_f64;

        for (idx, value) in values.into_iter().enumerate().take(grid.len()) {
            let value = if grid.states()[idx].is_wall() { 0.0 } else { value };
            delta = delta.max((value - self.prev_utilities[idx]).abs());
            self.utilities[idx] = value;
        }

        self.commit();
        delta
    }

    /// Copy the latest sweep into the snapshot read by the next one.
    pub(crate) fn commit(&mut self) {
        self.prev_utilities.copy_from_slice(&self.utilities);
    }

    /// Package the current estimate for callers.
    pub fn solution(&self, algorithm: &'static str, iterations: usize) -> Solution {
        let policy = self
            .grid
            .states()
            .iter()
            .zip(&self.policy)
            .map(|(state, action)| (!state.is_wall()).then_some(*action))
            .collect();

        Solution {
            algorithm,
            iterations,
            height: self.grid.height(),
            width: self.grid.width(),
            utilities: self.utilities.clone(),
            policy,
        }
    }
}

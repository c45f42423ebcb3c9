use gridmdp_core::{Grid, State};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{DEFAULT_REWARD, LayoutError};

#[derive(Debug, Clone, PartialEq)]
/// Seeded generator of random mazes.
///
/// Each cell independently becomes a wall, a `+1` tile, a `-1` tile or a plain
/// tile with the configured ratios. The same seed always yields the same grid.
pub struct RandomLayout {
    pub height: usize,
    pub width: usize,
    pub wall_ratio: f64,
    pub positive_ratio: f64,
    pub negative_ratio: f64,
    pub default_reward: f64,
    pub seed: u64,
}

impl RandomLayout {
    /// A `size` x `size` maze with the default ratios.
    pub fn square(size: usize, seed: u64) -> Self {
        Self {
            height: size,
            width: size,
            wall_ratio: 0.15,
            positive_ratio: 0.15,
            negative_ratio: 0.15,
            default_reward: DEFAULT_REWARD,
            seed,
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let ratios = [self.wall_ratio, self.positive_ratio, self.negative_ratio];
        if ratios.iter().any(|r| !(0.0..=1.0).contains(r)) || ratios.iter().sum::<f64>() > 1.0 {
            return Err(LayoutError::InvalidRatios);
        }
        if !self.default_reward.is_finite() {
            return Err(LayoutError::InvalidDefaultReward(self.default_reward));
        }
        if self.height == 0 || self.width == 0 {
            return Err(LayoutError::Empty);
        }
        Ok(())
    }

    /// Generate the grid. The top-left cell is forced open if every cell came out a wall.
    pub fn generate(&self) -> Result<Grid, LayoutError> {
        self.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);

        let mut rows: Vec<Vec<State>> = (0..self.height)
            .map(|_| (0..self.width).map(|_| self.sample_cell(&mut rng)).collect())
            .collect();

        if rows.iter().flatten().all(State::is_wall) {
            rows[0][0] = State::open(self.default_reward);
        }

        Ok(Grid::new(rows)?)
    }

    fn sample_cell(&self, rng: &mut ChaCha8Rng) -> State {
        let sample: f64 = rng.r#gen();
        let walls = self.wall_ratio;
        let positives = walls + self.positive_ratio;
        let negatives = positives + self.negative_ratio;

        if sample < walls {
            State::wall()
        } else if sample < positives {
            State::open(1.0)
        } else if sample < negatives {
            State::open(-1.0)
        } else {
            State::open(self.default_reward)
        }
    }
}

use gridmdp_core::Grid;

use crate::{CellSpec, LayoutError, LayoutSpec};

#[derive(Debug, Clone)]
/// Struct to build layouts cell by cell
pub struct LayoutBuilder {
    height: usize,
    width: usize,
    default_reward: Option<f64>,
    cells: Vec<CellSpec>,
}

impl LayoutBuilder {
    /// Create a `height` x `width` layout of default-reward tiles
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            default_reward: None,
            cells: vec![CellSpec::Marker(".".to_string()); height * width],
        }
    }

    /// Override the reward of untouched tiles
    pub fn default_reward(&mut self, reward: f64) -> &mut Self {
        self.default_reward = Some(reward);
        self
    }

    /// Make a cell an ordinary tile paying `reward`
    pub fn set_reward(&mut self, row: usize, col: usize, reward: f64) -> Result<&mut Self, LayoutError> {
        *self.cell_mut(row, col)? = CellSpec::Reward(reward);
        Ok(self)
    }

    /// Make a cell impassable
    pub fn set_wall(&mut self, row: usize, col: usize) -> Result<&mut Self, LayoutError> {
        *self.cell_mut(row, col)? = CellSpec::Marker("#".to_string());
        Ok(self)
    }

    /// Make a cell absorbing with a fixed reward
    pub fn set_terminal(&mut self, row: usize, col: usize, reward: f64) -> Result<&mut Self, LayoutError> {
        *self.cell_mut(row, col)? = CellSpec::Detailed {
            reward,
            terminal: true,
        };
        Ok(self)
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut CellSpec, LayoutError> {
        if row >= self.height || col >= self.width {
            return Err(LayoutError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(&mut self.cells[row * self.width + col])
    }

    pub fn build_spec(self) -> Result<LayoutSpec, LayoutError> {
        if self.height == 0 || self.width == 0 {
            return Err(LayoutError::Empty);
        }

        let rows = self
            .cells
            .chunks(self.width)
            .map(<[CellSpec]>::to_vec)
            .collect();
        let spec = LayoutSpec {
            version: Some(1),
            default_reward: self.default_reward,
            rows,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(self) -> Result<Grid, LayoutError> {
        let spec = self.build_spec()?;
        spec.compile()
    }
}

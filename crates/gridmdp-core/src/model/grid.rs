use crate::model::{direction::Direction, error::GridError, state::State};

#[derive(Debug, Clone, PartialEq)]
/// Rectangular, immutable arrangement of cells.
///
/// Cells are stored row-major; the flat index of `(row, col)` is
/// `row * width + col`. Every solver array uses the same indexing.
pub struct Grid {
    height: usize,
    width: usize,
    states: Vec<State>,
}

impl Grid {
    /// Build a grid from rows of cells, rejecting empty, ragged, or non-finite input.
    pub fn new(rows: Vec<Vec<State>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut states = Vec::with_capacity(height * width);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            for (col, state) in cells.into_iter().enumerate() {
                if !state.reward().is_finite() {
                    return Err(GridError::NonFiniteReward {
                        row,
                        col,
                        value: state.reward(),
                    });
                }
                states.push(state);
            }
        }

        Ok(Self {
            height,
            width,
            states,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells, walls included.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`; construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Flat index of `(row, col)`, or `None` when out of bounds.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then_some(row * self.width + col)
    }

    /// Inverse of [`Grid::index`].
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&State> {
        self.index(row, col).map(|idx| &self.states[idx])
    }

    /// Cell at a flat index.
    pub fn state(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }

    /// All cells in row-major order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Flat indices of every non-wall cell.
    pub fn open_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| !state.is_wall())
            .map(|(idx, _)| idx)
    }

    /// Cell reached by attempting `direction` from `index`.
    ///
    /// Moves off the grid or into a wall leave the agent where it is.
    pub fn destination(&self, index: usize, direction: Direction) -> usize {
        let (row, col) = self.position(index);
        let (dx, dy) = direction.vector();

        let target = row
            .checked_add_signed(dy)
            .zip(col.checked_add_signed(dx))
            .and_then(|(r, c)| self.index(r, c));

        match target {
            Some(next) if !self.states[next].is_wall() => next,
            _ => index,
        }
    }
}

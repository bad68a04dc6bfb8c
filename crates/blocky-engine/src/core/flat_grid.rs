use std::ops::Index;

use super::{block::Block, colour::Colour, quadrant::Quadrant};

/// Dense square grid of unit-cell colours projected from a [`Block`].
///
/// A block at `level` with `max_depth` covers `2^(max_depth - level)` unit cells
/// per side. Cells are addressed as `grid[(i, j)]`, where `i` selects the column
/// (x) and `j` the row (y); `grid[(0, 0)]` is the upper-left unit cell.
///
/// # Example
///
/// ```
/// use blocky_engine::{Block, Colour, FlatGrid, Position};
///
/// let mut board = Block::new(Position::ORIGIN, 100, Colour::WHITE, 0, 1);
/// board.subdivide([
///     Colour::REAL_RED,         // upper-right
///     Colour::OLD_OLIVE,        // upper-left
///     Colour::PACIFIC_POINT,    // lower-left
///     Colour::DAFFODIL_DELIGHT, // lower-right
/// ]);
///
/// let grid = FlatGrid::from_block(&board);
/// assert_eq!(grid.side(), 2);
/// assert_eq!(grid[(0, 0)], Colour::OLD_OLIVE);
/// assert_eq!(grid[(1, 0)], Colour::REAL_RED);
/// assert_eq!(grid[(0, 1)], Colour::PACIFIC_POINT);
/// assert_eq!(grid[(1, 1)], Colour::DAFFODIL_DELIGHT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatGrid {
    side: usize,
    // column-major: cells[i * side + j]
    cells: Vec<Colour>,
}

impl FlatGrid {
    /// Projects `block` onto its grid of unit cells.
    #[must_use]
    pub fn from_block(block: &Block) -> Self {
        let side = 1 << (block.max_depth() - block.level());
        let mut grid = Self {
            side,
            cells: vec![Colour::BLACK; side * side],
        };
        grid.fill(block, 0, 0, side);
        grid
    }

    /// Builds a grid from its columns.
    ///
    /// # Panics
    ///
    /// Panics if `columns` is empty or not square.
    #[must_use]
    pub fn from_columns(columns: Vec<Vec<Colour>>) -> Self {
        let side = columns.len();
        assert!(side > 0, "grid must not be empty");
        assert!(
            columns.iter().all(|column| column.len() == side),
            "grid must be square"
        );
        Self {
            side,
            cells: columns.into_iter().flatten().collect(),
        }
    }

    /// Number of unit cells along each side.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Returns the colour of the cell at column `i`, row `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<Colour> {
        (i < self.side && j < self.side).then(|| self.cells[i * self.side + j])
    }

    /// Returns the colours of row `j`, from left to right.
    pub fn row(&self, j: usize) -> impl Iterator<Item = Colour> + '_ {
        (0..self.side).map(move |i| self[(i, j)])
    }

    fn fill(&mut self, block: &Block, i0: usize, j0: usize, side: usize) {
        if let Some(colour) = block.colour() {
            for i in i0..i0 + side {
                let column = i * self.side;
                self.cells[column + j0..column + j0 + side].fill(colour);
            }
            return;
        }
        let half = side / 2;
        for (quadrant, child) in Quadrant::ALL.into_iter().zip(block.children()) {
            let (i, j) = match quadrant {
                Quadrant::UpperRight => (i0 + half, j0),
                Quadrant::UpperLeft => (i0, j0),
                Quadrant::LowerLeft => (i0, j0 + half),
                Quadrant::LowerRight => (i0 + half, j0 + half),
            };
            self.fill(child, i, j, half);
        }
    }
}

impl Index<(usize, usize)> for FlatGrid {
    type Output = Colour;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.side && j < self.side, "cell ({i}, {j}) out of range");
        &self.cells[i * self.side + j]
    }
}

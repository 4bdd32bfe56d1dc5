use rand::Rng;

use super::action::Direction;

/// One square of the board, addressed in pixels (multiples of the cell size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The board: a torus of `width_cells × height_cells` squares.
///
/// Coordinates stay in pixel space so movement, collision checks and
/// drawing all share one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    screen_width: i32,
    screen_height: i32,
    cell_size: i32,
}

impl Grid {
    pub fn new(screen_width: i32, screen_height: i32, cell_size: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            cell_size,
        }
    }

    pub fn width_cells(&self) -> i32 {
        self.screen_width / self.cell_size
    }

    pub fn height_cells(&self) -> i32 {
        self.screen_height / self.cell_size
    }

    /// Number of cells on the board, saturating at `usize::MAX`
    pub fn capacity(&self) -> usize {
        let width = usize::try_from(self.width_cells()).unwrap_or(0);
        let height = usize::try_from(self.height_cells()).unwrap_or(0);
        width.saturating_mul(height)
    }

    /// Where a fresh snake starts. Rounded down to a cell boundary when a
    /// dimension has an odd number of cells.
    pub fn center(&self) -> Cell {
        Cell::new(
            self.width_cells() / 2 * self.cell_size,
            self.height_cells() / 2 * self.cell_size,
        )
    }

    /// Check if a cell lies on the board
    #[cfg(test)]
    pub(crate) fn contains(&self, cell: Cell) -> bool {
        (0..self.screen_width).contains(&cell.x) && (0..self.screen_height).contains(&cell.y)
    }

    /// The neighbour of `cell` in `direction`, wrapping at every edge
    pub fn advance(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(
            (cell.x + dx * self.cell_size).rem_euclid(self.screen_width),
            (cell.y + dy * self.cell_size).rem_euclid(self.screen_height),
        )
    }

    /// A uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.gen_range(0..self.width_cells()) * self.cell_size,
            rng.gen_range(0..self.height_cells()) * self.cell_size,
        )
    }

    /// Column and row of a cell, for drawing
    pub fn to_col_row(&self, cell: Cell) -> (usize, usize) {
        (
            (cell.x / self.cell_size) as usize,
            (cell.y / self.cell_size) as usize,
        )
    }
}

use rand::Rng;
use std::collections::HashSet;

use super::grid::{Cell, Grid};

/// What eating a food item does to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    /// Grows the snake by one segment
    Good,
    /// Sends the snake back to its starting state
    Bad,
}

/// A food item sitting on one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    kind: FoodKind,
    position: Cell,
}

impl Food {
    /// Create a food item at a random cell outside `occupied`
    pub fn new<R: Rng + ?Sized>(
        kind: FoodKind,
        occupied: &HashSet<Cell>,
        grid: &Grid,
        rng: &mut R,
    ) -> Self {
        let mut food = Self {
            kind,
            position: grid.center(),
        };
        food.place(occupied, grid, rng);
        food
    }

    pub fn kind(&self) -> FoodKind {
        self.kind
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Move to a uniformly random cell that is not in `occupied`.
    ///
    /// `occupied` must leave at least one free cell on the board, otherwise
    /// this never returns.
    pub fn place<R: Rng + ?Sized>(&mut self, occupied: &HashSet<Cell>, grid: &Grid, rng: &mut R) {
        debug_assert!(
            occupied.len() < grid.capacity(),
            "no free cell left for {:?} food",
            self.kind
        );

        loop {
            let candidate = grid.random_cell(rng);
            if !occupied.contains(&candidate) {
                self.position = candidate;
                return;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, position: Cell) {
        self.position = position;
    }
}

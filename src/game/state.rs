use rand::Rng;

use super::action::Direction;
use super::grid::{Cell, Grid};

/// Outcome of moving the snake one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The head moved; `vacated` is the tail cell that was dropped, if any
    Moved { vacated: Option<Cell> },
    /// The next head cell is already part of the body
    SelfCollision { at: Cell },
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: Vec<Cell>,
    /// Current direction of movement
    direction: Direction,
    /// Target segment count; the tail is trimmed down to it after each move
    length: usize,
    /// Ticks per second
    speed: u32,
    min_speed: u32,
    max_speed: u32,
    /// Longest length reached this run and the speed it was reached at
    max_length: usize,
    max_length_speed: u32,
    last_vacated: Option<Cell>,
    home: Cell,
}

impl Snake {
    /// Create a one-segment snake at `home` with a random heading
    pub fn new<R: Rng + ?Sized>(
        home: Cell,
        speed: u32,
        speed_range: (u32, u32),
        rng: &mut R,
    ) -> Self {
        let (min_speed, max_speed) = speed_range;
        Self {
            segments: vec![home],
            direction: Direction::random(rng),
            length: 1,
            speed,
            min_speed,
            max_speed,
            max_length: 1,
            max_length_speed: speed,
            last_vacated: None,
            home,
        }
    }

    /// Back to a single segment at the start cell, heading somewhere random.
    ///
    /// Speed and the high-water marks are kept.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.length = 1;
        self.segments.clear();
        self.segments.push(self.home);
        self.direction = Direction::random(rng);
        self.last_vacated = None;
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn max_length_speed(&self) -> u32 {
        self.max_length_speed
    }

    /// Tail cell dropped by the most recent move
    pub fn last_vacated(&self) -> Option<Cell> {
        self.last_vacated
    }

    /// Check if a cell is covered by any segment, head included
    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    /// Turn if `requested` is a quarter turn from the current heading.
    /// Returns whether the heading changed.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        match self.direction.turned(requested) {
            Some(next) => {
                self.direction = next;
                true
            }
            None => false,
        }
    }

    /// Take `requested` as the new speed if it lies within the allowed range.
    /// Returns whether the speed changed.
    pub fn set_speed(&mut self, requested: u32) -> bool {
        if (self.min_speed..=self.max_speed).contains(&requested) && requested != self.speed {
            self.speed = requested;
            true
        } else {
            false
        }
    }

    /// Move the head one cell along the current heading
    pub fn advance_one_tick(&mut self, grid: &Grid) -> Advance {
        self.last_vacated = None;

        let next_head = grid.advance(self.head(), self.direction);
        let collided = self.occupies(next_head);
        if !collided {
            self.segments.insert(0, next_head);
        }

        if self.segments.len() > self.length {
            self.last_vacated = self.segments.pop();
        }

        if collided {
            Advance::SelfCollision { at: next_head }
        } else {
            Advance::Moved {
                vacated: self.last_vacated,
            }
        }
    }

    /// Lengthen the target by one segment. Returns true on a new record length.
    pub fn grow(&mut self) -> bool {
        self.length += 1;
        if self.length > self.max_length {
            self.max_length = self.length;
            self.max_length_speed = self.speed;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub(crate) fn with_body(mut self, segments: Vec<Cell>, direction: Direction) -> Self {
        assert!(!segments.is_empty());
        self.length = segments.len();
        self.segments = segments;
        self.direction = direction;
        self
    }
}

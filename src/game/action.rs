use rand::Rng;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Pick one of the four directions uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Resolve a turn request against the current heading.
    ///
    /// Only quarter turns are legal. Requesting the current heading or its
    /// opposite yields `None`.
    pub fn turned(self, requested: Direction) -> Option<Direction> {
        if requested == self || self.is_opposite(requested) {
            None
        } else {
            Some(requested)
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A request to change the snake's speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedRequest {
    /// One step faster (step speed control)
    Faster,
    /// One step slower (step speed control)
    Slower,
    /// Jump to a discrete level, zero-based (level speed control)
    Level(usize),
}

/// Action that can be applied to the game between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ask the snake to turn
    Turn(Direction),
    /// Ask the snake to change speed
    Speed(SpeedRequest),
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Turn(direction)
    }
}

impl From<SpeedRequest> for Action {
    fn from(request: SpeedRequest) -> Self {
        Action::Speed(request)
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

use super::{
    action::{Action, SpeedRequest},
    config::GameConfig,
    food::{Food, FoodKind},
    grid::{Cell, Grid},
    state::{Advance, Snake},
};

/// Why the snake was sent back to its starting state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetCause {
    /// The snake ate the bad food
    BadFood,
    /// The head ran into the body
    SelfCollision,
    /// The snake grew so long that both foods could no longer fit beside it
    BoardFull,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Food eaten at the start of the tick
    pub ate: Option<FoodKind>,
    /// Reset applied during the tick, if any
    pub reset: Option<ResetCause>,
    /// Tail cell the renderer should erase
    pub vacated: Option<Cell>,
    /// The renderer should wipe the whole board
    pub board_cleared: bool,
    /// The snake reached a new maximum length
    pub new_record: bool,
}

/// Owns the snake and both foods and advances them one tick at a time
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    good_food: Food,
    bad_food: Food,
    rng: R,
    title_dirty: bool,
    ticks: u64,
}

impl GameEngine<StdRng> {
    /// Create a new game seeded from the operating system
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new game whose food placement and headings replay for `seed`
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new game drawing randomness from `rng`.
    ///
    /// `config` should already have passed [`GameConfig::validate`].
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let grid = config.grid();
        let snake = Snake::new(
            grid.center(),
            config.initial_speed,
            (config.min_speed, config.max_speed),
            &mut rng,
        );

        let mut occupied: HashSet<Cell> = snake.segments().iter().copied().collect();
        let good_food = Food::new(FoodKind::Good, &occupied, &grid, &mut rng);
        occupied.insert(good_food.position());
        let bad_food = Food::new(FoodKind::Bad, &occupied, &grid, &mut rng);

        info!(
            width = grid.width_cells(),
            height = grid.height_cells(),
            speed = snake.speed(),
            "new game"
        );

        Self {
            config,
            grid,
            snake,
            good_food,
            bad_food,
            rng,
            title_dirty: true,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn good_food(&self) -> &Food {
        &self.good_food
    }

    pub fn bad_food(&self) -> &Food {
        &self.bad_food
    }

    /// Number of ticks played so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time between ticks at the snake's current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.snake.speed()))
    }

    /// Window title with the current speed and best length
    pub fn title(&self) -> String {
        format!(
            "SNAKE. Max. length: {}. Speed: {} ({}) | (Exit: ESC)",
            self.snake.max_length(),
            self.snake.speed(),
            self.config.speed_control.hint()
        )
    }

    /// The title, if anything shown in it changed since it was last taken
    pub fn take_title(&mut self) -> Option<String> {
        if self.title_dirty {
            self.title_dirty = false;
            Some(self.title())
        } else {
            None
        }
    }

    /// Apply one player request to the snake
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Turn(direction) => {
                if self.snake.set_direction(direction) {
                    debug!(?direction, "turn");
                }
            }
            Action::Speed(request) => self.change_speed(request),
        }
    }

    fn change_speed(&mut self, request: SpeedRequest) {
        let current = self.snake.speed();
        let Some(target) = self.config.speed_control.target(current, request) else {
            return;
        };
        if self.snake.set_speed(target) {
            debug!(from = current, to = target, "speed changed");
            self.title_dirty = true;
        }
    }

    /// Run one simulation step after applying `actions` in order
    pub fn tick(&mut self, actions: &[Action]) -> TickReport {
        for &action in actions {
            self.apply(action);
        }

        let mut report = TickReport::default();
        let mut pending_reset = None;
        let head = self.snake.head();

        if head == self.good_food.position() {
            report.ate = Some(FoodKind::Good);
            if self.snake.grow() {
                report.new_record = true;
                info!(
                    length = self.snake.max_length(),
                    speed = self.snake.max_length_speed(),
                    "new max length"
                );
            }
            self.title_dirty = true;
            if self.snake.length() + 2 > self.grid.capacity() {
                pending_reset = Some(ResetCause::BoardFull);
            }
            let occupied = self.occupied_without(FoodKind::Good);
            self.good_food.place(&occupied, &self.grid, &mut self.rng);
        } else if head == self.bad_food.position() {
            report.ate = Some(FoodKind::Bad);
            pending_reset = Some(ResetCause::BadFood);
            let occupied = self.occupied_without(FoodKind::Bad);
            self.bad_food.place(&occupied, &self.grid, &mut self.rng);
        }

        if let Some(cause) = pending_reset {
            self.reset_snake(cause, &mut report);
        }

        match self.snake.advance_one_tick(&self.grid) {
            Advance::Moved { vacated } => report.vacated = vacated,
            Advance::SelfCollision { at } => {
                debug!(x = at.x, y = at.y, "self collision");
                self.reset_snake(ResetCause::SelfCollision, &mut report);
            }
        }

        self.ticks += 1;
        report
    }

    /// Snake segments plus the food that is not `kind`
    fn occupied_without(&self, kind: FoodKind) -> HashSet<Cell> {
        let other = match kind {
            FoodKind::Good => &self.bad_food,
            FoodKind::Bad => &self.good_food,
        };
        let mut occupied: HashSet<Cell> = self.snake.segments().iter().copied().collect();
        occupied.insert(other.position());
        occupied
    }

    fn reset_snake(&mut self, cause: ResetCause, report: &mut TickReport) {
        info!(
            ?cause,
            length = self.snake.length(),
            tick = self.ticks,
            "snake reset"
        );
        self.snake.reset(&mut self.rng);
        report.reset = Some(cause);
        report.board_cleared = true;
        report.vacated = None;

        // The fresh snake may have landed on a food item
        for kind in [FoodKind::Good, FoodKind::Bad] {
            let position = match kind {
                FoodKind::Good => self.good_food.position(),
                FoodKind::Bad => self.bad_food.position(),
            };
            if self.snake.occupies(position) {
                let occupied = self.occupied_without(kind);
                let food = match kind {
                    FoodKind::Good => &mut self.good_food,
                    FoodKind::Bad => &mut self.bad_food,
                };
                food.place(&occupied, &self.grid, &mut self.rng);
            }
        }
    }
}

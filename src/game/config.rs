use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::action::SpeedRequest;
use super::grid::Grid;

/// Number of discrete levels offered by [`SpeedControl::Levels`]
pub const SPEED_LEVEL_COUNT: usize = 9;

/// Largest board [`GameConfig::validate`] accepts, in cells
pub const MAX_BOARD_CELLS: usize = 1 << 20;

/// How the player changes the snake's speed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SpeedControl {
    /// Modifier keys nudge the speed up or down by `step`
    Step { step: u32 },
    /// Number keys pick one of nine absolute speeds
    Levels { levels: Vec<u32> },
}

impl SpeedControl {
    /// Nine levels spread evenly over `[min, max]`, both ends included
    pub fn evenly_spaced(min: u32, max: u32) -> Self {
        let span = u64::from(max.saturating_sub(min));
        let last = (SPEED_LEVEL_COUNT - 1) as u64;
        // span * i fits in u64 for any u32 span; the quotient never exceeds span
        let levels = (0..SPEED_LEVEL_COUNT as u64)
            .map(|i| min + (span * i / last) as u32)
            .collect();
        SpeedControl::Levels { levels }
    }

    /// Resolve a request into the speed it asks for.
    ///
    /// Returns `None` for requests this policy does not understand. The
    /// result is not range-checked here.
    pub fn target(&self, current: u32, request: SpeedRequest) -> Option<u32> {
        match (self, request) {
            (SpeedControl::Step { step }, SpeedRequest::Faster) => current.checked_add(*step),
            (SpeedControl::Step { step }, SpeedRequest::Slower) => current.checked_sub(*step),
            (SpeedControl::Levels { levels }, SpeedRequest::Level(index)) => {
                levels.get(index).copied()
            }
            _ => None,
        }
    }

    /// Key hint shown next to the speed in the title
    pub fn hint(&self) -> &'static str {
        match self {
            SpeedControl::Step { .. } => "SHIFT ↑, CTRL ↓",
            SpeedControl::Levels { .. } => "1-9",
        }
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        SpeedControl::Step { step: 1 }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in pixels
    pub screen_width: i32,
    /// Board height in pixels
    pub screen_height: i32,
    /// Side of one cell in pixels
    pub cell_size: i32,
    /// Slowest allowed speed, in ticks per second
    pub min_speed: u32,
    /// Fastest allowed speed, in ticks per second
    pub max_speed: u32,
    /// Speed the snake starts with
    pub initial_speed: u32,
    pub speed_control: SpeedControl,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            cell_size: 20,
            min_speed: 5,
            max_speed: 30,
            initial_speed: 5,
            speed_control: SpeedControl::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size in pixels
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Read a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    /// The board described by this configuration
    pub fn grid(&self) -> Grid {
        Grid::new(self.screen_width, self.screen_height, self.cell_size)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell_size must be positive");
        ensure!(
            self.screen_width > 0 && self.screen_height > 0,
            "screen dimensions must be positive"
        );
        ensure!(
            self.screen_width % self.cell_size == 0 && self.screen_height % self.cell_size == 0,
            "screen {}x{} is not a whole number of {}px cells",
            self.screen_width,
            self.screen_height,
            self.cell_size
        );
        // Centre cell plus two food items.
        let capacity = self.grid().capacity();
        ensure!(capacity >= 3, "board must hold at least 3 cells");
        ensure!(
            capacity <= MAX_BOARD_CELLS,
            "board of {} cells exceeds the limit of {}",
            capacity,
            MAX_BOARD_CELLS
        );
        ensure!(self.min_speed > 0, "min_speed must be positive");
        ensure!(
            self.min_speed <= self.initial_speed && self.initial_speed <= self.max_speed,
            "initial_speed {} is outside {}..={}",
            self.initial_speed,
            self.min_speed,
            self.max_speed
        );

        match &self.speed_control {
            SpeedControl::Step { step } => {
                ensure!(*step > 0, "speed step must be positive");
            }
            SpeedControl::Levels { levels } => {
                ensure!(
                    levels.len() == SPEED_LEVEL_COUNT,
                    "expected {} speed levels, got {}",
                    SPEED_LEVEL_COUNT,
                    levels.len()
                );
                if let Some(level) = levels
                    .iter()
                    .find(|&&l| l < self.min_speed || l > self.max_speed)
                {
                    anyhow::bail!(
                        "speed level {} is outside {}..={}",
                        level,
                        self.min_speed,
                        self.max_speed
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.screen_width, 640);
        assert_eq!(config.screen_height, 480);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.speed_control, SpeedControl::Step { step: 1 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(400, 300);
        assert_eq!(config.screen_width, 400);
        assert_eq!(config.screen_height, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_misaligned_board() {
        let config = GameConfig::new(650, 480);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_tiny_board() {
        let config = GameConfig {
            screen_width: 40,
            screen_height: 20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_board() {
        let config = GameConfig {
            screen_width: 100_000,
            screen_height: 100_000,
            cell_size: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            screen_width: 1024,
            screen_height: 1024,
            cell_size: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_initial_speed_out_of_range() {
        let config = GameConfig {
            initial_speed: 31,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_evenly_spaced_levels() {
        let control = SpeedControl::evenly_spaced(5, 30);
        let SpeedControl::Levels { levels } = &control else {
            panic!("expected levels");
        };
        assert_eq!(levels, &vec![5, 8, 11, 14, 17, 20, 23, 26, 30]);

        let config = GameConfig {
            speed_control: control,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_evenly_spaced_wide_range() {
        let SpeedControl::Levels { levels } = SpeedControl::evenly_spaced(5, u32::MAX) else {
            panic!("expected levels");
        };
        assert_eq!(levels.len(), SPEED_LEVEL_COUNT);
        assert_eq!(levels[0], 5);
        assert_eq!(levels[SPEED_LEVEL_COUNT - 1], u32::MAX);
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_rejects_wrong_level_count() {
        let config = GameConfig {
            speed_control: SpeedControl::Levels {
                levels: vec![5, 10, 15],
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_speed_targets() {
        let step = SpeedControl::Step { step: 5 };
        assert_eq!(step.target(10, SpeedRequest::Faster), Some(15));
        assert_eq!(step.target(10, SpeedRequest::Slower), Some(5));
        assert_eq!(step.target(3, SpeedRequest::Slower), None);
        assert_eq!(step.target(10, SpeedRequest::Level(2)), None);

        let levels = SpeedControl::evenly_spaced(5, 30);
        assert_eq!(levels.target(10, SpeedRequest::Level(0)), Some(5));
        assert_eq!(levels.target(10, SpeedRequest::Level(8)), Some(30));
        assert_eq!(levels.target(10, SpeedRequest::Level(9)), None);
        assert_eq!(levels.target(10, SpeedRequest::Faster), None);
    }

    #[test]
    fn test_json_partial_config_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"cell_size": 10, "speed_control": {"mode": "levels", "levels": [1,2,3,4,5,6,7,8,9]}}"#)
                .unwrap();
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.screen_width, 640);
        assert_eq!(
            config.speed_control,
            SpeedControl::Levels {
                levels: vec![1, 2, 3, 4, 5, 6, 7, 8, 9]
            }
        );
    }
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{Level, info};
use wrap_snake::game::{GameConfig, GameEngine, SpeedControl};
use wrap_snake::logger::init_logger;
use wrap_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrap-around board with good and bad food")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<i32>,

    /// How the speed is changed from the keyboard
    #[arg(long, value_enum)]
    speed_control: Option<SpeedControlKind>,

    /// Starting speed in ticks per second
    #[arg(long)]
    speed: Option<u32>,

    /// Seed for food placement and starting headings
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SpeedControlKind {
    /// Shift speeds up, Ctrl slows down
    Step,
    /// Keys 1-9 pick one of nine speeds
    Levels,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.initial_speed = speed;
        }
        let has_levels = matches!(config.speed_control, SpeedControl::Levels { .. });
        match (self.speed_control, has_levels) {
            (Some(SpeedControlKind::Step), true) => {
                config.speed_control = SpeedControl::default();
            }
            (Some(SpeedControlKind::Levels), false) => {
                config.speed_control =
                    SpeedControl::evenly_spaced(config.min_speed, config.max_speed);
            }
            _ => {}
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.log_file.as_deref(), cli.log_level)?;

    let config = cli.game_config()?;
    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    info!(?config, seed = ?cli.seed, "starting");
    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_board() {
        let cli = Cli::try_parse_from(["wrap_snake"]).unwrap();
        let config = cli.game_config().unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(cli.log_level, Level::INFO);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "wrap_snake",
            "--width",
            "400",
            "--height",
            "300",
            "--speed-control",
            "levels",
            "--speed",
            "10",
        ])
        .unwrap();
        let config = cli.game_config().unwrap();
        assert_eq!(config.screen_width, 400);
        assert_eq!(config.screen_height, 300);
        assert_eq!(config.initial_speed, 10);
        assert_eq!(config.speed_control, SpeedControl::evenly_spaced(5, 30));
    }

    #[test]
    fn test_invalid_board_rejected() {
        let cli = Cli::try_parse_from(["wrap_snake", "--cell-size", "30"]).unwrap();
        assert!(cli.game_config().is_err());
    }
}

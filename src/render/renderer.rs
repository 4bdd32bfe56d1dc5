use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{FoodKind, GameEngine, SpeedControl};
use crate::metrics::GameMetrics;

const BOARD_BACKGROUND_COLOR: Color = Color::Rgb(211, 211, 211);
const CELL_BOUNDARY_COLOR: Color = Color::Rgb(93, 216, 228);
const SNAKE_COLOR: Color = Color::Rgb(76, 187, 23);
const GOOD_FOOD_COLOR: Color = Color::Rgb(255, 0, 0);
const BAD_FOOD_COLOR: Color = Color::Rgb(255, 165, 0);

/// What occupies one board square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Snake,
    Food(FoodKind),
}

impl Tile {
    fn span(self) -> Span<'static> {
        let style = Style::default().bg(BOARD_BACKGROUND_COLOR);
        match self {
            Tile::Empty => Span::styled("  ", style),
            Tile::Snake => Span::styled(
                "■ ",
                style.fg(SNAKE_COLOR).add_modifier(Modifier::BOLD),
            ),
            Tile::Food(FoodKind::Good) => Span::styled(
                "● ",
                style.fg(GOOD_FOOD_COLOR).add_modifier(Modifier::BOLD),
            ),
            Tile::Food(FoodKind::Bad) => Span::styled(
                "● ",
                style.fg(BAD_FOOD_COLOR).add_modifier(Modifier::BOLD),
            ),
        }
    }
}

/// Rows of tiles, top row first. Snake segments are drawn over food.
pub fn tiles<R: Rng>(engine: &GameEngine<R>) -> Vec<Vec<Tile>> {
    let grid = engine.grid();
    let mut rows =
        vec![vec![Tile::Empty; grid.width_cells() as usize]; grid.height_cells() as usize];

    for food in [engine.good_food(), engine.bad_food()] {
        let (col, row) = grid.to_col_row(food.position());
        rows[row][col] = Tile::Food(food.kind());
    }
    for &segment in engine.snake().segments() {
        let (col, row) = grid.to_col_row(segment);
        rows[row][col] = Tile::Snake;
    }

    rows
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: Rng>(
        &self,
        frame: &mut Frame,
        engine: &GameEngine<R>,
        title: &str,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], engine, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(chunks[1], engine, title);
        frame.render_widget(grid, chunks[1]);

        // Render footer with controls
        let controls = self.render_controls(chunks[2], &engine.config().speed_control);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid<'a, R: Rng>(
        &self,
        _area: Rect,
        engine: &GameEngine<R>,
        title: &'a str,
    ) -> Paragraph<'a> {
        let lines: Vec<Line> = tiles(engine)
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(Tile::span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(CELL_BOUNDARY_COLOR))
                    .title(format!(" {} ", title)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<R: Rng>(
        &self,
        _area: Rect,
        engine: &GameEngine<R>,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let snake = engine.snake();
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![
            Line::from(vec![
                Span::styled("Length: ", label),
                Span::styled(
                    snake.length().to_string(),
                    value.add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", label),
                Span::styled(
                    format!("{} @ {}", snake.max_length(), snake.max_length_speed()),
                    value,
                ),
                Span::raw("    "),
                Span::styled("Speed: ", label),
                Span::styled(snake.speed().to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Eaten: ", label),
                Span::styled(
                    format!("{}/{}", metrics.good_eaten, metrics.bad_eaten),
                    value,
                ),
                Span::raw("    "),
                Span::styled("Records: ", label),
                Span::styled(metrics.records.to_string(), value),
                Span::raw("    "),
                Span::styled("Resets: ", label),
                Span::styled(metrics.resets().to_string(), value),
                Span::raw("    "),
                Span::styled("Time: ", label),
                Span::styled(metrics.format_time(), value),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, _area: Rect, speed_control: &SpeedControl) -> Paragraph<'_> {
        let speed_keys = match speed_control {
            SpeedControl::Step { .. } => "SHIFT/+ CTRL/-",
            SpeedControl::Levels { .. } => "1-9",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled(speed_keys, Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

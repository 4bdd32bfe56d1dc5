use std::time::{Duration, Instant};

use crate::game::{FoodKind, ResetCause, TickReport};

/// Running totals for one play session
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub good_eaten: u32,
    pub bad_eaten: u32,
    pub collisions: u32,
    pub board_clears: u32,
    /// Ticks that raised the best length
    pub records: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            good_eaten: 0,
            bad_eaten: 0,
            collisions: 0,
            board_clears: 0,
            records: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold one tick's outcome into the totals
    pub fn on_tick(&mut self, report: &TickReport) {
        match report.ate {
            Some(FoodKind::Good) => self.good_eaten += 1,
            Some(FoodKind::Bad) => self.bad_eaten += 1,
            None => {}
        }
        match report.reset {
            Some(ResetCause::SelfCollision) => self.collisions += 1,
            Some(ResetCause::BoardFull) => self.board_clears += 1,
            Some(ResetCause::BadFood) | None => {}
        }
        if report.new_record {
            self.records += 1;
        }
    }

    /// Resets of any cause
    pub fn resets(&self) -> u32 {
        self.bad_eaten + self.collisions + self.board_clears
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

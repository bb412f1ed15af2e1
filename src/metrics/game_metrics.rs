use std::time::{Duration, Instant};

use crate::game::TickResult;

/// Highlight on the head cell for the tick that just happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadFlash {
    Ate,
    /// The head crossed an edge
    Wrapped,
}

/// Per-session counters for the interactive front end
///
/// The high score lives only as long as the process.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Food eaten in the current game
    pub foods_eaten: u32,
    /// Edge crossings in the current game
    pub wraps: u32,
    /// Cleared by the next tick that neither eats nor wraps
    pub head_flash: Option<HeadFlash>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            foods_eaten: 0,
            wraps: 0,
            head_flash: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.foods_eaten = 0;
        self.wraps = 0;
        self.head_flash = None;
    }

    pub fn on_tick(&mut self, result: &TickResult) {
        self.head_flash = None;
        if result.wrapped {
            self.wraps += 1;
            self.head_flash = Some(HeadFlash::Wrapped);
        }
        if result.ate_food() {
            self.foods_eaten += 1;
            self.head_flash = Some(HeadFlash::Ate);
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
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

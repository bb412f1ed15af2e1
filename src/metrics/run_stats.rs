//! Rolling statistics over many finished games
//!
//! Used by the headless autopilot to report how sessions end.

use std::collections::VecDeque;

use crate::game::EndReason;

/// Rolling-window statistics over finished games
///
/// # Example
///
/// ```rust
/// use snake_engine::game::EndReason;
/// use snake_engine::metrics::RunStats;
///
/// let mut stats = RunStats::new(100);
/// stats.record_game(40, 5, 120, Some(EndReason::SelfCollision));
///
/// assert_eq!(stats.total_games(), 1);
/// assert_eq!(stats.best_score(), 40);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Final scores (rolling window)
    scores: VecDeque<u32>,

    /// Final snake lengths (rolling window)
    lengths: VecDeque<usize>,

    /// Ticks survived (rolling window)
    ticks: VecDeque<u32>,

    total_games: usize,
    total_ticks: u64,
    best_score: u32,

    /// Games that ended by filling the board
    boards_filled: usize,

    /// Games cut off before they ended
    timeouts: usize,

    window_size: usize,
}

impl RunStats {
    /// Create a tracker keeping the last `window_size` games
    pub fn new(window_size: usize) -> Self {
        Self {
            scores: VecDeque::with_capacity(window_size),
            lengths: VecDeque::with_capacity(window_size),
            ticks: VecDeque::with_capacity(window_size),
            total_games: 0,
            total_ticks: 0,
            best_score: 0,
            boards_filled: 0,
            timeouts: 0,
            window_size,
        }
    }

    /// Record a game; `reason` is `None` for a game that was cut off
    pub fn record_game(
        &mut self,
        score: u32,
        length: usize,
        ticks: u32,
        reason: Option<EndReason>,
    ) {
        Self::push_deque(&mut self.scores, score, self.window_size);
        Self::push_deque(&mut self.lengths, length, self.window_size);
        Self::push_deque(&mut self.ticks, ticks, self.window_size);
        self.total_games += 1;
        self.total_ticks += u64::from(ticks);
        self.best_score = self.best_score.max(score);
        match reason {
            Some(EndReason::BoardFilled) => self.boards_filled += 1,
            Some(EndReason::SelfCollision) => {}
            None => self.timeouts += 1,
        }
    }

    pub fn mean_score(&self) -> f32 {
        Self::mean(self.scores.iter().map(|&s| s as f32), self.scores.len())
    }

    pub fn mean_length(&self) -> f32 {
        Self::mean(self.lengths.iter().map(|&l| l as f32), self.lengths.len())
    }

    pub fn mean_ticks(&self) -> f32 {
        Self::mean(self.ticks.iter().map(|&t| t as f32), self.ticks.len())
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn boards_filled(&self) -> usize {
        self.boards_filled
    }

    pub fn timeouts(&self) -> usize {
        self.timeouts
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Ticks: {} | Score: {:.2} | Best: {} | Len: {:.1} | Survived: {:.1} | Filled: {} | Timeouts: {}",
            self.total_games,
            self.total_ticks,
            self.mean_score(),
            self.best_score,
            self.mean_length(),
            self.mean_ticks(),
            self.boards_filled,
            self.timeouts,
        )
    }

    fn mean(values: impl Iterator<Item = f32>, len: usize) -> f32 {
        if len == 0 {
            0.0
        } else {
            values.sum::<f32>() / len as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, max_size: usize) {
        if deque.len() >= max_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = RunStats::new(10);
        assert_eq!(stats.total_games(), 0);
        assert_eq!(stats.mean_score(), 0.0);
        assert_eq!(stats.mean_length(), 0.0);
        assert_eq!(stats.mean_ticks(), 0.0);
    }

    #[test]
    fn test_record_games() {
        let mut stats = RunStats::new(10);
        stats.record_game(20, 3, 100, Some(EndReason::SelfCollision));
        stats.record_game(40, 5, 300, Some(EndReason::BoardFilled));

        assert_eq!(stats.total_games(), 2);
        assert_eq!(stats.total_ticks(), 400);
        assert_eq!(stats.best_score(), 40);
        assert_eq!(stats.boards_filled(), 1);
        assert_eq!(stats.timeouts(), 0);
        assert!((stats.mean_score() - 30.0).abs() < 1e-5);
        assert!((stats.mean_length() - 4.0).abs() < 1e-5);
        assert!((stats.mean_ticks() - 200.0).abs() < 1e-5);
    }

    #[test]
    fn test_timeouts_counted() {
        let mut stats = RunStats::new(10);
        stats.record_game(90, 10, 1000, None);

        assert_eq!(stats.timeouts(), 1);
        assert_eq!(stats.boards_filled(), 0);
        assert!(stats.format_summary().contains("Timeouts: 1"));
    }

    #[test]
    fn test_rolling_window() {
        let mut stats = RunStats::new(2);
        stats.record_game(100, 1, 10, Some(EndReason::SelfCollision));
        stats.record_game(10, 1, 10, Some(EndReason::SelfCollision));
        stats.record_game(20, 1, 10, Some(EndReason::SelfCollision));

        // Only the last two games count toward the mean
        assert!((stats.mean_score() - 15.0).abs() < 1e-5);
        // Totals and best cover every game
        assert_eq!(stats.total_games(), 3);
        assert_eq!(stats.best_score(), 100);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = RunStats::new(10);
        stats.record_game(30, 4, 50, Some(EndReason::SelfCollision));

        let summary = stats.format_summary();
        assert!(summary.contains("Games: 1"));
        assert!(summary.contains("Best: 30"));
    }
}

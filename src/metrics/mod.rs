pub mod game_metrics;
pub mod run_stats;

pub use game_metrics::{GameMetrics, HeadFlash};
pub use run_stats::RunStats;

//! Headless autopilot mode
//!
//! Plays complete sessions without a terminal UI, steering with a greedy
//! pilot, and reports rolling statistics about how the games went.
//!
//! # Example
//!
//! ```rust
//! use snake_engine::game::GameConfig;
//! use snake_engine::modes::{AutoplayConfig, AutoplayMode};
//!
//! let mut config = AutoplayConfig::new(3);
//! config.game_config = GameConfig::small().with_seed(1);
//! config.max_ticks = 500;
//!
//! let mut autoplay = AutoplayMode::new(config)?;
//! let stats = autoplay.run();
//! assert_eq!(stats.total_games(), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use log::{debug, info};

use crate::game::{Direction, EndReason, GameConfig, GameEngine, GamePhase};
use crate::metrics::RunStats;

/// Configuration for autoplay mode
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    /// Number of games to play
    pub num_games: usize,

    /// A game still running after this many ticks is cut off
    pub max_ticks: u32,

    /// Print progress every N games
    pub log_frequency: usize,

    /// Game configuration (grid size, food, seed)
    pub game_config: GameConfig,
}

impl AutoplayConfig {
    pub fn new(num_games: usize) -> Self {
        Self {
            num_games,
            max_ticks: 10_000,
            log_frequency: 10,
            game_config: GameConfig::default(),
        }
    }
}

/// Steers toward the food along the shortest wrapped path
///
/// Among the turns that do not run into the body, it prefers the one that
/// brings the head closest to the food, keeping the current heading on a
/// tie. When every turn collides, or there is no food, it keeps going.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPilot;

impl GreedyPilot {
    pub fn choose(&self, engine: &GameEngine) -> Direction {
        let grid = engine.grid();
        let head = engine.head();
        let current = engine.direction();
        let Some(food) = engine.food_position() else {
            return current;
        };

        let mut best: Option<(u32, Direction)> = None;
        for direction in Direction::ALL {
            if direction.is_opposite(current) {
                continue;
            }
            let next = grid.next(head, direction);
            if engine.collides(next) {
                continue;
            }

            let distance = grid.distance(next, food);
            let better = match best {
                None => true,
                Some((best_distance, _)) => {
                    distance < best_distance || (distance == best_distance && direction == current)
                }
            };
            if better {
                best = Some((distance, direction));
            }
        }

        best.map_or(current, |(_, direction)| direction)
    }
}

/// Plays games headlessly and collects statistics
pub struct AutoplayMode {
    engine: GameEngine,
    pilot: GreedyPilot,
    stats: RunStats,
    config: AutoplayConfig,
}

impl AutoplayMode {
    pub fn new(config: AutoplayConfig) -> Result<Self> {
        let engine = GameEngine::new(config.game_config.clone())
            .context("Failed to start game session")?;

        Ok(Self {
            engine,
            pilot: GreedyPilot,
            stats: RunStats::new(100),
            config,
        })
    }

    /// Play every configured game and return the final statistics
    pub fn run(&mut self) -> &RunStats {
        self.print_header();

        for game in 0..self.config.num_games {
            if game > 0 {
                self.engine.reset();
            }

            let reason = self.play_game();
            self.stats.record_game(
                self.engine.score(),
                self.engine.length(),
                self.engine.ticks(),
                reason,
            );

            if (game + 1) % self.config.log_frequency.max(1) == 0 {
                self.print_progress(game + 1);
            }
        }

        info!("autoplay finished: {}", self.stats.format_summary());
        &self.stats
    }

    /// Play the current session to the end
    ///
    /// Returns `None` when the game was cut off by `max_ticks`.
    fn play_game(&mut self) -> Option<EndReason> {
        while self.engine.ticks() < self.config.max_ticks {
            if let GamePhase::Over(reason) = self.engine.phase() {
                return Some(reason);
            }

            let direction = self.pilot.choose(&self.engine);
            self.engine.set_direction(direction);
            self.engine.tick();
        }

        match self.engine.phase() {
            GamePhase::Over(reason) => Some(reason),
            GamePhase::Active => {
                debug!("game cut off after {} ticks", self.config.max_ticks);
                None
            }
        }
    }

    fn print_header(&self) {
        let game = &self.config.game_config;
        println!(
            "Autoplay: {} games on a {}x{} grid",
            self.config.num_games, game.grid_width, game.grid_height
        );
    }

    fn print_progress(&self, game: usize) {
        println!(
            "[Game {}/{}] {}",
            game,
            self.config.num_games,
            self.stats.format_summary()
        );
    }
}

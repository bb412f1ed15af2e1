use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::config::FoodValue;
use super::grid::Grid;
use super::state::{Food, Position, Snake};

/// Random probes tried before falling back to scanning for free cells
const MAX_RANDOM_ATTEMPTS: usize = 100;

/// Picks food cells uniformly among the cells the snake does not occupy
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    rng: StdRng,
    value: FoodValue,
}

impl FoodSpawner {
    /// Create a spawner; a `None` seed draws from OS entropy
    pub fn new(value: FoodValue, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, value }
    }

    /// Place a food item off the snake, or `None` when every cell is taken
    ///
    /// Random probing is cheap while the board is sparse; once it misses
    /// too often the free cells are enumerated and one is picked. Both
    /// paths are uniform over the free cells.
    pub fn spawn(&mut self, grid: &Grid, snake: &Snake) -> Option<Food> {
        if snake.len() >= grid.area() {
            debug!("no free cell left for food ({} cells)", grid.area());
            return None;
        }

        let position = self
            .probe(grid, snake)
            .or_else(|| self.scan(grid, snake))?;
        let value = self.roll_value();

        debug!(
            "food spawned at ({}, {}) worth {}",
            position.x, position.y, value
        );
        Some(Food { position, value })
    }

    fn probe(&mut self, grid: &Grid, snake: &Snake) -> Option<Position> {
        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let pos = Position::new(
                self.rng.gen_range(0..grid.width()) as i32,
                self.rng.gen_range(0..grid.height()) as i32,
            );
            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
        None
    }

    fn scan(&mut self, grid: &Grid, snake: &Snake) -> Option<Position> {
        let mut taken = vec![false; grid.area()];
        for segment in snake.iter() {
            taken[grid.index_of(segment)] = true;
        }

        let free: Vec<usize> = taken
            .iter()
            .enumerate()
            .filter_map(|(index, &occupied)| (!occupied).then_some(index))
            .collect();

        free.choose(&mut self.rng)
            .map(|&index| grid.position_of(index))
    }

    fn roll_value(&mut self) -> u32 {
        match self.value {
            FoodValue::Fixed(value) => value,
            FoodValue::Range { min, max } => self.rng.gen_range(min..=max),
        }
    }
}

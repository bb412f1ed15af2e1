use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;
use super::grid::MAX_EXTENT;

/// Default maximum snake length (segment buffer capacity)
pub const DEFAULT_MAX_SNAKE_LENGTH: usize = 100;

/// Default score awarded per food item
pub const DEFAULT_FOOD_VALUE: u32 = 10;

/// How much a food item is worth when eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodValue {
    /// Every food item is worth the same amount
    Fixed(u32),
    /// Each food item draws a value uniformly from `min..=max`
    Range { min: u32, max: u32 },
}

impl FoodValue {
    /// Smallest and largest value this policy can produce
    pub fn bounds(&self) -> (u32, u32) {
        match *self {
            FoodValue::Fixed(value) => (value, value),
            FoodValue::Range { min, max } => (min, max),
        }
    }
}

impl Default for FoodValue {
    fn default() -> Self {
        FoodValue::Fixed(DEFAULT_FOOD_VALUE)
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Capacity of the segment buffer; growth beyond it is dropped
    pub max_snake_length: usize,
    /// Score value policy for spawned food
    pub food_value: FoodValue,
    /// Seed for food placement; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 15,
            initial_snake_length: 1,
            max_snake_length: DEFAULT_MAX_SNAKE_LENGTH,
            food_value: FoodValue::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Same configuration with a fixed food placement seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// ```rust,no_run
    /// use snake_engine::game::GameConfig;
    /// use std::path::Path;
    ///
    /// let config = GameConfig::load(Path::new("snake.json"))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Check that a session can be built from this configuration
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width == 0
            || self.grid_height == 0
            || self.grid_width > MAX_EXTENT
            || self.grid_height > MAX_EXTENT
        {
            return Err(GameError::InvalidDimensions {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_EXTENT,
            });
        }

        // The starting body is laid out along one row, so it must fit there.
        let max_length = self.max_snake_length.min(self.grid_width);
        if self.initial_snake_length == 0 || self.initial_snake_length > max_length {
            return Err(GameError::InvalidSnakeLength {
                length: self.initial_snake_length,
                max: max_length,
            });
        }

        let (min, max) = self.food_value.bounds();
        if min == 0 || min > max {
            return Err(GameError::InvalidFoodValue { min, max });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.max_snake_length, 100);
        assert_eq!(config.food_value, FoodValue::Fixed(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = GameConfig::new(0, 10);
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_initial_length_wider_than_grid() {
        let mut config = GameConfig::new(4, 10);
        config.initial_snake_length = 5;
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidSnakeLength { length: 5, max: 4 })
        );

        config.initial_snake_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_initial_length_over_capacity() {
        let mut config = GameConfig::default();
        config.max_snake_length = 2;
        config.initial_snake_length = 3;
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidSnakeLength { length: 3, max: 2 })
        );
    }

    #[test]
    fn test_rejects_bad_food_values() {
        let mut config = GameConfig::default();
        config.food_value = FoodValue::Fixed(0);
        assert!(config.validate().is_err());

        config.food_value = FoodValue::Range { min: 5, max: 2 };
        assert_eq!(
            config.validate(),
            Err(GameError::InvalidFoodValue { min: 5, max: 2 })
        );

        config.food_value = FoodValue::Range { min: 5, max: 20 };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.json");
        std::fs::write(
            &path,
            r#"{ "grid_width": 12, "food_value": { "range": { "min": 1, "max": 3 } }, "seed": 7 }"#,
        )
        .unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.food_value, FoodValue::Range { min: 1, max: 3 });
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_height": 0 }"#).unwrap();

        assert!(GameConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GameConfig::load(&temp_dir.path().join("missing.json")).is_err());
    }
}

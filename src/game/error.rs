use thiserror::Error;

/// Errors reported synchronously by the engine
///
/// None of these are fatal: the session stays in a consistent state and the
/// caller may retry with valid input or reset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("grid dimensions {width}x{height} must both be between 1 and {max}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("initial snake length {length} must be between 1 and {max}")]
    InvalidSnakeLength { length: usize, max: usize },

    #[error("food value range {min}..={max} must be positive and non-empty")]
    InvalidFoodValue { min: u32, max: u32 },

    #[error("segment index {index} out of range for snake of length {len}")]
    SegmentOutOfRange { index: usize, len: usize },

    #[error("invalid direction value {0}, expected 0 (up), 1 (right), 2 (down) or 3 (left)")]
    InvalidDirection(i32),
}

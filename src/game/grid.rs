use super::action::Direction;
use super::error::GameError;
use super::state::Position;

/// Largest extent accepted on either axis
///
/// Coordinates are `i32` so that they cross the C boundary unchanged.
pub const MAX_EXTENT: usize = i32::MAX as usize;

/// Fixed-size toroidal grid
///
/// Moving off one edge re-enters at the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a grid, rejecting empty or oversized extents
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        let invalid = || GameError::InvalidDimensions {
            width,
            height,
            max: MAX_EXTENT,
        };

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self {
            width: i32::try_from(width).map_err(|_| invalid())?,
            height: i32::try_from(height).map_err(|_| invalid())?,
        })
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Number of cells on the grid
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// The cell one step from `pos` in `direction`, wrapping at the edges
    pub fn next(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(
            (pos.x + dx).rem_euclid(self.width),
            (pos.y + dy).rem_euclid(self.height),
        )
    }

    /// Wrap an arbitrary offset from `pos` back onto the grid
    pub fn offset(&self, pos: Position, dx: i32, dy: i32) -> Position {
        Position::new(
            (pos.x + dx).rem_euclid(self.width),
            (pos.y + dy).rem_euclid(self.height),
        )
    }

    /// True when stepping from `from` in `direction` crosses an edge
    pub fn wraps(&self, from: Position, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        !self.contains(Position::new(from.x + dx, from.y + dy))
    }

    /// Row-major index of an in-bounds cell
    pub fn index_of(&self, pos: Position) -> usize {
        pos.y as usize * self.width() + pos.x as usize
    }

    /// Position of a row-major cell index
    pub fn position_of(&self, index: usize) -> Position {
        let width = self.width();
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Signed shortest displacement from `from` to `to` on each axis
    ///
    /// Ties between going either way around are resolved toward the
    /// positive direction.
    pub fn shortest_delta(&self, from: Position, to: Position) -> (i32, i32) {
        (
            Self::wrapped_delta(to.x - from.x, self.width),
            Self::wrapped_delta(to.y - from.y, self.height),
        )
    }

    /// Toroidal Manhattan distance between two cells
    pub fn distance(&self, from: Position, to: Position) -> u32 {
        let (dx, dy) = self.shortest_delta(from, to);
        dx.unsigned_abs() + dy.unsigned_abs()
    }

    fn wrapped_delta(raw: i32, extent: i32) -> i32 {
        let forward = raw.rem_euclid(extent);
        if forward <= extent - forward {
            forward
        } else {
            forward - extent
        }
    }
}

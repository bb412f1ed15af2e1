use std::collections::VecDeque;

use super::error::GameError;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    /// Score awarded (and growth granted) when eaten
    pub value: u32,
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The head ran into the body
    SelfCollision,
    /// No free cell was left to place food on
    BoardFilled,
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Active,
    /// Terminal until the session is reset
    Over(EndReason),
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Over(_))
    }
}

/// What `Snake::advance` did with the new head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Head prepended, tail dropped
    Moved,
    /// Head prepended, tail kept
    Grew,
    /// Growth was requested at full capacity; the snake moved instead
    Capped,
}

/// The snake in the game
///
/// A fixed-capacity sequence of occupied cells with the head at index 0 and
/// the tail at `len() - 1`. The buffer never holds fewer than one segment
/// and never more than `capacity()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    capacity: usize,
}

impl Snake {
    /// Create a snake from its segments, head first
    ///
    /// Segments beyond `capacity` are truncated from the tail end.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        capacity: usize,
    ) -> Result<Self, GameError> {
        let body: VecDeque<Position> = segments.into_iter().take(capacity).collect();
        if body.is_empty() {
            return Err(GameError::InvalidSnakeLength {
                length: 0,
                max: capacity,
            });
        }

        Ok(Self { body, capacity })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Segment at `index`, counting from the head
    pub fn segment(&self, index: usize) -> Result<Position, GameError> {
        self.body
            .get(index)
            .copied()
            .ok_or(GameError::SegmentOutOfRange {
                index,
                len: self.body.len(),
            })
    }

    /// Segments from head to tail
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// True iff `pos` is any occupied cell
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True iff `pos` is an occupied cell other than the tail
    ///
    /// The tail leaves its cell on a movement tick, so the head may step
    /// onto it.
    pub fn occupies_excluding_tail(&self, pos: Position) -> bool {
        self.body.range(..self.body.len() - 1).any(|&seg| seg == pos)
    }

    /// Prepend `new_head`, keeping the tail only when growing
    ///
    /// Growth at full capacity is dropped: the length stays at the maximum
    /// and the tail is released as on a plain move.
    pub fn advance(&mut self, new_head: Position, grow: bool) -> Advance {
        let outcome = match (grow, self.is_full()) {
            (false, _) => Advance::Moved,
            (true, false) => Advance::Grew,
            (true, true) => Advance::Capped,
        };

        if outcome != Advance::Grew {
            self.body.pop_back();
        }
        self.body.push_front(new_head);

        outcome
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.body.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(head_x: i32, len: i32) -> Vec<Position> {
        (0..len).map(|i| Position::new(head_x - i, 5)).collect()
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::from_segments(line(5, 3), 100).unwrap();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.capacity(), 100);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.segment(1), Ok(Position::new(4, 5)));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_empty_snake_rejected() {
        assert!(Snake::from_segments(Vec::new(), 10).is_err());
        assert!(Snake::from_segments(line(5, 3), 0).is_err());
    }

    #[test]
    fn test_segment_out_of_range() {
        let snake = Snake::from_segments(line(5, 2), 100).unwrap();
        assert_eq!(
            snake.segment(2),
            Err(GameError::SegmentOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_advance_moves_without_growing() {
        let mut snake = Snake::from_segments(line(5, 3), 100).unwrap();

        assert_eq!(snake.advance(Position::new(6, 5), false), Advance::Moved);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_advance_grows() {
        let mut snake = Snake::from_segments(line(5, 3), 100).unwrap();

        assert_eq!(snake.advance(Position::new(6, 5), true), Advance::Grew);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_growth_capped_at_capacity() {
        let mut snake = Snake::from_segments(line(5, 3), 3).unwrap();
        assert!(snake.is_full());

        assert_eq!(snake.advance(Position::new(6, 5), true), Advance::Capped);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        let cells: Vec<Position> = snake.iter().collect();
        assert_eq!(
            cells,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::from_segments(line(5, 3), 100).unwrap();
        assert!(snake.occupies(Position::new(5, 5))); // head
        assert!(snake.occupies(Position::new(3, 5))); // tail
        assert!(!snake.occupies(Position::new(10, 10))); // empty

        assert!(snake.occupies_excluding_tail(Position::new(4, 5)));
        assert!(!snake.occupies_excluding_tail(Position::new(3, 5)));
    }

    #[test]
    fn test_single_segment_excludes_itself() {
        let snake = Snake::from_segments(line(5, 1), 100).unwrap();
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(!snake.occupies_excluding_tail(Position::new(5, 5)));
    }

    #[test]
    fn test_phase_is_over() {
        assert!(!GamePhase::Active.is_over());
        assert!(GamePhase::Over(EndReason::SelfCollision).is_over());
        assert!(GamePhase::Over(EndReason::BoardFilled).is_over());
    }
}

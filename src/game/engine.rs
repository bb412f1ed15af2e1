use log::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    food::FoodSpawner,
    grid::Grid,
    state::{Advance, EndReason, Food, GamePhase, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was already over; nothing happened
    Unchanged,
    /// The snake moved one cell
    Moved,
    /// The snake ate food worth `value`; `grew` is false when the segment
    /// buffer was already full
    Ate { value: u32, grew: bool },
    /// The head would have entered the body; the session is now over
    Collided,
    /// The snake ate the last food that could fit; the session is now over
    BoardFilled,
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    /// Whether the head crossed a grid edge this tick
    pub wrapped: bool,
}

impl TickResult {
    const UNCHANGED: TickResult = TickResult {
        outcome: TickOutcome::Unchanged,
        wrapped: false,
    };

    /// True for every tick that was not a no-op on a finished session
    pub fn changed(&self) -> bool {
        self.outcome != TickOutcome::Unchanged
    }

    pub fn ate_food(&self) -> bool {
        matches!(
            self.outcome,
            TickOutcome::Ate { .. } | TickOutcome::BoardFilled
        )
    }

    pub fn ended(&self) -> bool {
        matches!(
            self.outcome,
            TickOutcome::Collided | TickOutcome::BoardFilled
        )
    }
}

/// A single snake session
///
/// Owns the whole game state. It is mutated only through
/// [`set_direction`](Self::set_direction), [`tick`](Self::tick),
/// [`spawn_food`](Self::spawn_food) and [`reset`](Self::reset); everything
/// else is a read.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    /// Layout restored on reset
    start: Snake,
    snake: Snake,
    direction: Direction,
    /// Heading of the last movement, used to refuse turns onto the neck
    last_moved: Direction,
    /// `None` once no free cell is left for food
    food: Option<Food>,
    score: u32,
    ticks: u32,
    phase: GamePhase,
    spawner: FoodSpawner,
}

impl GameEngine {
    /// Create a session from a validated configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.grid_width, config.grid_height)?;
        let spawner = FoodSpawner::new(config.food_value, config.seed);
        let snake = Self::starting_snake(&config, &grid)?;

        let mut engine = Self {
            grid,
            start: snake.clone(),
            snake,
            direction: Direction::Right,
            last_moved: Direction::Right,
            food: None,
            score: 0,
            ticks: 0,
            phase: GamePhase::Active,
            spawner,
            config,
        };
        engine.spawn_food();

        info!(
            "session started on {}x{} grid",
            engine.grid.width(),
            engine.grid.height()
        );
        Ok(engine)
    }

    /// Create a session with default settings on a `width` x `height` grid
    pub fn initialize(width: usize, height: usize) -> Result<Self, GameError> {
        Self::new(GameConfig::new(width, height))
    }

    /// Restore a fresh session with the same grid and settings
    ///
    /// The food RNG keeps its state, so a seeded session does not replay
    /// the same food sequence after a reset.
    pub fn reset(&mut self) {
        self.snake = self.start.clone();
        self.direction = Direction::Right;
        self.last_moved = Direction::Right;
        self.score = 0;
        self.ticks = 0;
        self.phase = GamePhase::Active;
        self.spawn_food();

        info!("session reset");
    }

    /// Execute one tick of the game
    ///
    /// Returns [`TickOutcome::Unchanged`] only when the session is already
    /// over. A colliding tick ends the session without moving the snake.
    pub fn tick(&mut self) -> TickResult {
        if self.phase.is_over() {
            return TickResult::UNCHANGED;
        }

        let head = self.snake.head();
        let new_head = self.grid.next(head, self.direction);
        let wrapped = self.grid.wraps(head, self.direction);
        self.ticks = self.ticks.saturating_add(1);

        if self.snake.occupies_excluding_tail(new_head) {
            self.finish(EndReason::SelfCollision);
            return TickResult {
                outcome: TickOutcome::Collided,
                wrapped,
            };
        }

        self.last_moved = self.direction;

        let Some(food) = self.food.filter(|food| food.position == new_head) else {
            self.snake.advance(new_head, false);
            return TickResult {
                outcome: TickOutcome::Moved,
                wrapped,
            };
        };

        let value = food.value;
        let grew = match self.snake.advance(new_head, true) {
            Advance::Capped => {
                debug!("growth dropped at capacity {}", self.snake.capacity());
                false
            }
            _ => true,
        };
        self.score = self.score.saturating_add(value);

        let outcome = if self.spawn_food() {
            TickOutcome::Ate { value, grew }
        } else {
            TickOutcome::BoardFilled
        };

        TickResult { outcome, wrapped }
    }

    /// Request a new heading for the next tick
    ///
    /// Returns false, keeping the current heading, when the request is the
    /// reverse of the current heading or of the last move.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) || direction.is_opposite(self.last_moved) {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Place a new food item off the snake
    ///
    /// Returns false, removes the food and ends the session when no free
    /// cell exists.
    pub fn spawn_food(&mut self) -> bool {
        self.food = self.spawner.spawn(&self.grid, &self.snake);
        if self.food.is_none() {
            self.finish(EndReason::BoardFilled);
        }
        self.food.is_some()
    }

    /// True iff `pos` is any cell of the snake
    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// True iff moving the head onto `pos` now would end the session
    pub fn collides(&self, pos: Position) -> bool {
        self.snake.occupies_excluding_tail(pos)
    }

    pub fn is_food_at(&self, pos: Position) -> bool {
        self.food.is_some_and(|food| food.position == pos)
    }

    /// Snake segment at `index`, counting from the head
    pub fn segment_at(&self, index: usize) -> Result<Position, GameError> {
        self.snake.segment(index)
    }

    /// Snake segments from head to tail
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.snake.iter()
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn length(&self) -> usize {
        self.snake.len()
    }

    pub fn capacity(&self) -> usize {
        self.snake.capacity()
    }

    /// Current food, absent once the board has no free cell
    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn food_position(&self) -> Option<Position> {
        self.food.map(|food| food.position)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of ticks that changed the session since the last reset
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = GamePhase::Over(reason);
        info!(
            "session over ({:?}) with score {} and length {}",
            reason,
            self.score,
            self.snake.len()
        );
    }

    fn starting_snake(config: &GameConfig, grid: &Grid) -> Result<Snake, GameError> {
        Snake::from_segments(
            Self::start_cells(config, grid),
            config.max_snake_length,
        )
    }

    /// Head at the grid centre, body trailing to the left
    fn start_cells<'a>(
        config: &'a GameConfig,
        grid: &'a Grid,
    ) -> impl Iterator<Item = Position> + 'a {
        let head = Position::new((grid.width() / 2) as i32, (grid.height() / 2) as i32);
        (0..config.initial_snake_length as i32).map(move |i| grid.offset(head, -i, 0))
    }
}

#[cfg(test)]
impl GameEngine {
    /// Session with a hand-built snake and food, for scenario tests
    pub(crate) fn from_parts(
        config: GameConfig,
        segments: Vec<Position>,
        direction: Direction,
        food: Food,
    ) -> Self {
        let mut engine = Self::new(config).unwrap();
        engine.snake = Snake::from_segments(segments, engine.config.max_snake_length).unwrap();
        engine.direction = direction;
        engine.last_moved = direction;
        engine.food = Some(food);
        engine
    }
}

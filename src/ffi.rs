//! C ABI for driving a session from another language
//!
//! A session is an opaque pointer created by [`snake_create`] and released
//! by [`snake_destroy`]. Every other call borrows it. Null handles are
//! tolerated: reads return a neutral value and writes do nothing.
//!
//! Directions are encoded as `0` up, `1` right, `2` down, `3` left.
//!
//! Status codes returned by fallible calls:
//!
//! | code | meaning |
//! |------|---------|
//! | `0`  | ok |
//! | `1`  | request rejected (reversing direction) |
//! | `-1` | invalid argument or null handle |
//! | `-2` | index out of range |

use log::warn;
use std::os::raw::c_int;

use crate::game::{Direction, GameEngine, Position};

pub const SNAKE_OK: c_int = 0;
pub const SNAKE_REJECTED: c_int = 1;
pub const SNAKE_INVALID_ARGUMENT: c_int = -1;
pub const SNAKE_OUT_OF_RANGE: c_int = -2;

/// Grid cell as seen from C
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakePoint {
    pub x: c_int,
    pub y: c_int,
}

impl SnakePoint {
    /// Returned by reads on a null handle, and for the food once the board
    /// is full
    pub const NONE: SnakePoint = SnakePoint { x: -1, y: -1 };
}

impl From<Position> for SnakePoint {
    fn from(pos: Position) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

impl From<SnakePoint> for Position {
    fn from(point: SnakePoint) -> Self {
        Position::new(point.x, point.y)
    }
}

fn dimensions(width: c_int, height: c_int) -> Option<(usize, usize)> {
    Some((usize::try_from(width).ok()?, usize::try_from(height).ok()?))
}

fn build(width: c_int, height: c_int) -> Option<GameEngine> {
    let (width, height) = dimensions(width, height)?;
    match GameEngine::initialize(width, height) {
        Ok(engine) => Some(engine),
        Err(e) => {
            warn!("snake_create rejected: {}", e);
            None
        }
    }
}

fn clamp_to_c(value: usize) -> c_int {
    c_int::try_from(value).unwrap_or(c_int::MAX)
}

/// Create a session on a `width` x `height` grid
///
/// Returns null when the dimensions are not positive.
#[unsafe(no_mangle)]
pub extern "C" fn snake_create(width: c_int, height: c_int) -> *mut GameEngine {
    match build(width, height) {
        Some(engine) => Box::into_raw(Box::new(engine)),
        None => std::ptr::null_mut(),
    }
}

/// Release a session
///
/// # Safety
///
/// `handle` must be null or a pointer returned by [`snake_create`] that has
/// not been destroyed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_destroy(handle: *mut GameEngine) {
    if !handle.is_null() {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Replace the session with a fresh one on a new grid
///
/// On invalid dimensions the session is left untouched.
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_initialize(
    handle: *mut GameEngine,
    width: c_int,
    height: c_int,
) -> c_int {
    let Some(engine) = (unsafe { handle.as_mut() }) else {
        warn!("snake_initialize called with a null handle");
        return SNAKE_INVALID_ARGUMENT;
    };
    match build(width, height) {
        Some(fresh) => {
            *engine = fresh;
            SNAKE_OK
        }
        None => SNAKE_INVALID_ARGUMENT,
    }
}

/// Restore the session to its initial state on the same grid
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_reset(handle: *mut GameEngine) {
    if let Some(engine) = unsafe { handle.as_mut() } {
        engine.reset();
    }
}

/// Advance one step; true unless the session was already over
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_tick(handle: *mut GameEngine) -> bool {
    match unsafe { handle.as_mut() } {
        Some(engine) => engine.tick().changed(),
        None => false,
    }
}

/// Request a new heading
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_set_direction(handle: *mut GameEngine, direction: c_int) -> c_int {
    let Some(engine) = (unsafe { handle.as_mut() }) else {
        return SNAKE_INVALID_ARGUMENT;
    };
    match Direction::try_from(direction) {
        Ok(direction) if engine.set_direction(direction) => SNAKE_OK,
        Ok(_) => SNAKE_REJECTED,
        Err(e) => {
            warn!("snake_set_direction: {}", e);
            SNAKE_INVALID_ARGUMENT
        }
    }
}

/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_occupies(handle: *const GameEngine, point: SnakePoint) -> bool {
    unsafe { handle.as_ref() }.is_some_and(|engine| engine.occupies(point.into()))
}

/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_is_food_at(handle: *const GameEngine, point: SnakePoint) -> bool {
    unsafe { handle.as_ref() }.is_some_and(|engine| engine.is_food_at(point.into()))
}

/// Move the food to a new free cell; false when the board is full
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_spawn_food(handle: *mut GameEngine) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|engine| engine.spawn_food())
}

/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_length(handle: *const GameEngine) -> c_int {
    unsafe { handle.as_ref() }.map_or(0, |engine| clamp_to_c(engine.length()))
}

/// Write the segment at `index` (0 is the head) to `out`
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`]; `out`
/// must be null or valid for a write of one [`SnakePoint`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_segment_at(
    handle: *const GameEngine,
    index: c_int,
    out: *mut SnakePoint,
) -> c_int {
    let (Some(engine), Some(out)) = (unsafe { handle.as_ref() }, unsafe { out.as_mut() }) else {
        return SNAKE_INVALID_ARGUMENT;
    };
    let Ok(index) = usize::try_from(index) else {
        return SNAKE_OUT_OF_RANGE;
    };
    match engine.segment_at(index) {
        Ok(pos) => {
            *out = pos.into();
            SNAKE_OK
        }
        Err(_) => SNAKE_OUT_OF_RANGE,
    }
}

/// [`SnakePoint::NONE`] when there is no food
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_food_position(handle: *const GameEngine) -> SnakePoint {
    unsafe { handle.as_ref() }
        .and_then(GameEngine::food_position)
        .map_or(SnakePoint::NONE, SnakePoint::from)
}

/// `0` when there is no food
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_food_value(handle: *const GameEngine) -> c_int {
    unsafe { handle.as_ref() }
        .and_then(GameEngine::food)
        .map_or(0, |food| clamp_to_c(food.value as usize))
}

/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_score(handle: *const GameEngine) -> c_int {
    unsafe { handle.as_ref() }.map_or(0, |engine| clamp_to_c(engine.score() as usize))
}

/// A null handle reads as over
///
/// # Safety
///
/// `handle` must be null or a live pointer from [`snake_create`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn snake_is_over(handle: *const GameEngine) -> bool {
    unsafe { handle.as_ref() }.is_none_or(|engine| engine.is_over())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_create_and_destroy() {
        let handle = snake_create(20, 15);
        assert!(!handle.is_null());

        unsafe {
            assert_eq!(snake_length(handle), 1);
            assert_eq!(snake_score(handle), 0);
            assert!(!snake_is_over(handle));

            let mut head = SnakePoint::NONE;
            assert_eq!(snake_segment_at(handle, 0, &mut head), SNAKE_OK);
            assert_eq!(head, SnakePoint { x: 10, y: 7 });

            let food = snake_food_position(handle);
            assert!(snake_is_food_at(handle, food));
            assert!(!snake_occupies(handle, food));
            assert_eq!(snake_food_value(handle), 10);

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_create_rejects_bad_dimensions() {
        assert!(snake_create(0, 15).is_null());
        assert!(snake_create(20, -3).is_null());
    }

    #[test]
    fn test_tick_and_reset() {
        let handle = snake_create(20, 15);
        unsafe {
            assert!(snake_tick(handle));
            let mut head = SnakePoint::NONE;
            snake_segment_at(handle, 0, &mut head);
            assert_eq!(head, SnakePoint { x: 11, y: 7 });

            snake_reset(handle);
            snake_segment_at(handle, 0, &mut head);
            assert_eq!(head, SnakePoint { x: 10, y: 7 });
            assert_eq!(snake_score(handle), 0);

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_set_direction_codes() {
        let handle = snake_create(20, 15);
        unsafe {
            assert_eq!(snake_set_direction(handle, 3), SNAKE_REJECTED);
            assert_eq!(snake_set_direction(handle, 7), SNAKE_INVALID_ARGUMENT);
            assert_eq!(snake_set_direction(handle, -1), SNAKE_INVALID_ARGUMENT);
            assert_eq!(snake_set_direction(handle, 0), SNAKE_OK);

            snake_tick(handle);
            let mut head = SnakePoint::NONE;
            snake_segment_at(handle, 0, &mut head);
            assert_eq!(head, SnakePoint { x: 10, y: 6 });

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_segment_out_of_range() {
        let handle = snake_create(20, 15);
        unsafe {
            let mut out = SnakePoint::NONE;
            assert_eq!(snake_segment_at(handle, 1, &mut out), SNAKE_OUT_OF_RANGE);
            assert_eq!(snake_segment_at(handle, -1, &mut out), SNAKE_OUT_OF_RANGE);
            assert_eq!(out, SnakePoint::NONE);
            assert_eq!(
                snake_segment_at(handle, 0, ptr::null_mut()),
                SNAKE_INVALID_ARGUMENT
            );

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_initialize_existing_handle() {
        let handle = snake_create(20, 15);
        unsafe {
            snake_tick(handle);
            assert_eq!(snake_initialize(handle, 8, 4), SNAKE_OK);

            let mut head = SnakePoint::NONE;
            snake_segment_at(handle, 0, &mut head);
            assert_eq!(head, SnakePoint { x: 4, y: 2 });

            assert_eq!(snake_initialize(handle, 0, 4), SNAKE_INVALID_ARGUMENT);
            snake_segment_at(handle, 0, &mut head);
            assert_eq!(head, SnakePoint { x: 4, y: 2 });

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_is_food_at_other_cells() {
        let handle = snake_create(20, 15);
        unsafe {
            let food = snake_food_position(handle);
            let beside = SnakePoint {
                x: (food.x + 1) % 20,
                y: food.y,
            };
            assert!(!snake_is_food_at(handle, beside));
            assert!(!snake_is_food_at(handle, SnakePoint { x: 10, y: 7 }));
            assert!(!snake_is_food_at(handle, SnakePoint::NONE));

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_tick_after_game_over() {
        // 2x1: eating the only food fills the board on the first tick.
        let handle = snake_create(2, 1);
        unsafe {
            assert!(!snake_is_over(handle));
            assert!(snake_tick(handle));
            assert!(snake_is_over(handle));
            assert_eq!(snake_length(handle), 2);

            assert!(!snake_tick(handle));
            assert!(!snake_tick(handle));
            assert_eq!(snake_length(handle), 2);
            assert_eq!(snake_score(handle), 10);

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_no_food_on_full_board() {
        let handle = snake_create(1, 1);
        unsafe {
            assert!(snake_is_over(handle));
            assert_eq!(snake_food_position(handle), SnakePoint::NONE);
            assert_eq!(snake_food_value(handle), 0);
            assert!(!snake_is_food_at(handle, SnakePoint { x: 0, y: 0 }));
            assert!(!snake_spawn_food(handle));

            snake_destroy(handle);
        }
    }

    #[test]
    fn test_spawn_food_moves_off_snake() {
        let handle = snake_create(6, 6);
        unsafe {
            for _ in 0..20 {
                assert!(snake_spawn_food(handle));
                let food = snake_food_position(handle);
                assert!(!snake_occupies(handle, food));
            }
            snake_destroy(handle);
        }
    }

    #[test]
    fn test_null_handle_is_tolerated() {
        let null = ptr::null_mut::<GameEngine>();
        unsafe {
            assert!(!snake_tick(null));
            assert!(snake_is_over(null));
            assert_eq!(snake_score(null), 0);
            assert_eq!(snake_length(null), 0);
            assert_eq!(snake_food_position(null), SnakePoint::NONE);
            assert_eq!(snake_set_direction(null, 0), SNAKE_INVALID_ARGUMENT);
            assert_eq!(snake_initialize(null, 10, 10), SNAKE_INVALID_ARGUMENT);
            assert!(!snake_spawn_food(null));
            snake_reset(null);
            snake_destroy(null);
        }
    }
}

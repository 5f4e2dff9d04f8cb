//! Greedy one-step autoplay.
//!
//! Every tick the snake turns toward whichever safe neighbour cell is closest
//! to the food by Manhattan distance. There is no lookahead, so the snake can
//! and does box itself in against its own body.

use super::action::Direction;
use super::state::GameState;

/// Directions whose next head cell is on the grid and off the snake,
/// in `Direction::ALL` order
pub fn safe_directions(state: &GameState) -> Vec<Direction> {
    let head = state.snake.head();
    Direction::ALL
        .into_iter()
        .filter(|direction| state.is_safe(head.moved_in_direction(*direction)))
        .collect()
}

/// Direction the autoplayer wants for the next tick.
///
/// Ties go to the earliest of Up, Down, Left, Right. With no safe direction,
/// or no food on the board, the current direction is kept.
pub fn autoplay_direction(state: &GameState) -> Direction {
    let current = state.snake.direction;
    let Some(food) = state.food else {
        return current;
    };
    let head = state.snake.head();

    Direction::ALL
        .into_iter()
        .map(|direction| (direction, head.moved_in_direction(direction)))
        .filter(|(_, next)| state.is_safe(*next))
        .min_by_key(|(_, next)| next.manhattan_distance(food))
        .map_or(current, |(direction, _)| direction)
}

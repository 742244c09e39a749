use super::state::{CollisionType, GameState};

/// Check the head against the board edges and the body.
/// `None` means the snake is still alive.
pub fn check_collision(state: &GameState) -> Option<CollisionType> {
    let head = state.snake.head();

    if !state.is_in_bounds(head) {
        return Some(CollisionType::Wall);
    }

    if state.snake.collides_with_body(head) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

use std::collections::HashSet;

use super::action::Direction;

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

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Committed direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first. `None` when there
    /// are no segments.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let body: Vec<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Turn to `direction` unless that would reverse the committed direction.
    /// Returns whether the turn was accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Every trailing segment takes its predecessor's place, then the head
    /// advances by the direction vector.
    pub fn move_step(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.pop();
        self.body.insert(0, new_head);
    }

    /// Append a segment on top of the current tail. It separates from the
    /// tail on the next move.
    pub fn add_segment(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Set of cells covered by the body
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Whether `pos` lies on a segment the head can actually run into.
    /// The neck (index 1) is skipped: it is always adjacent to the head.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(2).any(|segment| *segment == pos)
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

impl CollisionType {
    pub fn describe(&self) -> &'static str {
        match self {
            CollisionType::Wall => "hit the wall",
            CollisionType::SelfCollision => "ran into itself",
        }
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Terminal; carries what ended the game
    GameOver(CollisionType),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            phase: Phase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.grid_width
            && pos.y >= 0
            && (pos.y as usize) < self.grid_height
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// All board cells not covered by the snake, row by row
    pub fn free_cells(&self) -> Vec<Position> {
        let occupied = self.snake.occupied_cells();
        (0..self.grid_height as i32)
            .flat_map(|y| (0..self.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !occupied.contains(pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(cells: &[(i32, i32)]) -> Vec<Position> {
        cells.iter().copied().map(Position::from).collect()
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Still), pos);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_from_segments_requires_a_head() {
        assert_eq!(Snake::from_segments(Vec::new(), Direction::Right), None);

        let snake = Snake::from_segments(segments(&[(4, 2), (3, 2)]), Direction::Right).unwrap();
        assert_eq!(snake.head(), Position::new(4, 2));
        assert_eq!(snake.tail(), Position::new(3, 2));
    }

    #[test]
    fn test_single_segment_move() {
        let mut snake = Snake::from_segments(segments(&[(1, 1)]), Direction::Right).unwrap();
        snake.move_step();
        assert_eq!(snake.body, segments(&[(2, 1)]));
    }

    #[test]
    fn test_move_shifts_trailing_segments() {
        let mut snake = Snake::from_segments(segments(&[(3, 2), (2, 2), (2, 3), (2, 4)]), Direction::Up).unwrap();
        let before = snake.body.clone();

        snake.move_step();

        assert_eq!(snake.head(), before[0].moved_in_direction(Direction::Up));
        for i in 1..snake.len() {
            assert_eq!(snake.body[i], before[i - 1]);
        }
    }

    #[test]
    fn test_still_snake_does_not_move() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Still, 1);
        snake.move_step();
        assert_eq!(snake.head(), Position::new(0, 0));
    }

    #[test]
    fn test_add_segment_stacks_on_tail_until_next_move() {
        let mut snake = Snake::from_segments(segments(&[(2, 1), (1, 1)]), Direction::Right).unwrap();
        snake.add_segment();
        assert_eq!(snake.body, segments(&[(2, 1), (1, 1), (1, 1)]));
        assert_eq!(snake.occupied_cells().len(), 2);

        snake.move_step();
        assert_eq!(snake.body, segments(&[(3, 1), (2, 1), (1, 1)]));
        assert_eq!(snake.occupied_cells().len(), 3);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut snake = Snake::from_segments(segments(&[(2, 1), (1, 1)]), Direction::Right).unwrap();
        assert!(!snake.change_direction(Direction::Left));
        assert_eq!(snake.direction, Direction::Right);

        assert!(snake.change_direction(Direction::Down));
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_any_turn_allowed_when_still() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Still, 1);
        assert!(snake.change_direction(Direction::Left));
        assert_eq!(snake.direction, Direction::Left);
    }

    #[test]
    fn test_collision_skips_head_and_neck() {
        let snake = Snake::from_segments(segments(&[(5, 5), (4, 5), (3, 5)]), Direction::Right).unwrap();
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(!snake.collides_with_body(Position::new(4, 5))); // neck
        assert!(snake.collides_with_body(Position::new(3, 5)));
        assert!(!snake.collides_with_body(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Some(Position::new(10, 10)),
            20,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
        assert!(!state.is_in_bounds(Position::new(0, -1)));
    }

    #[test]
    fn test_free_cells_excludes_snake() {
        let state = GameState::new(
            Snake::from_segments(segments(&[(0, 0), (1, 0)]), Direction::Left).unwrap(),
            None,
            2,
            2,
        );
        assert_eq!(state.free_cells(), segments(&[(0, 1), (1, 1)]));
        assert!(state.is_running());
    }
}

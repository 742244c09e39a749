use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    collision::check_collision,
    config::GameConfig,
    food::FoodSpawner,
    state::{CollisionType, GameState, Phase, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// No free cell was left for new food
    pub board_full: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    spawner: FoodSpawner,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let spawner = FoodSpawner::from_seed(config.seed);
        Self { config, spawner }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new game: a single segment in the top-left corner, standing
    /// still, with no food until the first tick.
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(Position::new(0, 0), Direction::Still, 1);
        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            "new game"
        );
        GameState::new(snake, None, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one tick: turn, move, eat, restock food, then check for death
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_running() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        if let Action::Move(direction) = action {
            state.snake.change_direction(direction);
        }

        state.snake.move_step();

        let mut info = StepInfo::default();

        if state.food == Some(state.snake.head()) {
            state.food = None;
            state.snake.add_segment();
            state.score += 1;
            info.ate_food = true;
            debug!(score = state.score, length = state.snake.len(), "food eaten");
        }

        if state.food.is_none() && !self.spawner.spawn(state) {
            info.board_full = true;
            debug!(length = state.snake.len(), "board full, no food spawned");
        }

        state.steps += 1;

        if let Some(collision) = check_collision(state) {
            state.phase = Phase::GameOver(collision);
            info.collision_type = Some(collision);
            info!(
                score = state.score,
                steps = state.steps,
                cause = collision.describe(),
                "game over"
            );
        }

        StepResult {
            terminated: !state.is_running(),
            info,
        }
    }
}

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::{Grid, place_food},
    state::{GameOverReason, GameState, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the game is over after this step
    pub terminated: bool,
    /// Why the game ended, if it ended on this step
    pub game_over: Option<GameOverReason>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    width: i32,
    height: i32,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game engine with a fixed seed for reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let width = i32::try_from(config.screen_width).context("screen_width overflows i32")?;
        let height = i32::try_from(config.screen_height).context("screen_height overflows i32")?;
        let cell_size = i32::try_from(config.cell_size).context("cell_size overflows i32")?;
        let grid = Grid::new(config.columns(), config.rows(), cell_size);

        Ok(Self {
            config,
            grid,
            width,
            height,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Start a new game: one snake at the center heading right, plus food
    pub fn reset(&mut self) -> GameState {
        let grid = self.grid;
        let head = grid.cell(grid.columns / 2, grid.rows / 2);

        let snake = Snake::new(
            head,
            Direction::Right,
            self.config.initial_snake_length,
            grid.cell_size,
        );

        let food = self.spawn_food_avoid_snake(&snake);
        let mut state = GameState::new(
            snake,
            food.unwrap_or(head),
            self.width,
            self.height,
            grid.cell_size,
        );

        // No free cell: the food is left under the head and never drawn
        if food.is_none() {
            state.end(GameOverReason::BoardFull);
        }

        tracing::info!(
            columns = grid.columns,
            rows = grid.rows,
            head = %head,
            food = %state.food.position,
            "new game"
        );
        state
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_running() {
            return StepResult {
                ate_food: false,
                terminated: true,
                game_over: None,
            };
        }

        if let Action::Move(requested) = action {
            if !state.snake.turn(requested) {
                tracing::debug!(?requested, current = ?state.snake.direction, "reversal ignored");
            }
        }

        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.snake.direction, state.cell_size);
        let ate_food = new_head == state.food.position;

        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if let Some(reason) = self.check_collision(state, new_head) {
            state.end(reason);
        } else if ate_food {
            state.score += 1;
            match self.spawn_food_avoid_snake(&state.snake) {
                Some(pos) => {
                    tracing::debug!(food = %pos, length = state.snake.len(), "food eaten");
                    state.food.position = pos;
                }
                None => state.end(GameOverReason::BoardFull),
            }
        }

        StepResult {
            ate_food,
            terminated: !state.is_running(),
            game_over: state.reason,
        }
    }

    /// Check whether the head that was just placed ends the game
    fn check_collision(&self, state: &GameState, head: Position) -> Option<GameOverReason> {
        if !state.is_in_bounds(head) {
            return Some(GameOverReason::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        place_food(
            &mut self.rng,
            self.grid,
            &snake.body,
            self.config.food_placement_attempts,
        )
    }
}

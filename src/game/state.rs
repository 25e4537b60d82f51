use std::fmt;

use super::action::Direction;

/// A position on the playfield
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

    /// Move position `step` units in a direction
    pub fn moved_in_direction(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction the snake moved on its last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with its body trailing `cell_size` apart behind the head
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx * cell_size, -dy * cell_size);

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Turn towards `requested` unless it would reverse the snake.
    /// Returns whether the heading was accepted.
    pub fn turn(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Prepend a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        if !grow {
            self.body.pop();
        }
        self.body.insert(0, new_head);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// A piece of food occupying one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub size: i32,
}

impl Food {
    pub fn new(position: Position, size: i32) -> Self {
        Self { position, size }
    }
}

/// Whether the session is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake left the playfield
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// No free cell was left to place food
    BoardFull,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::Wall => write!(f, "hit the wall"),
            GameOverReason::SelfCollision => write!(f, "ran into itself"),
            GameOverReason::BoardFull => write!(f, "filled the board"),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Never on the snake while running; left under the head by a `BoardFull` end
    pub food: Food,
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub status: GameStatus,
    pub reason: Option<GameOverReason>,
    pub score: u32,
    pub steps: u32,
}

impl GameState {
    /// Create a new running game state
    pub fn new(snake: Snake, food: Position, width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            snake,
            food: Food::new(food, cell_size),
            width,
            height,
            cell_size,
            status: GameStatus::Running,
            reason: None,
            score: 0,
            steps: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Move to GameOver. The first reason sticks; the state never returns to Running.
    pub fn end(&mut self, reason: GameOverReason) {
        if self.is_running() {
            self.status = GameStatus::GameOver;
            self.reason = Some(reason);
        }
    }

    /// Check if a position is within the playfield
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(100, 100);
        assert_eq!(pos.moved_by(20, 0), Position::new(120, 100));
        assert_eq!(pos.moved_in_direction(Direction::Left, 20), Position::new(80, 100));
        assert_eq!(pos.moved_in_direction(Direction::Down, 20), Position::new(100, 120));
        assert_eq!(pos.moved_in_direction(Direction::Up, 1), Position::new(100, 99));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 20);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(100, 100));
        assert_eq!(snake.body[1], Position::new(80, 100));
        assert_eq!(snake.tail(), Position::new(60, 100));
    }

    #[test]
    fn test_snake_never_empty() {
        let snake = Snake::new(Position::new(0, 0), Direction::Up, 0, 20);
        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 20);

        snake.advance(Position::new(120, 100), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(120, 100));
        assert_eq!(snake.tail(), Position::new(80, 100));

        snake.advance(Position::new(140, 100), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(80, 100));
    }

    #[test]
    fn test_turn_rejects_reversal() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right, 1, 20);
        assert!(!snake.turn(Direction::Left));
        assert_eq!(snake.direction, Direction::Right);

        assert!(snake.turn(Direction::Up));
        assert_eq!(snake.direction, Direction::Up);
        assert!(snake.turn(Direction::Up));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 20);
        assert!(!snake.collides_with_body(Position::new(100, 100))); // head
        assert!(snake.collides_with_body(Position::new(80, 100))); // body
        assert!(!snake.collides_with_body(Position::new(200, 200))); // empty
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(100, 100), Direction::Right, 3, 20),
            Position::new(200, 200),
            640,
            480,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(620, 460)));
        assert!(!state.is_in_bounds(Position::new(-20, 0)));
        assert!(!state.is_in_bounds(Position::new(640, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 480)));
    }

    #[test]
    fn test_game_over_is_final() {
        let mut state = GameState::new(
            Snake::new(Position::new(100, 100), Direction::Right, 1, 20),
            Position::new(200, 200),
            640,
            480,
            20,
        );
        assert!(state.is_running());

        state.end(GameOverReason::Wall);
        state.end(GameOverReason::SelfCollision);

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.reason, Some(GameOverReason::Wall));
    }
}

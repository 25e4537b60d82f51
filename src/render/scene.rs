//! What to draw for one tick, independent of the output device
//!
//! A scene is an ordered list of filled rectangles in playfield units plus an
//! optional overlay. Later rectangles are drawn over earlier ones.

use crate::game::{Direction, GameOverReason, GameState, Position};

/// What a rectangle is filled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    SnakeHead(Direction),
    SnakeBody,
    Food,
}

/// An axis-aligned filled rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub fill: Fill,
}

impl FilledRect {
    fn cell(pos: Position, size: i32, fill: Fill) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size,
            height: size,
            fill,
        }
    }
}

/// Drawn over the playfield once the game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    GameOver {
        score: u32,
        reason: Option<GameOverReason>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub rects: Vec<FilledRect>,
    pub overlay: Option<Overlay>,
}

/// Build the scene for the current state: snake head, body, then food
///
/// Food is left out when it sits under the snake. That only happens once the
/// game has ended with a full board and no cell was left to move it to.
pub fn compose(state: &GameState) -> Scene {
    let size = state.cell_size;
    let mut rects = Vec::with_capacity(state.snake.len() + 1);

    rects.push(FilledRect::cell(
        state.snake.head(),
        size,
        Fill::SnakeHead(state.snake.direction),
    ));
    rects.extend(
        state
            .snake
            .body_segments()
            .iter()
            .map(|&pos| FilledRect::cell(pos, size, Fill::SnakeBody)),
    );
    if !state.is_occupied_by_snake(state.food.position) {
        rects.push(FilledRect::cell(
            state.food.position,
            state.food.size,
            Fill::Food,
        ));
    }

    let overlay = (!state.is_running()).then_some(Overlay::GameOver {
        score: state.score,
        reason: state.reason,
    });

    Scene {
        width: state.width,
        height: state.height,
        cell_size: size,
        rects,
        overlay,
    }
}

//! Food placement on the cell grid
//!
//! Placement first tries rejection sampling, which is cheap while most of
//! the board is free. After a bounded number of misses it enumerates the
//! free cells and picks one uniformly, so a crowded board still places food
//! and a full board reports that nothing is left.

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::Position;

/// The grid food can be placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
    pub cell_size: i32,
}

impl Grid {
    pub fn new(columns: usize, rows: usize, cell_size: i32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Position of the cell at (column, row)
    pub fn cell(&self, column: usize, row: usize) -> Position {
        Position::new(column as i32 * self.cell_size, row as i32 * self.cell_size)
    }

    /// Every cell on the grid, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| self.cell(col, row)))
    }
}

/// Pick a cell not covered by `occupied`, or `None` when every cell is taken
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    occupied: &[Position],
    max_attempts: usize,
) -> Option<Position> {
    if grid.cell_count() == 0 {
        return None;
    }

    for _ in 0..max_attempts {
        let column = rng.gen_range(0..grid.columns);
        let row = rng.gen_range(0..grid.rows);
        let pos = grid.cell(column, row);

        if !occupied.contains(&pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = grid.cells().filter(|pos| !occupied.contains(pos)).collect();
    tracing::debug!(
        attempts = max_attempts,
        free_cells = free.len(),
        "rejection sampling exhausted, choosing from free cells"
    );
    free.choose(rng).copied()
}

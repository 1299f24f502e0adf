use rand::Rng;
use rand::seq::IteratorRandom;

use crate::grid::{Cell, GridSize};
use crate::snake::Snake;

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    /// Creates food at an explicit position, mainly for tests.
    #[must_use]
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food in a free cell.
    ///
    /// The position starts as a center placeholder and is immediately
    /// relocated, so the first real position never silently stays at the
    /// default while the snake sits there.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Self {
        let mut food = Self {
            position: bounds.center(),
        };
        food.relocate(rng, bounds, snake);
        food
    }

    /// Moves the food to a uniformly random cell the snake does not occupy.
    ///
    /// Blind samples are capped at four times the grid capacity; past the
    /// cap the free cells are enumerated and one is chosen uniformly, so
    /// the call terminates on any board. Returns `false` when the snake
    /// covers the entire grid, leaving the position untouched.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> bool {
        for _ in 0..bounds.total_cells().saturating_mul(4) {
            let candidate = Cell {
                x: rng.gen_range(0..i32::from(bounds.width)),
                y: rng.gen_range(0..i32::from(bounds.height)),
            };
            if !snake.occupies(candidate) {
                self.position = candidate;
                return true;
            }
        }

        let free = bounds.cells().filter(|cell| !snake.occupies(*cell));
        match free.choose(rng) {
            Some(cell) => {
                self.position = cell;
                true
            }
            None => false,
        }
    }
}

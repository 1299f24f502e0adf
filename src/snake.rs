use std::collections::VecDeque;

use rand::Rng;

use crate::grid::{Cell, GridSize};
use crate::input::Direction;

/// Result of one movement tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The snake advanced; `vacated` is the tail cell that emptied this
    /// tick, `None` while the body is still growing toward its target.
    Moved { vacated: Option<Cell> },
    /// The head ran into the body; the snake has been reset in place.
    SelfCollision,
}

/// Mutable snake state: body segments, buffered direction, growth target.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
    target_length: usize,
}

impl Snake {
    /// Creates a one-cell snake at the grid center facing a random direction.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(bounds: GridSize, rng: &mut R) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            direction: Direction::Right,
            pending: None,
            target_length: 1,
        };
        snake.reset(bounds, rng);
        snake
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The growth target matches the segment count, so the body holds
    /// its length until `grow` is called.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        let target_length = segments.len().max(1);
        Self {
            body: VecDeque::from(segments),
            direction,
            pending: None,
            target_length,
        }
    }

    /// Restarts the snake: one segment at center, random direction.
    ///
    /// This is the recovery path from self-collision and doubles as the
    /// new-round entry point; prior state is replaced wholesale.
    pub fn reset<R: Rng + ?Sized>(&mut self, bounds: GridSize, rng: &mut R) {
        self.body.clear();
        self.body.push_front(bounds.center());
        self.direction = Direction::random(rng);
        self.pending = None;
        self.target_length = 1;
    }

    /// Buffers a direction change for the next tick.
    ///
    /// A reversal of the current direction is dropped silently; a later
    /// request before the next tick overwrites an earlier one.
    pub fn request_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.pending = Some(direction);
    }

    /// Applies one movement tick and reports what happened.
    ///
    /// The buffered direction is consumed first, then the head advances
    /// one cell with toroidal wrapping. Landing on any segment past the
    /// neck resets the snake; otherwise the tail trails the head until
    /// the body has reached its growth target.
    pub fn advance<R: Rng + ?Sized>(&mut self, bounds: GridSize, rng: &mut R) -> MoveOutcome {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        if let Some(next) = self.pending.take() {
            self.direction = next;
        }

        let new_head = self.head().offset(self.direction).wrapped(bounds);

        // The neck cannot be hit thanks to reversal filtering; every
        // other segment, tail included, counts as a collision.
        if self.body.iter().skip(2).any(|segment| *segment == new_head) {
            self.reset(bounds, rng);
            return MoveOutcome::SelfCollision;
        }

        self.body.push_front(new_head);
        let vacated = if self.body.len() > self.target_length {
            self.body.pop_back()
        } else {
            None
        };

        MoveOutcome::Moved { vacated }
    }

    /// Raises the growth target by one; the body catches up one cell per tick.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the length the body is growing toward.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

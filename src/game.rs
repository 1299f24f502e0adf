use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::food::Food;
use crate::grid::{Cell, GridSize};
use crate::input::GameInput;
use crate::snake::{MoveOutcome, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
}

/// What one simulation tick amounted to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Plain advance, nothing eaten.
    Advanced,
    /// The head landed on food; the snake grew and the food moved.
    AteFood,
    /// The head hit the body; a fresh round started at length 1.
    SelfCollision,
    /// The snake covered every cell, so no food fits; the board is
    /// cleared and a fresh round started.
    BoardFilled,
}

/// Render request emitted once per tick.
///
/// The renderer reads the body and food position from borrowed state;
/// `vacated` names the trailing cell that emptied this tick, if any.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub vacated: Option<Cell>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub status: GameStatus,
    pub tick_count: u64,
    /// Completed rounds: self-collisions plus filled boards.
    pub rounds: u32,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::from_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::from_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn from_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::new(bounds, &mut rng);
        let food = Food::spawn(&mut rng, bounds, &snake);

        Self {
            snake,
            food,
            status: GameStatus::Running,
            tick_count: 0,
            rounds: 0,
            bounds,
            rng,
        }
    }

    /// Returns the grid dimensions this state simulates on.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Advances the simulation by one tick and reports the render request.
    ///
    /// Returns `None` while paused. Self-collision and a filled board are
    /// absorbed as round resets, never surfaced as errors.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.status != GameStatus::Running {
            return None;
        }

        self.tick_count += 1;

        match self.snake.advance(self.bounds, &mut self.rng) {
            MoveOutcome::SelfCollision => {
                self.rounds += 1;
                // The reset body may have landed under the food.
                if self.snake.occupies(self.food.position) {
                    let _ = self.food.relocate(&mut self.rng, self.bounds, &self.snake);
                }
                Some(TickReport {
                    outcome: TickOutcome::SelfCollision,
                    vacated: None,
                })
            }
            MoveOutcome::Moved { vacated } => {
                if self.snake.head() != self.food.position {
                    return Some(TickReport {
                        outcome: TickOutcome::Advanced,
                        vacated,
                    });
                }

                self.snake.grow();
                if self.food.relocate(&mut self.rng, self.bounds, &self.snake) {
                    return Some(TickReport {
                        outcome: TickOutcome::AteFood,
                        vacated,
                    });
                }

                // No free cell left for food: the board is beaten.
                self.rounds += 1;
                self.snake.reset(self.bounds, &mut self.rng);
                let _ = self.food.relocate(&mut self.rng, self.bounds, &self.snake);
                Some(TickReport {
                    outcome: TickOutcome::BoardFilled,
                    vacated: None,
                })
            }
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Running {
                    self.snake.request_direction(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Running => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Running,
                };
            }
            GameInput::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::food::Food;
    use crate::grid::{Cell, GridSize};
    use crate::input::{Direction, GameInput};
    use crate::snake::Snake;

    use super::{GameState, GameStatus, TickOutcome};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 10,
    };

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = GameState::new_with_seed(BOUNDS, 1);
        state.snake = Snake::from_segments(vec![Cell { x: 1, y: 1 }], Direction::Right);
        state.food = Food::at(Cell { x: 2, y: 1 });

        let report = state.tick().expect("running state must tick");
        assert_eq!(report.outcome, TickOutcome::AteFood);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.target_length(), 2);

        state.tick();
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn food_relocates_off_the_body_after_being_eaten() {
        let mut state = GameState::new_with_seed(BOUNDS, 2);
        state.snake = Snake::from_segments(vec![Cell { x: 4, y: 4 }], Direction::Right);
        state.food = Food::at(Cell { x: 5, y: 4 });

        state.tick();

        assert_ne!(state.food.position, Cell { x: 5, y: 4 });
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn self_collision_starts_a_new_round() {
        let bounds = GridSize {
            width: 6,
            height: 6,
        };
        let mut state = GameState::new_with_seed(bounds, 3);
        state.snake = Snake::from_segments(
            vec![
                Cell { x: 2, y: 2 },
                Cell { x: 2, y: 3 },
                Cell { x: 3, y: 3 },
                Cell { x: 3, y: 2 },
            ],
            Direction::Right,
        );
        state.food = Food::at(Cell { x: 0, y: 0 });

        let report = state.tick().expect("running state must tick");

        assert_eq!(report.outcome, TickOutcome::SelfCollision);
        assert_eq!(report.vacated, None);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), bounds.center());
        assert_eq!(state.rounds, 1);
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn food_under_a_reset_snake_is_relocated() {
        let bounds = GridSize {
            width: 6,
            height: 6,
        };
        let mut state = GameState::new_with_seed(bounds, 4);
        state.snake = Snake::from_segments(
            vec![
                Cell { x: 0, y: 0 },
                Cell { x: 1, y: 0 },
                Cell { x: 1, y: 1 },
                Cell { x: 0, y: 1 },
            ],
            Direction::Down,
        );
        // Food sits exactly where the reset body will appear.
        state.food = Food::at(bounds.center());

        let report = state.tick().expect("running state must tick");

        assert_eq!(report.outcome, TickOutcome::SelfCollision);
        assert!(!state.snake.occupies(state.food.position));
        // The incidental overlap is not an eat.
        assert_eq!(state.snake.target_length(), 1);
    }

    #[test]
    fn pause_swallows_ticks_and_direction_input() {
        let mut state = GameState::new_with_seed(BOUNDS, 5);
        state.snake = Snake::from_segments(vec![Cell { x: 4, y: 4 }], Direction::Right);
        state.food = Food::at(Cell { x: 0, y: 0 });

        state.apply_input(GameInput::Pause);
        assert_eq!(state.status, GameStatus::Paused);
        assert!(state.tick().is_none());
        assert_eq!(state.tick_count, 0);

        state.apply_input(GameInput::Direction(Direction::Down));
        state.apply_input(GameInput::Pause);
        state.tick();

        // The buffered Down was dropped while paused.
        assert_eq!(state.snake.head(), Cell { x: 5, y: 4 });
    }

    #[test]
    fn filling_the_board_clears_it_and_starts_over() {
        let bounds = GridSize {
            width: 3,
            height: 2,
        };
        let mut state = GameState::new_with_seed(bounds, 6);
        // Five of six cells occupied with growth still pending, so the
        // tail holds its cell; eating the last free cell wins the board.
        state.snake = Snake::from_segments(
            vec![
                Cell { x: 1, y: 0 },
                Cell { x: 1, y: 1 },
                Cell { x: 0, y: 1 },
                Cell { x: 0, y: 0 },
                Cell { x: 2, y: 1 },
            ],
            Direction::Right,
        );
        state.snake.grow();
        state.food = Food::at(Cell { x: 2, y: 0 });

        let report = state.tick().expect("running state must tick");

        assert_eq!(report.outcome, TickOutcome::BoardFilled);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.rounds, 1);
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn seeded_states_are_reproducible() {
        let a = GameState::new_with_seed(BOUNDS, 9);
        let b = GameState::new_with_seed(BOUNDS, 9);

        assert_eq!(a.food.position, b.food.position);
        assert_eq!(a.snake.head(), b.snake.head());
        assert_eq!(a.snake.direction(), b.snake.direction());
    }
}

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::Rng;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit vector for this direction, y growing downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Draws one of the four directions uniformly at random.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..4) {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            _ => Self::Right,
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
}

/// Polls crossterm key events and translates them into game inputs.
///
/// Polling never blocks: the handler drains whatever is queued and
/// returns immediately so the tick clock stays in charge of pacing.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the next pending input, or `None` when the queue is empty.
    pub fn poll(&mut self) -> io::Result<Option<GameInput>> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };

            // Windows terminals also deliver release/repeat events.
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(Some(GameInput::Quit));
            }

            let input = match key.code {
                KeyCode::Up | KeyCode::Char('w') => GameInput::Direction(Direction::Up),
                KeyCode::Down | KeyCode::Char('s') => GameInput::Direction(Direction::Down),
                KeyCode::Left | KeyCode::Char('a') => GameInput::Direction(Direction::Left),
                KeyCode::Right | KeyCode::Char('d') => GameInput::Direction(Direction::Right),
                KeyCode::Char('p') | KeyCode::Char(' ') => GameInput::Pause,
                KeyCode::Char('q') | KeyCode::Esc => GameInput::Quit,
                _ => continue,
            };

            return Ok(Some(input));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Direction;

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn delta_matches_screen_coordinates() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn random_direction_eventually_covers_all_four() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];

        for _ in 0..200 {
            let index = match Direction::random(&mut rng) {
                Direction::Up => 0,
                Direction::Down => 1,
                Direction::Left => 2,
                Direction::Right => 3,
            };
            seen[index] = true;
        }

        assert_eq!(seen, [true; 4]);
    }
}

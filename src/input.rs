//! Turns raw keyboard and touch input into move directions.

use core::str::FromStr;

use crate::grid::Direction;

/// Swipes shorter than this on both axes are ignored.
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Maps a DOM `KeyboardEvent.key` value to a direction.
pub fn decode_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}

/// Maps a swipe displacement to a direction. Screen coordinates: positive
/// `dy` points down. The longer axis wins; ties go to the vertical axis.
pub fn decode_swipe(dx: f32, dy: f32) -> Option<Direction> {
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    if dx.abs() < MIN_SWIPE_DISTANCE && dy.abs() < MIN_SWIPE_DISTANCE {
        return None;
    }

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    } else if dy > 0.0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}

/// Follows one touch gesture from start to end.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
    last: (f32, f32),
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a gesture unless input is currently refused. Returns whether
    /// the gesture is being tracked.
    pub fn start(&mut self, x: f32, y: f32, accepting: bool) -> bool {
        if !accepting {
            self.start = None;
            return false;
        }

        self.start = Some((x, y));
        self.last = (x, y);
        true
    }

    pub fn track(&mut self, x: f32, y: f32) {
        if self.start.is_some() {
            self.last = (x, y);
        }
    }

    /// Finishes the gesture and decodes it.
    pub fn end(&mut self) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        let (ex, ey) = self.last;

        decode_swipe(ex - sx, ey - sy)
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

/// A line typed into the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Reset,
    /// Leave the game and go back to where it was started from.
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "reset" | "restart" => Ok(Command::Reset),
            "q" | "quit" | "exit" | "menu" => Ok(Command::Quit),
            other => other
                .parse()
                .map(Command::Move)
                .map_err(|_| format!("unknown command: {}", s.trim())),
        }
    }
}

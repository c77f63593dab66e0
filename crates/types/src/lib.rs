//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, score reporting).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 18 rows (indexed 0-17, top to bottom)
//! - **Spawn position**: row 0, column `BOARD_WIDTH / 2 - 1`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DROP_INTERVAL_MS` | 400 | Automatic drop cadence |
//! | `SOFT_DROP_INTERVAL_MS` | 50 | Drop cadence while soft drop is held |
//! | `SOFT_DROP_TAP_MS` | 80 | A release faster than this counts as a tap |
//! | `SOFT_DROP_RELEASE_TIMEOUT_MS` | 150 | Hold ends without a repeat (no release events) |
//! | `SOFT_DROP_REPEAT_DELAY_MS` | 500 | Wait for the first OS auto-repeat (no release events) |
//!
//! # Examples
//!
//! ```
//! use dropstack_types::{Color, Position, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(Color::Coral.hex(), "#e54b4b");
//! assert_eq!(Position::spawn(), Position::new(0, 4));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 18));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (18 rows)
pub const BOARD_HEIGHT: usize = 18;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Automatic drop cadence
pub const DROP_INTERVAL_MS: u32 = 400;

/// Drop cadence while soft drop is held
pub const SOFT_DROP_INTERVAL_MS: u32 = 50;

/// A soft-drop press released within this window is a tap (one immediate step).
pub const SOFT_DROP_TAP_MS: u32 = 80;

/// Without key-release events, a held soft drop ends after this long without a repeat.
pub const SOFT_DROP_RELEASE_TIMEOUT_MS: u32 = 150;

/// Without key-release events, a second press this soon after the first turns a tap into a hold.
///
/// Covers the usual OS auto-repeat delay (250-500ms).
pub const SOFT_DROP_REPEAT_DELAY_MS: u32 = 500;

/// Points per cleared row. Every clear size pays the same per-row rate.
pub const SCORE_PER_LINE: u32 = 300;

/// Level of a fresh game.
pub const STARTING_LEVEL: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(DROP_INTERVAL_MS, 400);
        assert_eq!(SOFT_DROP_INTERVAL_MS, 50);
        assert_eq!(SOFT_DROP_TAP_MS, 80);
        assert_eq!(SCORE_PER_LINE, 300);
    }

    #[test]
    fn spawn_column_is_centered_for_two_wide_pieces() {
        assert_eq!(Position::spawn().col, 4);
        assert_eq!(Position::spawn().row, 0);
    }

    #[test]
    fn position_offset() {
        let p = Position::new(3, 4);
        assert_eq!(p.offset(Direction::Down), Some(Position::new(4, 4)));
        assert_eq!(p.offset(Direction::Left), Some(Position::new(3, 3)));
        assert_eq!(p.offset(Direction::Right), Some(Position::new(3, 5)));
    }

    #[test]
    fn position_offset_at_i8_edges_is_none() {
        assert_eq!(Position::new(i8::MAX, 0).offset(Direction::Down), None);
        assert_eq!(Position::new(0, i8::MIN).offset(Direction::Left), None);
        assert_eq!(Position::new(0, i8::MAX).offset(Direction::Right), None);
        assert_eq!(Position::new(i8::MAX, 0).translate(-1, 0), Some(Position::new(126, 0)));
    }

    #[test]
    fn palette_is_seven_distinct_colors() {
        for (i, a) in Color::ALL.iter().enumerate() {
            for b in &Color::ALL[i + 1..] {
                assert_ne!(a.rgb(), b.rgb());
            }
        }
    }
}

/// The seven palette colors a piece can be painted with.
///
/// Colors are drawn independently of the shape, so any tetromino can carry any color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Coral,
    Crimson,
    Mustard,
    Navy,
    Cyan,
    Green,
    Blush,
}

impl Color {
    /// All palette entries in their canonical order.
    pub const ALL: [Color; 7] = [
        Color::Coral,
        Color::Crimson,
        Color::Mustard,
        Color::Navy,
        Color::Cyan,
        Color::Green,
        Color::Blush,
    ];

    /// 24-bit RGB components
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Coral => (0xe5, 0x4b, 0x4b),
            Color::Crimson => (0x9a, 0x03, 0x1e),
            Color::Mustard => (0xfc, 0xdc, 0x4d),
            Color::Navy => (0x00, 0x53, 0x97),
            Color::Cyan => (0x0b, 0xbc, 0xd6),
            Color::Green => (0x20, 0xad, 0x65),
            Color::Blush => (0xf8, 0xeb, 0xee),
        }
    }

    /// CSS-style hex string
    ///
    /// # Examples
    ///
    /// ```
    /// use dropstack_types::Color;
    ///
    /// assert_eq!(Color::Green.hex(), "#20ad65");
    /// ```
    pub fn hex(self) -> &'static str {
        match self {
            Color::Coral => "#e54b4b",
            Color::Crimson => "#9a031e",
            Color::Mustard => "#fcdc4d",
            Color::Navy => "#005397",
            Color::Cyan => "#0bbcd6",
            Color::Green => "#20ad65",
            Color::Blush => "#f8ebee",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Filled cell, tagged with the color of the piece that locked there
///
/// A cell is filled exactly when it carries a color.
pub type Cell = Option<Color>;

/// Board coordinate of a piece's top-left anchor.
///
/// Signed so that candidate positions left of column 0 can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Where every new piece enters the board.
    pub const fn spawn() -> Self {
        Self {
            row: 0,
            col: (BOARD_WIDTH / 2 - 1) as i8,
        }
    }

    /// Shift by `(dr, dc)`. `None` when either coordinate leaves the `i8` range.
    pub fn translate(self, dr: i8, dc: i8) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(dr)?,
            col: self.col.checked_add(dc)?,
        })
    }

    /// The neighbouring position one cell in `direction`, if representable.
    pub fn offset(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        self.translate(dr, dc)
    }
}

/// Directions a falling piece can be moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) delta
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// These are the intents the input layer produces. Holding soft drop is not an
/// action: it is passed to every tick as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down immediately (locks if it cannot move)
    MoveDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Toggle pause state
    Pause,
    /// Restart the game (when game over or at any time)
    Restart,
}

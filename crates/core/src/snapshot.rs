//! Snapshot - the read-only view handed to renderers and other observers.

use crate::catalog::Piece;
use crate::types::{Cell, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// The falling piece and where it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub position: Position,
    pub piece: Piece,
}

/// Status line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status {
    pub lines: u32,
    pub score: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<Piece>,
    /// Landing row/col of `active`; absent once the game is over.
    pub ghost: Option<Position>,
    pub paused: bool,
    pub game_over: bool,
    pub status: Status,
    pub episode_id: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
            active: None,
            next: None,
            ghost: None,
            paused: false,
            game_over: false,
            status: Status::default(),
            episode_id: 0,
        }
    }
}

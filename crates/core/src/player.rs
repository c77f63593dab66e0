//! Player controller - the falling piece
//!
//! Owns the current piece, where it is, and the preview of what comes next.
//! Every move and rotation is checked through [`is_valid`]; a rejected change
//! leaves the player untouched.

use crate::board::Board;
use crate::catalog::Piece;
use crate::shape::Shape;
use crate::types::{Direction, Position};
use crate::validate::is_valid;

/// The falling piece plus the preview of the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePlayer {
    /// Top-left anchor of `current`'s matrix
    pub position: Position,
    pub current: Piece,
    pub next: Piece,
}

impl ActivePlayer {
    pub fn new(position: Position, current: Piece, next: Piece) -> Self {
        Self {
            position,
            current,
            next,
        }
    }

    /// Whether the current piece fits where it is
    pub fn fits(&self, board: &Board) -> bool {
        is_valid(self.position, &self.current.shape, board)
    }

    /// The position a move in `direction` would lead to, or the current one if blocked.
    pub fn candidate(&self, direction: Direction, board: &Board) -> Position {
        match self.position.offset(direction) {
            Some(moved) if is_valid(moved, &self.current.shape, board) => moved,
            _ => self.position,
        }
    }

    /// Move one cell. Returns false (no-op) when blocked.
    ///
    /// A blocked down move is how landing is detected.
    pub fn try_move(&mut self, direction: Direction, board: &Board) -> bool {
        let next = self.candidate(direction, board);
        if next == self.position {
            return false;
        }
        self.position = next;
        true
    }

    /// Rotate 90° clockwise in place. Returns false (no-op) when the rotated shape
    /// does not fit at the current position; there are no wall kicks.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = self.current.shape.rotated();
        if !is_valid(self.position, &rotated, board) {
            return false;
        }
        self.current.shape = rotated;
        true
    }

    /// Where the current piece would come to rest if dropped straight down.
    pub fn ghost(&self, board: &Board) -> Position {
        compute_ghost(self.position, &self.current.shape, board)
    }
}

/// Slide `shape` down from `position` while it stays valid; return the last valid row.
///
/// Uses the same validator as real moves, so the preview can never disagree with a drop.
pub fn compute_ghost(position: Position, shape: &Shape, board: &Board) -> Position {
    let mut ghost = position;
    loop {
        match ghost.offset(Direction::Down) {
            Some(below) if is_valid(below, shape, board) => ghost = below,
            _ => return ghost,
        }
    }
}

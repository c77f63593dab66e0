//! Line-clear engine
//!
//! Detects full rows, removes them and tallies the result. Row compaction is
//! done in place by [`Board::clear_full_rows`].

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::scoring::line_clear_score;
use crate::types::BOARD_HEIGHT;

/// Outcome of resolving a board after a lock-in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Original indices of removed rows, bottom to top
    pub rows: ArrayVec<usize, BOARD_HEIGHT>,
    pub lines: u32,
    pub score: u32,
}

impl LineClear {
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }
}

/// Remove every full row from `board` and report how many went and what they score.
///
/// With no full rows the board is left untouched and the result is empty.
pub fn resolve(board: &mut Board) -> LineClear {
    let has_full = (0..BOARD_HEIGHT).any(|row| board.is_row_full(row));
    if !has_full {
        return LineClear::default();
    }

    let rows = board.clear_full_rows();
    let lines = rows.len() as u32;
    LineClear {
        rows,
        lines,
        score: line_clear_score(lines),
    }
}

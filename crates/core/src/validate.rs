//! Collision validation
//!
//! The single source of truth for "can this shape sit here". Movement,
//! rotation, spawning and the ghost projection all go through [`is_valid`].

use crate::board::Board;
use crate::shape::Shape;
use crate::types::Position;

/// True only if every occupied cell of `shape` anchored at `position` is on the board and empty.
///
/// All four bounds are checked, including rows above the top edge. An anchor so far
/// out that a cell coordinate overflows `i8` is rejected too.
pub fn is_valid(position: Position, shape: &Shape, board: &Board) -> bool {
    shape.cells().all(|(dr, dc)| {
        position
            .translate(dr, dc)
            .is_some_and(|cell| board.is_free(cell.row, cell.col))
    })
}

//! Board module - manages the game grid
//!
//! The board is a 10x18 grid where each cell is empty or filled with a color.
//! Dimensions never change; only cell contents mutate.
//! Coordinates: (row, col) where row ranges 0..17 (top to bottom), col ranges 0..9 (left to right)

use arrayvec::ArrayVec;

use crate::shape::{Shape, MAX_SHAPE_SIZE};
use crate::types::{Cell, Color, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// One board row
pub type Row = [Cell; BOARD_WIDTH];

/// The game board - 18 rows x 10 columns, row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<(usize, usize)> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize, col as usize))
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|(r, c)| self.rows[r][c])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some((r, c)) => {
                self.rows[r][c] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and filled
    pub fn is_filled(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// In bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(|cell| cell.is_some()))
    }

    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.rows
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Stamp a shape's occupied cells into the board with the given color.
    ///
    /// Returns false (and writes nothing) if any cell is out of bounds or already filled.
    pub fn stamp(&mut self, position: Position, shape: &Shape, color: Color) -> bool {
        let mut cells: ArrayVec<Position, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }> = ArrayVec::new();
        for (dr, dc) in shape.cells() {
            match position.translate(dr, dc) {
                Some(cell) if self.is_free(cell.row, cell.col) => cells.push(cell),
                _ => return false,
            }
        }

        for cell in cells {
            self.set(cell.row, cell.col, Some(color));
        }
        true
    }

    /// Remove every full row, shift the rows above down, and refill the top with empty rows.
    ///
    /// Returns the indices (in the original board) of the removed rows, bottom to top.
    /// Two-pointer compaction from the bottom; no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut cleared = ArrayVec::new();
        let mut write = BOARD_HEIGHT;

        for read in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read) {
                cleared.push(read);
            } else {
                write -= 1;
                if write != read {
                    self.rows[write] = self.rows[read];
                }
            }
        }

        for row in &mut self.rows[..write] {
            *row = [None; BOARD_WIDTH];
        }

        cleared
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.rows = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` is empty, any other character is a filled cell. Rows shorter than the
    /// board are padded with empty cells. Handy for tests and fixtures.
    ///
    /// # Examples
    ///
    /// ```
    /// use dropstack_core::Board;
    /// use dropstack_types::Color;
    ///
    /// let board = Board::from_text(&["##########"], Color::Navy);
    /// assert!(board.is_row_full(17));
    /// assert!(!board.is_row_full(16));
    /// ```
    pub fn from_text(lines: &[&str], color: Color) -> Self {
        let mut board = Self::new();
        for (i, line) in lines.iter().rev().take(BOARD_HEIGHT).enumerate() {
            let row = BOARD_HEIGHT - 1 - i;
            for (col, ch) in line.chars().take(BOARD_WIDTH).enumerate() {
                if ch != '.' {
                    board.rows[row][col] = Some(color);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some((0, 0)));
        assert_eq!(Board::index(17, 9), Some((17, 9)));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, -1), None);
        assert_eq!(Board::index(18, 0), None);
        assert_eq!(Board::index(0, 10), None);
    }

    #[test]
    fn test_stamp_writes_color() {
        let mut board = Board::new();
        let o = ShapeKind::O.shape();
        assert!(board.stamp(Position::new(16, 4), &o, Color::Cyan));

        for (r, c) in [(16, 4), (16, 5), (17, 4), (17, 5)] {
            assert_eq!(board.get(r, c), Some(Some(Color::Cyan)));
        }
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_stamp_rejects_overlap_without_writing() {
        let mut board = Board::new();
        board.set(17, 5, Some(Color::Navy));
        let o = ShapeKind::O.shape();

        assert!(!board.stamp(Position::new(16, 4), &o, Color::Cyan));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_stamp_far_off_board_is_refused() {
        let mut board = Board::new();
        let t = ShapeKind::T.shape();

        assert!(!board.stamp(Position::new(i8::MAX, 0), &t, Color::Cyan));
        assert!(!board.stamp(Position::new(0, i8::MAX), &t, Color::Cyan));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_clear_full_rows_compacts() {
        let mut board = Board::from_text(
            &[
                "#.........", // row 15
                "##########", // row 16 (full)
                "..#.......", // row 17
            ],
            Color::Green,
        );

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[16]);
        assert!(board.is_filled(16, 0));
        assert!(board.is_filled(17, 2));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_from_text_bottom_aligns() {
        let board = Board::from_text(&["#", "..#"], Color::Coral);
        assert!(board.is_filled(16, 0));
        assert!(board.is_filled(17, 2));
        assert_eq!(board.filled_count(), 2);
    }
}

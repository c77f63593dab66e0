//! Board, validator and line clear through the public facade.

use dropstack::core::{
    compute_ghost, is_valid, resolve, Board, RandomSource, Shape, ShapeKind, SimpleRng,
};
use dropstack::types::{Color, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Board with roughly `fill_percent` of cells filled.
fn random_board(rng: &mut SimpleRng, fill_percent: u32) -> Board {
    let mut board = Board::new();
    for row in 0..BOARD_HEIGHT as i8 {
        for col in 0..BOARD_WIDTH as i8 {
            if rng.next_range(100) < fill_percent {
                board.set(row, col, Some(Color::Green));
            }
        }
    }
    board
}

/// Reference answer computed cell by cell.
fn expected_valid(position: Position, shape: &Shape, board: &Board) -> bool {
    shape.cells().all(|(r, c)| {
        let row = position.row + r;
        let col = position.col + c;
        row >= 0
            && col >= 0
            && (row as usize) < BOARD_HEIGHT
            && (col as usize) < BOARD_WIDTH
            && board.get(row, col) == Some(None)
    })
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_count(), 0);
    for row in 0..BOARD_HEIGHT as i8 {
        for col in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(row, col), Some(None));
        }
    }
}

#[test]
fn test_board_out_of_bounds_is_not_free() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, BOARD_WIDTH as i8), None);
    assert!(!board.is_free(BOARD_HEIGHT as i8, 0));
    assert!(!board.is_free(0, -1));
}

#[test]
fn test_is_valid_matches_reference_on_random_boards() {
    let mut rng = SimpleRng::new(2024);
    for _ in 0..200 {
        let board = random_board(&mut rng, 30);
        for kind in ShapeKind::ALL {
            let mut shape = kind.shape();
            for _ in 0..4 {
                for row in -3..=BOARD_HEIGHT as i8 {
                    for col in -3..=BOARD_WIDTH as i8 {
                        let pos = Position::new(row, col);
                        assert_eq!(
                            is_valid(pos, &shape, &board),
                            expected_valid(pos, &shape, &board),
                            "{} at ({row}, {col})",
                            kind.as_str()
                        );
                    }
                }
                shape = shape.rotated();
            }
        }
    }
}

#[test]
fn test_stamp_refuses_invalid_placement() {
    let mut board = Board::from_text(&["#........."], Color::Navy);
    let o = ShapeKind::O.shape();
    assert!(!board.stamp(Position::new(16, 0), &o, Color::Cyan));
    assert_eq!(board.filled_count(), 1);
    assert!(board.stamp(Position::new(15, 0), &o, Color::Cyan));
    assert_eq!(board.filled_count(), 5);
}

#[test]
fn test_resolve_removes_exactly_the_full_rows() {
    let mut rng = SimpleRng::new(7);
    for _ in 0..100 {
        let mut board = random_board(&mut rng, 60);
        let full: Vec<usize> = (0..BOARD_HEIGHT)
            .filter(|&r| rng.next_range(3) == 0)
            .collect();
        for &row in &full {
            for col in 0..BOARD_WIDTH as i8 {
                board.set(row as i8, col, Some(Color::Crimson));
            }
        }
        // Any other row that happens to be full counts too.
        let k = (0..BOARD_HEIGHT).filter(|&r| board.is_row_full(r)).count();
        let survivors: Vec<_> = board
            .rows()
            .iter()
            .enumerate()
            .filter(|(r, _)| !board.is_row_full(*r))
            .map(|(_, row)| *row)
            .collect();

        let clear = resolve(&mut board);
        assert_eq!(clear.lines as usize, k);
        assert_eq!(clear.score, 300 * k as u32);
        assert_eq!(board.height(), BOARD_HEIGHT);
        assert!((0..BOARD_HEIGHT).all(|r| !board.is_row_full(r)));

        // Survivors keep their order, packed against the floor.
        let rows = board.rows();
        for r in 0..k {
            assert!(rows[r].iter().all(|c| c.is_none()));
        }
        assert_eq!(&rows[k..], &survivors[..]);
    }
}

#[test]
fn test_resolve_without_full_rows_is_idempotent() {
    let mut board = Board::from_text(&["#.#.#.#.#.", "##########", ".........."], Color::Blush);
    // The middle row is full; the first resolve clears it, the second is a no-op.
    assert_eq!(resolve(&mut board).lines, 1);
    let before = board.clone();
    let clear = resolve(&mut board);
    assert!(clear.is_empty());
    assert_eq!(clear.score, 0);
    assert_eq!(board, before);
}

#[test]
fn test_anchor_at_i8_limit_is_invalid() {
    let board = Board::new();
    let far = Position::new(i8::MAX, 0);
    for kind in ShapeKind::ALL {
        assert!(!is_valid(far, &kind.shape(), &board), "{}", kind.as_str());
        assert_eq!(compute_ghost(far, &kind.shape(), &board), far);
    }
}

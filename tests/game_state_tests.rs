//! Game flow scenarios driven through `GameState`.

use dropstack::core::{
    level_threshold, next_level, Board, GameEvent, GameState, Phase, RandomSource, ShapeKind,
    SimpleRng, StepOutcome,
};
use dropstack::types::{Color, Direction, GameAction, Position, BOARD_HEIGHT, BOARD_WIDTH};

/// Replays a fixed list of `next_range` answers, cycling.
struct Scripted {
    picks: Vec<u32>,
    at: usize,
}

impl Scripted {
    fn new(picks: &[u32]) -> Self {
        Self {
            picks: picks.to_vec(),
            at: 0,
        }
    }

    /// Every piece is an O in the first palette color.
    fn only_o() -> Self {
        Self::new(&[1, 0])
    }
}

impl RandomSource for Scripted {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_range(&mut self, max: u32) -> u32 {
        let v = self.picks[self.at % self.picks.len()] % max;
        self.at += 1;
        v
    }
}

fn o_game(board: Board) -> GameState<Scripted> {
    let mut game = GameState::with_rng(Scripted::only_o()).with_board(board);
    game.start();
    game
}

#[test]
fn test_o_piece_lands_on_row_16() {
    let mut game = o_game(Board::new());
    let player = *game.player().unwrap();
    assert_eq!(player.current.kind, ShapeKind::O);
    assert_eq!(player.position, Position::new(0, 4));

    let board = game.board().clone();
    let mut moved = player;
    let successes = (0..17)
        .filter(|_| moved.try_move(Direction::Down, &board))
        .count();
    assert_eq!(successes, 16);
    assert_eq!(moved.position, Position::new(16, 4));

    // Same descent through the game: the first blocked step locks.
    for _ in 0..16 {
        assert_eq!(game.step_down(), StepOutcome::Moved);
    }
    assert_eq!(game.player().unwrap().position.row, 16);
    assert_eq!(game.step_down(), StepOutcome::Locked { lines: 0 });
    assert_eq!(game.board().filled_count(), 4);
    assert!(game.board().is_filled(16, 4) && game.board().is_filled(17, 5));
    assert_eq!(game.player().unwrap().position, Position::spawn());
}

#[test]
fn test_completing_a_row_scores_300() {
    // Bottom row full except columns 4 and 5, where the O will land.
    let board = Board::from_text(&["####..####"], Color::Navy);
    let mut game = o_game(board);

    while game.step_down() == StepOutcome::Moved {}

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 300);
    // The O's upper half drops into the bottom row.
    assert_eq!(game.board().filled_count(), 2);
    assert!(game.board().is_filled(17, 4) && game.board().is_filled(17, 5));

    let events: Vec<_> = game.drain_events().collect();
    assert_eq!(
        events,
        vec![GameEvent::Locked {
            lines_cleared: 1,
            score_gained: 300
        }]
    );
}

#[test]
fn test_tick_drives_the_drop_cadence() {
    let mut game = o_game(Board::new());
    assert!(!game.tick(399, false));
    assert!(game.tick(1, false));
    assert_eq!(game.player().unwrap().position.row, 1);

    // Soft drop: 50ms per row.
    assert!(game.tick(100, true));
    assert_eq!(game.player().unwrap().position.row, 3);
}

#[test]
fn test_pause_suspends_the_timer() {
    let mut game = o_game(Board::new());
    assert!(game.apply_action(GameAction::Pause));
    assert!(!game.tick(10_000, false));
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert_eq!(game.player().unwrap().position, Position::spawn());

    game.apply_action(GameAction::Pause);
    assert!(game.tick(400, false));
}

#[test]
fn test_level_advances_one_step_per_evaluation() {
    assert_eq!(level_threshold(1), 1600);
    assert_eq!(next_level(100_000, 1), 2);

    // Twelve stacked rows with a 2-wide well: every O clears two of them.
    let rows: Vec<&str> = std::iter::repeat("####..####").take(12).collect();
    let mut game = o_game(Board::from_text(&rows, Color::Green));
    let mut level_ups = Vec::new();

    for _ in 0..6 {
        while game.step_down() == StepOutcome::Moved {}
        level_ups.extend(game.drain_events().filter_map(|e| match e {
            GameEvent::LevelUp { level } => Some(level),
            _ => None,
        }));
    }

    // 3600 points crosses 1600 but not the level 2 threshold of 5400.
    assert_eq!(game.lines(), 12);
    assert_eq!(game.score(), 3600);
    assert_eq!(level_ups, vec![2]);
    assert_eq!(game.level(), 2);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_game_over_is_emitted_once() {
    // Columns 4..=5 filled from row 2 down: the next O has nowhere to go.
    let mut rows = vec!["..........", ".........."];
    rows.extend(std::iter::repeat("....##....").take(BOARD_HEIGHT - 2));
    let board = Board::from_text(&rows, Color::Mustard);
    let mut game = o_game(board);
    assert_eq!(game.phase(), Phase::Falling);

    assert_eq!(game.step_down(), StepOutcome::GameOver { score: 0 });
    assert!(game.game_over());

    // Nothing moves afterwards and no second GameOver appears.
    assert_eq!(game.step_down(), StepOutcome::Idle);
    assert!(!game.tick(10_000, true));
    assert!(!game.apply_action(GameAction::Rotate));
    let overs = game
        .drain_events()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(overs, 1);
}

#[test]
fn test_restart_after_game_over() {
    let mut rows = vec!["..........", ".........."];
    rows.extend(std::iter::repeat("....##....").take(BOARD_HEIGHT - 2));
    let mut game = o_game(Board::from_text(&rows, Color::Mustard));
    game.step_down();
    assert!(game.game_over());

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.episode_id(), 1);
}

#[test]
fn test_rotation_keeps_validity_or_changes_nothing() {
    let mut rng = SimpleRng::new(99);
    for seed in 0..200 {
        let mut board = Board::new();
        for row in 4..BOARD_HEIGHT as i8 {
            for col in 0..BOARD_WIDTH as i8 {
                if rng.next_range(100) < 35 {
                    board.set(row, col, Some(Color::Cyan));
                }
            }
        }
        let mut game = GameState::new(seed).with_board(board);
        game.start();

        for _ in 0..40 {
            if !game.playable() {
                break;
            }
            match rng.next_range(4) {
                0 => game.apply_action(GameAction::MoveLeft),
                1 => game.apply_action(GameAction::MoveRight),
                2 => game.apply_action(GameAction::MoveDown),
                _ => {
                    let before = *game.player().unwrap();
                    let rotated = game.apply_action(GameAction::Rotate);
                    let after = *game.player().unwrap();
                    if rotated {
                        assert_eq!(after.position, before.position);
                        assert_eq!(after.current.shape, before.current.shape.rotated());
                        assert!(after.fits(game.board()));
                    } else {
                        assert_eq!(after, before);
                    }
                    rotated
                }
            };
        }
    }
}

#[test]
fn test_ghost_matches_hard_landing() {
    let mut game = GameState::new(5);
    game.start();
    for _ in 0..20 {
        let ghost = game.ghost().unwrap();
        let mut dropped = *game.player().unwrap();
        while dropped.try_move(Direction::Down, game.board()) {}
        assert_eq!(ghost, dropped.position);

        while game.step_down() == StepOutcome::Moved {}
        if game.game_over() {
            break;
        }
    }
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::new(31337);
    let mut b = GameState::with_rng(SimpleRng::new(31337));
    a.start();
    b.start();
    for _ in 0..30 {
        assert_eq!(a.player().map(|p| p.current), b.player().map(|p| p.current));
        while a.step_down() == StepOutcome::Moved {}
        while b.step_down() == StepOutcome::Moved {}
    }
}

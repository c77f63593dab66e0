//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, catalog, player and scoring.
//! It owns the drop timer and runs the lock-in / spawn / game-over state machine:
//!
//! ```text
//! Ready --start--> Falling --blocked down move--> (lock, clear, spawn) --> Falling
//!                                                                     \--> GameOver
//! ```
//!
//! Locking and spawning happen synchronously inside a single step, so only
//! `Ready`, `Falling` and `GameOver` are ever observable. `paused` is an
//! orthogonal flag that freezes the timer and player input.

use log::{debug, info, warn};

use crate::board::Board;
use crate::catalog::next_player;
use crate::line_clear::resolve;
use crate::player::ActivePlayer;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::next_level;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, Status};
use crate::types::{
    Direction, GameAction, Position, DROP_INTERVAL_MS, SOFT_DROP_INTERVAL_MS, STARTING_LEVEL,
};

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, no piece spawned yet
    Ready,
    Falling,
    /// Terminal until restart
    GameOver,
}

/// Result of one downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing happened (not started, paused, or over)
    Idle,
    Moved,
    /// The piece could not move, was stamped, and a new piece spawned
    Locked { lines: u32 },
    /// The piece locked and the next one had no room
    GameOver { score: u32 },
}

/// Things observers may want to react to, drained with [`GameState::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Locked { lines_cleared: u32, score_gained: u32 },
    LevelUp { level: u32 },
    /// Emitted exactly once per game
    GameOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    board: Board,
    player: Option<ActivePlayer>,
    rng: R,
    phase: Phase,
    paused: bool,
    score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
    soft_dropping: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    pieces_locked: u32,
    events: Vec<GameEvent>,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game drawing pieces from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            board: Board::new(),
            player: None,
            rng,
            phase: Phase::Ready,
            paused: false,
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            drop_timer_ms: 0,
            soft_dropping: false,
            episode_id: 0,
            pieces_locked: 0,
            events: Vec::new(),
        }
    }

    /// Replace the board before the game starts (puzzles, fixtures).
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.spawn_from(None);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Falling and not paused
    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn player(&self) -> Option<&ActivePlayer> {
        self.player.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current drop cadence
    pub fn drop_interval_ms(&self) -> u32 {
        if self.soft_dropping {
            SOFT_DROP_INTERVAL_MS
        } else {
            DROP_INTERVAL_MS
        }
    }

    /// Landing position of the current piece
    pub fn ghost(&self) -> Option<Position> {
        self.player.map(|p| p.ghost(&self.board))
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.rows();
        out.active = self.player.map(|p| ActiveSnapshot {
            position: p.position,
            piece: p.current,
        });
        out.next = self.player.map(|p| p.next);
        out.ghost = if self.game_over() { None } else { self.ghost() };
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.status = Status {
            lines: self.lines,
            score: self.score,
            level: self.level,
        };
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Draw the next player and check it has room; the game ends if it does not.
    fn spawn_from(&mut self, previous: Option<&ActivePlayer>) -> bool {
        let player = next_player(previous, &mut self.rng);
        let fits = player.fits(&self.board);
        self.player = Some(player);
        self.drop_timer_ms = 0;

        if fits {
            self.phase = Phase::Falling;
            return true;
        }

        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        info!(
            "game over: score={} lines={} level={} pieces={}",
            self.score, self.lines, self.level, self.pieces_locked
        );
        false
    }

    /// Stamp the landed piece, clear rows, score them and spawn the next piece.
    fn lock_and_spawn(&mut self, player: ActivePlayer) -> StepOutcome {
        let piece = player.current;
        let stamped = self.board.stamp(player.position, &piece.shape, piece.color);
        debug_assert!(stamped, "a falling piece always fits where it lands");
        if !stamped {
            warn!(
                "lock of {} at ({}, {}) overlapped the stack",
                piece.kind.as_str(),
                player.position.row,
                player.position.col
            );
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let clear = resolve(&mut self.board);
        if !clear.is_empty() {
            self.lines = self.lines.saturating_add(clear.lines);
            self.add_score(clear.score);
        }
        debug!(
            "locked {} at ({}, {}): cleared {} rows",
            piece.kind.as_str(),
            player.position.row,
            player.position.col,
            clear.lines
        );
        self.events.push(GameEvent::Locked {
            lines_cleared: clear.lines,
            score_gained: clear.score,
        });

        if self.spawn_from(Some(&player)) {
            StepOutcome::Locked { lines: clear.lines }
        } else {
            StepOutcome::GameOver { score: self.score }
        }
    }

    /// Add points, then evaluate the level threshold once.
    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        let level = next_level(self.score, self.level);
        if level != self.level {
            self.level = level;
            self.events.push(GameEvent::LevelUp { level });
            info!("level up: {}", level);
        }
    }

    /// Move the piece down one row, locking it if it cannot move.
    pub fn step_down(&mut self) -> StepOutcome {
        if !self.playable() {
            return StepOutcome::Idle;
        }
        let Some(mut player) = self.player else {
            return StepOutcome::Idle;
        };

        if player.try_move(Direction::Down, &self.board) {
            self.player = Some(player);
            return StepOutcome::Moved;
        }

        self.lock_and_spawn(player)
    }

    fn try_move(&mut self, direction: Direction) -> bool {
        let board = &self.board;
        match self.player.as_mut() {
            Some(player) => player.try_move(direction, board),
            None => false,
        }
    }

    fn try_rotate(&mut self) -> bool {
        let board = &self.board;
        match self.player.as_mut() {
            Some(player) => player.try_rotate(board),
            None => false,
        }
    }

    /// Advance the drop timer by `elapsed_ms`.
    ///
    /// `soft_drop` is whether the soft-drop input is currently held; switching it
    /// restarts the timer at the new cadence. Returns true if the piece moved or locked.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        if !self.playable() {
            return false;
        }

        if soft_drop != self.soft_dropping {
            self.soft_dropping = soft_drop;
            self.drop_timer_ms = 0;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        let interval = self.drop_interval_ms();
        let mut changed = false;

        while self.drop_timer_ms >= interval {
            self.drop_timer_ms -= interval;
            match self.step_down() {
                StepOutcome::Moved => changed = true,
                StepOutcome::Locked { .. } => {
                    // The new piece starts a fresh interval.
                    return true;
                }
                StepOutcome::GameOver { .. } => return true,
                StepOutcome::Idle => break,
            }
        }

        changed
    }

    /// Apply a game action
    ///
    /// Movement and rotation are ignored while paused or after game over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.phase != Phase::Falling {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if !self.playable() => false,
            GameAction::MoveLeft => self.try_move(Direction::Left),
            GameAction::MoveRight => self.try_move(Direction::Right),
            GameAction::MoveDown => self.step_down() != StepOutcome::Idle,
            GameAction::Rotate => self.try_rotate(),
        }
    }

    /// Reset board, score, lines and level, then spawn a fresh player.
    ///
    /// The random source keeps its position, so a restarted game continues the sequence.
    pub fn restart(&mut self) {
        self.board.clear();
        self.player = None;
        self.phase = Phase::Ready;
        self.paused = false;
        self.score = 0;
        self.level = STARTING_LEVEL;
        self.lines = 0;
        self.drop_timer_ms = 0;
        self.soft_dropping = false;
        self.pieces_locked = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.start();
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminals, networking, or storage, making it:
//!
//! - **Deterministic**: Same seed produces the same piece sequence
//! - **Testable**: Every rule is a synchronous in-memory mutation
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`shape`]: Binary shape matrices, the seven tetrominoes, 90° rotation
//! - [`rng`]: Injectable random source with a seeded LCG default
//! - [`catalog`]: Random piece generation and player hand-off (current/next)
//! - [`board`]: 10x18 grid of colored cells, lock-in stamping, row compaction
//! - [`validate`]: Collision validation of a shape at a position
//! - [`line_clear`]: Full-row detection, removal and tally
//! - [`player`]: Falling piece movement, rotation and ghost projection
//! - [`scoring`]: Per-line score and cubic level thresholds
//! - [`game_state`]: The state machine and drop timer tying it all together
//! - [`snapshot`]: Read-only view handed to renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each piece is one of 7 shapes with one of 7 colors
//! - **Plain rotation**: clockwise 90°, rejected outright when blocked (no wall kicks)
//! - **Instant lock**: a down move that cannot happen locks the piece
//! - **Scoring**: 300 points per cleared row, whatever the clear size
//! - **Leveling**: level `n` is left once score reaches `1000 × (n+1)³ / 5`
//!
//! # Example
//!
//! ```
//! use dropstack_core::GameState;
//! use dropstack_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick(400, false);
//!
//! assert!(!game.game_over());
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time and whether soft drop is held. The piece drops one row every
//! 400ms, or every 50ms while soft drop is held.

pub mod board;
pub mod catalog;
pub mod game_state;
pub mod line_clear;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod validate;

pub use dropstack_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{next_player, random_piece, Piece};
pub use game_state::{GameEvent, GameState, Phase, StepOutcome};
pub use line_clear::{resolve, LineClear};
pub use player::{compute_ghost, ActivePlayer};
pub use rng::{RandomSource, SimpleRng};
pub use scoring::{level_threshold, line_clear_score, next_level};
pub use shape::{Shape, ShapeKind};
pub use snapshot::{ActiveSnapshot, GameSnapshot, Status};
pub use validate::is_valid;

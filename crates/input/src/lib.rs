//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and tracks the
//! soft-drop hold, including terminals without key-release events.

pub mod handler;
pub mod map;

pub use dropstack_types as types;

pub use handler::{ReleaseEvents, SoftDropHold};
pub use map::{handle_key_event, is_soft_drop_key, should_quit};

//! Terminal "game renderer" module.
//!
//! Renders a [`GameSnapshot`](crate::core::GameSnapshot) into a small
//! framebuffer of styled glyphs, then flushes only what changed to the
//! terminal. No widget toolkit is involved.
//!
//! Each board cell is drawn 2 columns wide to compensate for the usual
//! terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use dropstack_core as core;
pub use dropstack_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

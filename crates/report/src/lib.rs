//! Reporting side of the game: who is playing, and where scores go.
//!
//! - [`identity`]: a stable per-installation player id, persisted as TOML
//!   under the user's data directory.
//! - [`submit`]: fire-and-forget score submission over HTTP. The game loop
//!   is synchronous; requests run on a small tokio runtime owned by the
//!   reporter so a slow or missing collector never stalls a frame.
//! - [`config`]: environment-driven settings for both.

pub mod config;
pub mod identity;
pub mod submit;

pub use config::ReportConfig;
pub use identity::{generate_player_id, IdentityError, PlayerIdStore};
pub use submit::{ScoreReport, ScoreReporter, SubmitError};

//! Dropstack (workspace facade crate).
//!
//! Re-exports the workspace crates as `dropstack::{core,input,report,term,types}`
//! and holds the binary's configuration.

pub mod config;

pub use dropstack_core as core;
pub use dropstack_input as input;
pub use dropstack_report as report;
pub use dropstack_term as term;
pub use dropstack_types as types;

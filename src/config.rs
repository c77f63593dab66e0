//! Runtime configuration for the `dropstack` binary.
//!
//! Everything comes from the environment:
//!
//! - `DROPSTACK_SEED`: piece sequence seed (default: derived from the clock)
//! - `DROPSTACK_LOG`: log file path (default: `dropstack.log`)
//! - `RUST_LOG`: log filter, read by `env_logger` (default: `info`)
//! - the reporting variables documented on [`ReportConfig`]

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::report::ReportConfig;

pub const DEFAULT_LOG_PATH: &str = "dropstack.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub log_path: PathBuf,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("DROPSTACK_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);
        let log_path = lookup("DROPSTACK_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH));

        Self {
            seed,
            log_path,
            report: ReportConfig::from_lookup(&lookup),
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

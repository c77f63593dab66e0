//! Environment-driven reporting settings.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_SCORE_URL: &str = "http://localhost:4000/score";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Collector endpoint for finished-game scores.
    pub score_url: String,
    pub disabled: bool,
    /// Where the identity file lives; `None` means the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            score_url: DEFAULT_SCORE_URL.to_string(),
            disabled: false,
            data_dir: None,
        }
    }
}

impl ReportConfig {
    /// Read `DROPSTACK_SCORE_URL`, `DROPSTACK_SCORE_DISABLED` and
    /// `DROPSTACK_DATA_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let score_url =
            non_empty("DROPSTACK_SCORE_URL").unwrap_or_else(|| DEFAULT_SCORE_URL.to_string());
        let disabled = non_empty("DROPSTACK_SCORE_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let data_dir = non_empty("DROPSTACK_DATA_DIR").map(PathBuf::from);

        Self {
            score_url,
            disabled,
            data_dir,
        }
    }
}

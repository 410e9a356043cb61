//! Run configuration assembled once at the entry point.

use std::path::PathBuf;

/// Default command used to obtain a token when none is configured.
pub const DEFAULT_TOKEN_HELPER: &str = "gh auth token";

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const LOCK_FILE_NAME: &str = "flake.lock";

/// Everything the run needs from the environment, captured up front.
///
/// Components receive the pieces they need from this value and never read
/// process state themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lock file to audit.
    pub lock_path: PathBuf,
    /// Explicit token (`GITHUB_TOKEN`). Blank values are dropped.
    pub token: Option<String>,
    /// Credential helper command line.
    pub token_helper: String,
    /// API base URL without a trailing slash.
    pub api_url: String,
    /// Record port interactions into cassettes under this directory.
    pub record_dir: Option<PathBuf>,
    /// Replay port interactions from cassettes in this directory.
    pub replay_dir: Option<PathBuf>,
}

impl Config {
    /// Builds a config from a variable lookup.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let lock_path = non_blank("NH_FLAKE")
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
            .join(LOCK_FILE_NAME);

        Self {
            lock_path,
            token: non_blank("GITHUB_TOKEN"),
            token_helper: lookup("FLAKELAG_TOKEN_HELPER")
                .unwrap_or_else(|| DEFAULT_TOKEN_HELPER.to_string()),
            api_url: non_blank("FLAKELAG_API_URL")
                .map_or_else(|| DEFAULT_API_URL.to_string(), |u| u.trim_end_matches('/').to_string()),
            record_dir: non_blank("FLAKELAG_RECORD").map(PathBuf::from),
            replay_dir: non_blank("FLAKELAG_REPLAY").map(PathBuf::from),
        }
    }

    /// Reads `.env` (if present) and then the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        // Existing variables take precedence over `.env` entries.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overrides the lock path when one was given on the command line.
    #[must_use]
    pub fn with_lock_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.lock_path = path;
        }
        self
    }
}

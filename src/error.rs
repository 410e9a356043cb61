//! Error taxonomy.
//!
//! Structural failures (`LoadError`, `CheckError::UnknownNode`) abort a run.
//! `UpstreamError` is per node and only ever degrades that node to
//! unresolvable.

use std::path::PathBuf;

use thiserror::Error;

/// The lock file could not be turned into a node mapping.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing or unreadable.
    #[error("cannot read {}: {reason}", path.display())]
    Read {
        /// Lock file path.
        path: PathBuf,
        /// Underlying I/O message.
        reason: String,
    },
    /// The file is not valid JSON or lacks a `nodes` object.
    #[error("{} is not a valid lock file: {source}", path.display())]
    Parse {
        /// Lock file path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
}

/// A per-node failure talking to the upstream API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The default branch could not be determined.
    #[error("could not resolve default branch of {owner}/{repo}: {reason}")]
    Resolution {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
        /// What went wrong.
        reason: String,
    },
    /// The branch head could not be fetched or its timestamp parsed.
    #[error("could not fetch {owner}/{repo}@{branch}: {reason}")]
    Fetch {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
        /// Branch that was queried.
        branch: String,
        /// What went wrong.
        reason: String,
    },
}

/// Failures that end a run with exit code 1.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The lock file could not be loaded.
    #[error("Error reading lock file: {0}")]
    Load(#[from] LoadError),
    /// A single named input is absent from the node mapping.
    #[error("Error: Input '{name}' not found in {}", path.display())]
    UnknownNode {
        /// The requested input name.
        name: String,
        /// Lock file path.
        path: PathBuf,
    },
    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// A recording or replay session could not be set up or written.
    #[error("{0}")]
    Recording(String),
    /// The report could not be serialized.
    #[error("failed to render report: {0}")]
    Output(#[from] serde_json::Error),
    /// Command-line arguments were rejected.
    #[error("{0}")]
    Usage(String),
}

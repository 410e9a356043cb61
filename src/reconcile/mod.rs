//! Reconciliation of lock nodes against their upstream branches.

pub mod compare;
pub mod engine;

pub use compare::compare;
pub use engine::ReconciliationEngine;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, Serializer};

/// How a locked instant relates to the upstream branch head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Upstream has newer commits.
    Stale,
    /// Locked exactly at the upstream head time.
    Fresh,
    /// The lock is newer than the upstream head.
    LocalAhead,
    /// The node could not be checked.
    Unresolvable,
}

/// The outcome of checking one node. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationResult {
    /// Name the node is reported under.
    #[serde(rename = "node")]
    pub node_name: String,
    /// Repository owner, if the node declared one.
    pub owner: Option<String>,
    /// Repository name, if the node declared one.
    pub repo: Option<String>,
    /// Branch that was compared against.
    pub branch: Option<String>,
    /// Classification.
    pub outcome: Outcome,
    /// Locked instant.
    pub local: Option<DateTime<Utc>>,
    /// Upstream head instant. Present for every outcome except `Unresolvable`.
    pub upstream: Option<DateTime<Utc>>,
    /// Absolute difference; zero unless `Stale` or `LocalAhead`.
    #[serde(rename = "lag_seconds", serialize_with = "serialize_seconds")]
    pub lag: TimeDelta,
    /// Why the node is unresolvable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ReconciliationResult {
    /// `owner/repo`, with `?` for whichever part is missing.
    #[must_use]
    pub fn slug(&self) -> String {
        format!(
            "{}/{}",
            self.owner.as_deref().unwrap_or("?"),
            self.repo.as_deref().unwrap_or("?")
        )
    }
}

fn serialize_seconds<S: Serializer>(lag: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(lag.num_seconds())
}

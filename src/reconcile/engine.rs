//! Per-node orchestration: branch resolution, upstream fetch, comparison.

use chrono::{DateTime, TimeDelta, Utc};

use super::{compare, Outcome, ReconciliationResult};
use crate::auth::Credential;
use crate::lock::LockNode;
use crate::ports::HttpClient;
use crate::upstream::{BranchResolver, UpstreamFetcher};

/// Checks lock nodes against their upstream branches.
///
/// Nodes are processed one at a time, in the order given. Per-node failures
/// degrade that node to [`Outcome::Unresolvable`] and never stop a batch.
pub struct ReconciliationEngine<'a> {
    branches: BranchResolver<'a>,
    fetcher: UpstreamFetcher<'a>,
}

impl<'a> ReconciliationEngine<'a> {
    /// Creates an engine issuing requests through `http` against `api_url`.
    #[must_use]
    pub fn new(http: &'a dyn HttpClient, api_url: &'a str) -> Self {
        Self {
            branches: BranchResolver::new(http, api_url),
            fetcher: UpstreamFetcher::new(http, api_url),
        }
    }

    /// Checks a single node.
    ///
    /// Returns `None` only when the node is not a GitHub pin; such nodes are
    /// skipped silently rather than reported as unresolvable.
    pub async fn reconcile_one(
        &self,
        node: &LockNode,
        credential: Option<&Credential>,
    ) -> Option<ReconciliationResult> {
        if !node.is_trackable() {
            tracing::debug!(node = %node.name, source_type = ?node.source_type, "skipping untracked node");
            return None;
        }

        let unresolvable = |branch: Option<String>, local: Option<DateTime<Utc>>, reason: String| {
            tracing::warn!(node = %node.name, "{reason}");
            ReconciliationResult {
                node_name: node.name.clone(),
                owner: node.owner.clone(),
                repo: node.repo.clone(),
                branch,
                outcome: Outcome::Unresolvable,
                local,
                upstream: None,
                lag: TimeDelta::zero(),
                reason: Some(reason),
            }
        };

        let (Some(owner), Some(repo)) = (node.owner.as_deref(), node.repo.as_deref()) else {
            return Some(unresolvable(None, None, "lock entry has no owner/repo".to_string()));
        };
        let Some(local) = node.locked_timestamp.and_then(|secs| DateTime::from_timestamp(secs, 0))
        else {
            return Some(unresolvable(
                None,
                None,
                "lock entry has no usable lastModified".to_string(),
            ));
        };

        tracing::info!(node = %node.name, owner, repo, "checking");
        let branch = match self
            .branches
            .resolve(owner, repo, node.branch_hint.as_deref(), credential)
            .await
        {
            Ok(branch) => branch,
            Err(e) => return Some(unresolvable(None, Some(local), e.to_string())),
        };
        let upstream = match self.fetcher.fetch(owner, repo, &branch, credential).await {
            Ok(instant) => instant,
            Err(e) => return Some(unresolvable(Some(branch), Some(local), e.to_string())),
        };

        let (outcome, lag) = compare(local, upstream);
        tracing::debug!(node = %node.name, ?outcome, lag_seconds = lag.num_seconds(), "compared");
        Some(ReconciliationResult {
            node_name: node.name.clone(),
            owner: Some(owner.to_string()),
            repo: Some(repo.to_string()),
            branch: Some(branch),
            outcome,
            local: Some(local),
            upstream: Some(upstream),
            lag,
            reason: None,
        })
    }

    /// Checks every node in order.
    ///
    /// With `stale_only`, non-stale results are dropped from the returned
    /// sequence; every eligible node is still fetched.
    pub async fn reconcile_all(
        &self,
        nodes: &[LockNode],
        credential: Option<&Credential>,
        stale_only: bool,
    ) -> Vec<ReconciliationResult> {
        let mut results = Vec::with_capacity(nodes.len());
        for node in nodes {
            if let Some(result) = self.reconcile_one(node, credential).await {
                if !stale_only || result.outcome == Outcome::Stale {
                    results.push(result);
                }
            }
        }
        results
    }
}

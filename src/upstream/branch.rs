//! Branch selection for a pinned repository.

use serde_json::Value;

use super::get_json;
use crate::auth::Credential;
use crate::error::UpstreamError;
use crate::ports::HttpClient;

/// Determines which branch a pin tracks.
pub struct BranchResolver<'a> {
    http: &'a dyn HttpClient,
    api_url: &'a str,
}

impl<'a> BranchResolver<'a> {
    /// Creates a resolver querying `api_url`.
    #[must_use]
    pub fn new(http: &'a dyn HttpClient, api_url: &'a str) -> Self {
        Self { http, api_url }
    }

    /// Returns the explicit `hint` if non-empty, otherwise the repository's
    /// declared default branch.
    ///
    /// An explicit hint is authoritative and never triggers a request.
    /// No retries are attempted.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Resolution`] if the metadata request fails,
    /// returns a non-success status, or lacks `default_branch`.
    pub async fn resolve(
        &self,
        owner: &str,
        repo: &str,
        hint: Option<&str>,
        credential: Option<&Credential>,
    ) -> Result<String, UpstreamError> {
        if let Some(branch) = hint.filter(|h| !h.is_empty()) {
            tracing::debug!(owner, repo, branch, "tracking explicit branch");
            return Ok(branch.to_string());
        }

        let failure = |reason: String| UpstreamError::Resolution {
            owner: owner.to_string(),
            repo: repo.to_string(),
            reason,
        };

        let url = format!("{}/repos/{owner}/{repo}", self.api_url);
        let metadata = get_json(self.http, &url, credential).await.map_err(failure)?;
        let branch = metadata
            .get("default_branch")
            .and_then(Value::as_str)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| failure("response has no default_branch".to_string()))?;

        tracing::debug!(owner, repo, branch, "detected default branch");
        Ok(branch.to_string())
    }
}

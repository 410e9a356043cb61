//! GitHub upstream queries: default-branch resolution and branch-head lookup.

pub mod branch;
pub mod fetch;

pub use branch::BranchResolver;
pub use fetch::{parse_commit_date, UpstreamFetcher};

use serde_json::Value;

use crate::auth::Credential;
use crate::ports::HttpClient;

/// Performs one GET and decodes a successful JSON body.
///
/// Transport errors, non-2xx statuses and undecodable bodies all come back
/// as a short reason string; callers wrap it in the matching
/// [`crate::error::UpstreamError`] variant.
async fn get_json(
    http: &dyn HttpClient,
    url: &str,
    credential: Option<&Credential>,
) -> Result<Value, String> {
    tracing::debug!(url, authenticated = credential.is_some(), "GET");
    let response = http.get(url, credential).await.map_err(|e| e.to_string())?;
    if !response.is_success() {
        return Err(format!("GET {url} returned HTTP {}", response.status));
    }
    serde_json::from_str(&response.body).map_err(|e| format!("GET {url} returned invalid JSON: {e}"))
}

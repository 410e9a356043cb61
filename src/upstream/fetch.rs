//! Latest commit timestamp on a branch.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use super::get_json;
use crate::auth::Credential;
use crate::error::UpstreamError;
use crate::ports::HttpClient;

const COMMIT_DATE_POINTER: &str = "/commit/commit/committer/date";
const COMMIT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parses a committer date of the exact form `YYYY-MM-DDTHH:MM:SSZ` as UTC.
///
/// Fractional seconds, numeric offsets and any other variation are rejected.
///
/// # Errors
///
/// Returns a description of the mismatch.
pub fn parse_commit_date(value: &str) -> Result<DateTime<Utc>, String> {
    let shape_ok = value.len() == 20
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            19 => b == b'Z',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(format!("unexpected commit date format: {value:?}"));
    }
    NaiveDateTime::parse_from_str(value, COMMIT_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid commit date {value:?}: {e}"))
}

/// Fetches the head commit timestamp of a branch.
pub struct UpstreamFetcher<'a> {
    http: &'a dyn HttpClient,
    api_url: &'a str,
}

impl<'a> UpstreamFetcher<'a> {
    /// Creates a fetcher querying `api_url`.
    #[must_use]
    pub fn new(http: &'a dyn HttpClient, api_url: &'a str) -> Self {
        Self { http, api_url }
    }

    /// Returns the committer date of the branch head.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Fetch`] on transport failure, non-success
    /// status, a missing date field or a date in any other format.
    pub async fn fetch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        credential: Option<&Credential>,
    ) -> Result<DateTime<Utc>, UpstreamError> {
        let failure = |reason: String| UpstreamError::Fetch {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            reason,
        };

        let url = format!("{}/repos/{owner}/{repo}/branches/{branch}", self.api_url);
        let body = get_json(self.http, &url, credential).await.map_err(failure)?;
        let date = body
            .pointer(COMMIT_DATE_POINTER)
            .and_then(Value::as_str)
            .ok_or_else(|| failure("response has no commit.commit.committer.date".to_string()))?;
        parse_commit_date(date).map_err(failure)
    }
}

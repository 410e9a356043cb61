//! HTTP port for single GET requests against the upstream API.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::auth::Credential;

/// Boxed future type alias used by [`HttpClient`] to keep the trait dyn-compatible.
pub type HttpFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// The status and body of a completed request.
///
/// Non-success statuses are still `Ok` at this layer; callers decide what a
/// 404 or 403 means for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests.
///
/// TLS, connection reuse and transport timeouts belong to the implementation.
pub trait HttpClient: Send + Sync {
    /// Fetches `url`, sending `Authorization: token <credential>` when a
    /// credential is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be completed at all
    /// (DNS, connect, TLS, timeout, unreadable body).
    fn get<'a>(&'a self, url: &'a str, credential: Option<&'a Credential>) -> HttpFuture<'a>;
}

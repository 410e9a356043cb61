//! Replaying adapter for the `HttpClient` port.

use std::sync::Mutex;

use super::{extract_result, next_output};
use crate::auth::Credential;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::http::{HttpClient, HttpFuture, HttpResponse};

/// Serves recorded HTTP responses from a cassette, in request order.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Creates a new replaying HTTP client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get<'a>(&'a self, _url: &'a str, _credential: Option<&'a Credential>) -> HttpFuture<'a> {
        let output = next_output(&self.replayer, "http", "get");
        let result = extract_result::<HttpResponse>(&output, "http::get");
        Box::pin(async move { result })
    }
}

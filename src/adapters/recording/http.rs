//! Recording adapter for the `HttpClient` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::auth::Credential;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{HttpClient, HttpFuture};

/// Records HTTP interactions while delegating to an inner implementation.
///
/// Only whether a request carried a credential is recorded, never the token.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpClient {
    /// Creates a new recording HTTP client wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct GetInput<'a> {
    url: &'a str,
    authenticated: bool,
}

impl HttpClient for RecordingHttpClient {
    fn get<'a>(&'a self, url: &'a str, credential: Option<&'a Credential>) -> HttpFuture<'a> {
        Box::pin(async move {
            let result = self.inner.get(url, credential).await;
            let input = GetInput { url, authenticated: credential.is_some() };
            record_result(&self.recorder, "get", &input, &result);
            result
        })
    }
}

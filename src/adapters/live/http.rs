//! Live adapter for the `HttpClient` port using `reqwest`.

use std::error::Error;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;

use crate::auth::Credential;
use crate::ports::http::{HttpClient, HttpFuture, HttpResponse};

const USER_AGENT: &str = concat!("flakelag/", env!("CARGO_PKG_VERSION"));
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Live HTTP client for the GitHub REST API.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a client with the tool's user agent and a transport timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        url: &str,
        credential: Option<&Credential>,
    ) -> Result<HttpResponse, Box<dyn Error + Send + Sync>> {
        let mut request = self.client.get(url).header(ACCEPT, GITHUB_MEDIA_TYPE);
        if let Some(token) = credential {
            request = request.header(AUTHORIZATION, format!("token {}", token.expose()));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for LiveHttpClient {
    fn get<'a>(&'a self, url: &'a str, credential: Option<&'a Credential>) -> HttpFuture<'a> {
        Box::pin(self.send(url, credential))
    }
}

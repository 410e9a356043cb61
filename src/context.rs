//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveFileSystem, LiveHttpClient, LiveShellExecutor};
use crate::adapters::recording::{RecordingFileSystem, RecordingHttpClient, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingHttpClient, ReplayingShellExecutor};
use crate::auth::Credential;
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::ports::{FileSystem, HttpClient, HttpFuture, ShellExecutor, ShellOutput};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Filesystem for reading the lock file.
    pub fs: Box<dyn FileSystem>,
    /// HTTP client for the upstream API.
    pub http: Box<dyn HttpClient>,
    /// Shell executor for the credential helper.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live() -> Result<Self, String> {
        let http = LiveHttpClient::new().map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            fs: Box::new(LiveFileSystem),
            http: Box::new(http),
            shell: Box::new(LiveShellExecutor),
        })
    }

    /// Creates a recording context under `base`, returning the session that
    /// must be finished once the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory or HTTP client cannot be created.
    pub fn recording_at(base: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(base)?;
        let live = Self::live()?;
        let ctx = Self {
            fs: Box::new(RecordingFileSystem::new(live.fs, session.fs.clone())),
            http: Box::new(RecordingHttpClient::new(live.http, session.http.clone())),
            shell: Box::new(RecordingShellExecutor::new(live.shell, session.shell.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette file use a panicking adapter
    /// that fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            http: match replayers.http {
                Some(r) => Box::new(ReplayingHttpClient::new(r)),
                None => Box::new(PanickingHttpClient),
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(PanickingShellExecutor),
            },
        })
    }

    /// Replays from a directory laid out like a recording session.
    ///
    /// The filesystem port stays live unless the directory holds an `fs`
    /// cassette, so a lock file on disk can be audited against recorded
    /// API responses.
    ///
    /// # Errors
    ///
    /// Returns an error if any cassette in `dir` cannot be read or parsed.
    pub fn replaying_dir(dir: &Path) -> Result<Self, String> {
        let config = CassetteConfig::in_dir(dir);
        let live_fs = config.fs.is_none();
        let mut ctx = Self::replaying_from(&config)?;
        if live_fs {
            ctx.fs = Box::new(LiveFileSystem);
        }
        Ok(ctx)
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingHttpClient;
impl HttpClient for PanickingHttpClient {
    fn get<'a>(&'a self, url: &'a str, _credential: Option<&'a Credential>) -> HttpFuture<'a> {
        panic!("HttpClient port not configured in CassetteConfig: unexpected request to {url}");
    }
}

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        panic!("ShellExecutor port not configured in CassetteConfig: unexpected command {command:?}");
    }
}

//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to a separate cassette file.
/// All cassettes are stored in a timestamped directory.
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for HTTP interactions.
    pub http: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for shell interactions.
    pub shell: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing all cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session in `<base>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The timestamped directory already exists
    /// - The directory cannot be created
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let recorder = CassetteRecorder::in_dir(&output_dir, port, env!("CARGO_PKG_VERSION"));
            Arc::new(Mutex::new(recorder))
        };

        Ok(Self {
            fs: make_recorder("fs"),
            http: make_recorder("http"),
            shell: make_recorder("shell"),
            output_dir,
        })
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// All recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or any cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|arc| {
                    let port = arc.lock().map(|r| r.port().to_string()).unwrap_or_default();
                    format!("Recording adapter for {port} still has references")
                })?
                .into_inner()
                .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
            let port = recorder.port().to_string();
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.fs)?;
        finish_one(self.http)?;
        finish_one(self.shell)?;

        Ok(self.output_dir)
    }
}

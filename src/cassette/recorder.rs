//! Records one port's interactions into a cassette file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use super::config::cassette_file_name;
use super::format::{Cassette, Interaction};

/// Placeholder written in place of a secret output value.
pub const REDACTED: &str = "<redacted>";

/// Output fields that never reach disk for `port`, as JSON pointers into
/// the recorded `{"ok": ..}` value.
///
/// A credential helper prints the token on stdout.
#[must_use]
pub fn secret_outputs(port: &str) -> &'static [&'static str] {
    match port {
        "shell" => &["/ok/stdout"],
        _ => &[],
    }
}

/// Collects the interactions of a single port and writes them as YAML.
///
/// Every recorded output passes through the port's redaction list before
/// it is stored. Blank secrets are kept as-is so replay can still tell an
/// empty helper output from a real one.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    port: String,
    version: String,
    redacted: Vec<String>,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Creates a recorder for `port` writing to `path`, with the port's
    /// default redaction list.
    pub fn new(path: impl Into<PathBuf>, port: impl Into<String>, version: impl Into<String>) -> Self {
        let port = port.into();
        let redacted = secret_outputs(&port).iter().map(|p| (*p).to_string()).collect();
        Self {
            path: path.into(),
            port,
            version: version.into(),
            redacted,
            interactions: Vec::new(),
        }
    }

    /// Creates a recorder for `port` writing `<port>.cassette.yaml` in `dir`.
    pub fn in_dir(dir: &Path, port: &str, version: impl Into<String>) -> Self {
        Self::new(dir.join(cassette_file_name(port)), port, version)
    }

    /// Also redacts the output value at `pointer`.
    #[must_use]
    pub fn redacting(mut self, pointer: impl Into<String>) -> Self {
        self.redacted.push(pointer.into());
        self
    }

    /// Port this recorder belongs to.
    #[must_use]
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Records one call of `method`. Sequence numbers follow call order.
    pub fn record(&mut self, method: impl Into<String>, input: Value, mut output: Value) {
        for pointer in &self.redacted {
            if let Some(value) = output.pointer_mut(pointer) {
                if value.as_str().is_some_and(|s| !s.trim().is_empty()) {
                    *value = Value::from(REDACTED);
                }
            }
        }
        self.interactions.push(Interaction {
            seq: self.interactions.len() as u64,
            port: self.port.clone(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Writes the cassette to disk and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.port,
            recorded_at: Utc::now(),
            version: self.version,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn interactions_are_numbered_in_call_order() {
        let dir = scratch("flakelag_recorder_order");
        let mut recorder = CassetteRecorder::in_dir(&dir, "http", "0.1.0");
        recorder.record("get", json!({"url": "https://x/a"}), json!({"ok": {"status": 200, "body": "{}"}}));
        recorder.record("get", json!({"url": "https://x/b"}), json!({"err": "refused"}));

        let path = recorder.finish().unwrap();
        assert_eq!(path, dir.join("http.cassette.yaml"));

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.name, "http");
        assert_eq!(cassette.version, "0.1.0");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
        assert!(cassette.interactions.iter().all(|i| i.port == "http"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn shell_stdout_never_reaches_disk() {
        let dir = scratch("flakelag_recorder_redact");
        let mut recorder = CassetteRecorder::in_dir(&dir, "shell", "0.1.0");
        recorder.record(
            "run",
            json!({"command": "gh auth token"}),
            json!({"ok": {"exit_code": 0, "stdout": "ghp_secret\n", "stderr": ""}}),
        );
        recorder.record(
            "run",
            json!({"command": "gh auth token"}),
            json!({"ok": {"exit_code": 1, "stdout": "", "stderr": "not logged in"}}),
        );
        let path = recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("ghp_secret"));
        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.interactions[0].output["ok"]["stdout"], REDACTED);
        assert_eq!(cassette.interactions[1].output["ok"]["stdout"], "");
        assert_eq!(cassette.interactions[1].output["ok"]["stderr"], "not logged in");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn extra_pointers_and_other_ports() {
        let dir = scratch("flakelag_recorder_extra");
        assert!(secret_outputs("fs").is_empty());
        let mut recorder = CassetteRecorder::in_dir(&dir, "fs", "0.1.0").redacting("/ok");
        assert_eq!(recorder.port(), "fs");
        recorder.record("read_to_string", json!({"path": "/x"}), json!({"ok": "private"}));
        recorder.record("read_to_string", json!({"path": "/y"}), json!({"err": "missing"}));
        let cassette = Cassette::load(&recorder.finish().unwrap()).unwrap();
        assert_eq!(cassette.interactions[0].output["ok"], REDACTED);
        assert_eq!(cassette.interactions[1].output["err"], "missing");

        let _ = std::fs::remove_dir_all(&dir);
    }
}

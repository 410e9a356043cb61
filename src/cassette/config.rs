//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path panic if
/// called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the HTTP port cassette file.
    pub http: Option<PathBuf>,
    /// Path to the shell port cassette file.
    pub shell: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the HTTP port.
    pub http: Option<CassetteReplayer>,
    /// Replayer for the shell port.
    pub shell: Option<CassetteReplayer>,
}

/// File name a port's cassette is stored under inside a session directory.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

impl CassetteConfig {
    /// Picks up `<port>.cassette.yaml` files that exist in `dir`.
    ///
    /// This is the layout [`super::session::RecordingSession`] writes.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        let existing = |port: &str| {
            let path = dir.join(cassette_file_name(port));
            path.is_file().then_some(path)
        };
        Self { fs: existing("fs"), http: existing("http"), shell: existing("shell") }
    }

    /// Load a single per-port cassette file and create a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_port_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        Ok(CassetteReplayer::new(&Cassette::load(path)?))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            fs: self.fs.as_deref().map(Self::load_port_cassette).transpose()?,
            http: self.http.as_deref().map(Self::load_port_cassette).transpose()?,
            shell: self.shell.as_deref().map(Self::load_port_cassette).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Interaction;
    use chrono::Utc;
    use serde_json::json;

    fn write_cassette(path: &Path, interactions: Vec<Interaction>) {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.0.0".into(),
            interactions,
        };
        std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
    }

    #[test]
    fn in_dir_finds_only_existing_cassettes() {
        let dir = std::env::temp_dir().join("flakelag_config_test_in_dir");
        std::fs::create_dir_all(&dir).unwrap();
        let http_path = dir.join(cassette_file_name("http"));
        write_cassette(&http_path, vec![]);

        let config = CassetteConfig::in_dir(&dir);
        assert_eq!(config.http.as_deref(), Some(http_path.as_path()));
        assert!(config.fs.is_none());
        assert!(config.shell.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_per_port_cassettes() {
        let dir = std::env::temp_dir().join("flakelag_config_test_ports");
        std::fs::create_dir_all(&dir).unwrap();

        let fs_path = dir.join(cassette_file_name("fs"));
        write_cassette(
            &fs_path,
            vec![Interaction {
                seq: 0,
                port: "fs".into(),
                method: "read_to_string".into(),
                input: json!({"path": "flake.lock"}),
                output: json!({"ok": "{}"}),
            }],
        );

        let config = CassetteConfig { fs: Some(fs_path), ..CassetteConfig::default() };
        let mut replayers = config.load_all().unwrap();

        let fs = replayers.fs.as_mut().unwrap();
        assert_eq!(fs.next_interaction("fs", "read_to_string").output, json!({"ok": "{}"}));
        assert!(replayers.http.is_none());
        assert!(replayers.shell.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_cassette_is_an_error() {
        let config = CassetteConfig {
            http: Some(PathBuf::from("/nonexistent/http.cassette.yaml")),
            ..CassetteConfig::default()
        };
        let err = config.load_all().err().unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}

//! Integration tests for top-level CLI behavior.
//!
//! Upstream responses come from cassettes via `FLAKELAG_REPLAY`, so no test
//! touches the network. A port without a cassette panics when called, which
//! turns an unexpected request into a non-1 exit status.

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::{json, Value};

use flakelag::cassette::recorder::CassetteRecorder;

const API: &str = "https://api.github.com";

const TWO_INPUTS: &str = r#"{
  "nodes": {
    "root": { "inputs": { "alpha": "alpha", "beta": "beta" } },
    "alpha": {
      "locked": { "type": "github", "owner": "o", "repo": "alpha", "lastModified": 1000 },
      "original": { "type": "github", "owner": "o", "repo": "alpha", "ref": "main" }
    },
    "beta": {
      "locked": { "type": "github", "owner": "o", "repo": "beta", "lastModified": 1000 },
      "original": { "type": "github", "owner": "o", "repo": "beta", "ref": "main" }
    }
  },
  "root": "root",
  "version": 7
}"#;

const TARBALL_ONLY: &str = r#"{
  "nodes": {
    "root": { "inputs": { "blob": "blob" } },
    "blob": { "locked": { "type": "tarball", "url": "https://example.com/b.tar.gz", "lastModified": 5 } }
  },
  "root": "root",
  "version": 7
}"#;

/// A scratch directory holding a lock file and optional cassettes.
struct Scenario {
    dir: PathBuf,
}

impl Scenario {
    fn new(name: &str, lock: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("flakelag_cli_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("flake.lock"), lock).unwrap();
        Self { dir }
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join("flake.lock")
    }

    /// Writes an http cassette answering branch lookups in order.
    fn branch_heads(self, heads: &[(&str, &str)]) -> Self {
        let mut recorder = CassetteRecorder::in_dir(&self.dir, "http", "0.0.0");
        for (repo, date) in heads {
            let body = json!({"commit": {"commit": {"committer": {"date": date}}}}).to_string();
            recorder.record(
                "get",
                json!({"url": format!("{API}/repos/o/{repo}/branches/main"), "authenticated": true}),
                json!({"ok": {"status": 200, "body": body}}),
            );
        }
        recorder.finish().unwrap();
        self
    }

    /// Writes a shell cassette where the credential helper fails.
    fn failing_helper(self) -> Self {
        let mut recorder = CassetteRecorder::in_dir(&self.dir, "shell", "0.0.0");
        recorder.record(
            "run",
            json!({"command": "gh auth token"}),
            json!({"ok": {"exit_code": 1, "stdout": "", "stderr": "not logged in"}}),
        );
        recorder.finish().unwrap();
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_flakelag"));
        cmd.args(args)
            .current_dir(&self.dir)
            .env("FLAKELAG_REPLAY", &self.dir)
            .env("GITHUB_TOKEN", "test-token")
            .env_remove("FLAKELAG_RECORD")
            .env_remove("FLAKELAG_API_URL")
            .env_remove("FLAKELAG_TOKEN_HELPER")
            .env_remove("NH_FLAKE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        let lock = self.lock_path();
        let mut full = vec!["--lock-file", lock.to_str().unwrap()];
        full.extend_from_slice(args);
        self.command(&full).output().expect("failed to run flakelag binary")
    }
}

impl Drop for Scenario {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn one_second_behind_reports_stale() {
    let scenario =
        Scenario::new("stale", TWO_INPUTS).branch_heads(&[("alpha", "1970-01-01T00:16:41Z")]);
    let output = scenario.run(&["alpha", "--json", "--utc"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value = stdout_json(&output);
    assert_eq!(value[0]["node"], "alpha");
    assert_eq!(value[0]["outcome"], "stale");
    assert_eq!(value[0]["lag_seconds"], 1);
    assert_eq!(value[0]["local"], "1970-01-01T00:16:40Z");
    assert_eq!(value[0]["upstream"], "1970-01-01T00:16:41Z");
}

#[test]
fn matching_instant_reports_up_to_date() {
    let scenario =
        Scenario::new("fresh", TWO_INPUTS).branch_heads(&[("beta", "1970-01-01T00:16:40Z")]);
    let output = scenario.run(&["beta", "--utc"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("Checking beta (o/beta)..."));
    assert!(stdout.contains("✅ Up to date"));
}

#[test]
fn all_outdated_lists_only_stale_inputs() {
    let scenario = Scenario::new("outdated", TWO_INPUTS)
        .branch_heads(&[("alpha", "1970-01-01T00:16:41Z"), ("beta", "1970-01-01T00:16:40Z")]);
    let output = scenario.run(&["-A", "--json"]);
    assert!(output.status.success());

    let value = stdout_json(&output);
    let names: Vec<&str> = value.as_array().unwrap().iter().filter_map(|r| r["node"].as_str()).collect();
    assert_eq!(names, vec!["alpha"]);
}

#[test]
fn all_without_credential_prints_tip() {
    let scenario = Scenario::new("tip", TWO_INPUTS)
        .branch_heads(&[("alpha", "1970-01-01T00:16:40Z"), ("beta", "1970-01-01T00:16:40Z")])
        .failing_helper();
    let lock = scenario.lock_path();
    let output = scenario
        .command(&["--lock-file", lock.to_str().unwrap(), "--all"])
        .env_remove("GITHUB_TOKEN")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "{stderr}");
    assert_eq!(stdout.matches("✅ Up to date").count(), 2);
    assert!(stderr.contains("GITHUB_TOKEN"));
}

#[test]
fn tarball_inputs_are_skipped_without_requests() {
    let scenario = Scenario::new("tarball", TARBALL_ONLY);
    let output = scenario.run(&["--all"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(!stdout.contains("Checking"));
}

#[test]
fn unknown_input_exits_one_without_requests() {
    let scenario = Scenario::new("unknown", TWO_INPUTS);
    let output = scenario.run(&["nosuchinput"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Input 'nosuchinput' not found"));
}

#[test]
fn missing_lock_file_exits_one() {
    let scenario = Scenario::new("missing", TWO_INPUTS);
    let output = scenario
        .command(&["--all", "--lock-file", "/nonexistent/flake.lock"])
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Error reading lock file"));
}

#[test]
fn malformed_lock_file_exits_one() {
    let scenario = Scenario::new("malformed", "{ not json");
    let output = scenario.run(&["--all"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn conflicting_modes_are_rejected() {
    let scenario = Scenario::new("conflict", TWO_INPUTS);
    let output = scenario.run(&["alpha", "--all"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be used with"));
}

#[test]
fn help_shows_modes() {
    let scenario = Scenario::new("help", TWO_INPUTS);
    let output = scenario.command(&["--help"]).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--all-outdated"));
    assert!(stdout.contains("--json"));
}

//! Lock file loading and node-set derivation.
//!
//! The lock file is a JSON object with a `root` node name and a `nodes`
//! mapping. Only the fields the reconciliation needs are extracted; node
//! order follows the file.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::ports::FileSystem;

/// The only `locked.type` this tool knows how to track.
pub const GITHUB_SOURCE: &str = "github";

const DEFAULT_ROOT: &str = "root";

/// One pinned dependency reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockNode {
    /// Name the node is reported under (the input name for root inputs).
    pub name: String,
    /// `locked.type`, e.g. `github`, `path`, `tarball`.
    pub source_type: Option<String>,
    /// `locked.owner`.
    pub owner: Option<String>,
    /// `locked.repo`.
    pub repo: Option<String>,
    /// `original.ref`: the branch the pin was taken against, if explicit.
    pub branch_hint: Option<String>,
    /// `locked.lastModified` in epoch seconds.
    pub locked_timestamp: Option<i64>,
}

impl LockNode {
    /// Extracts a node from its JSON object, tolerating missing fields.
    #[must_use]
    pub fn from_value(name: impl Into<String>, value: &Value) -> Self {
        let text = |pointer: &str| value.pointer(pointer).and_then(Value::as_str).map(str::to_owned);
        Self {
            name: name.into(),
            source_type: text("/locked/type"),
            owner: text("/locked/owner"),
            repo: text("/locked/repo"),
            branch_hint: text("/original/ref"),
            locked_timestamp: value.pointer("/locked/lastModified").and_then(Value::as_i64),
        }
    }

    /// Returns `true` if the node is pinned to a GitHub repository.
    #[must_use]
    pub fn is_trackable(&self) -> bool {
        self.source_type.as_deref() == Some(GITHUB_SOURCE)
    }
}

#[derive(Debug, Deserialize)]
struct RawLockFile {
    #[serde(default)]
    root: Option<String>,
    nodes: Map<String, Value>,
}

/// A parsed lock file.
#[derive(Debug, Clone)]
pub struct LockFile {
    root: String,
    nodes: Map<String, Value>,
}

impl LockFile {
    /// Parses lock file contents.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the text is not JSON or has no `nodes` object.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let raw: RawLockFile = serde_json::from_str(contents)?;
        Ok(Self { root: raw.root.unwrap_or_else(|| DEFAULT_ROOT.to_string()), nodes: raw.nodes })
    }

    /// Reads and parses the lock file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Read`] if the file cannot be read and
    /// [`LoadError::Parse`] if its contents are malformed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, LoadError> {
        let contents = fs
            .read_to_string(path)
            .map_err(|e| LoadError::Read { path: path.to_path_buf(), reason: e.to_string() })?;
        Self::parse(&contents).map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
    }

    /// Name of the root node.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Looks up a node by its key in the node mapping.
    #[must_use]
    pub fn node(&self, key: &str) -> Option<LockNode> {
        self.nodes.get(key).map(|value| LockNode::from_value(key, value))
    }

    /// Nodes to audit in batch mode, in file order.
    ///
    /// Uses the root node's direct inputs when it declares any, reporting
    /// each under its input name. Otherwise every node except the root is a
    /// candidate. Source-type filtering happens later, in the engine.
    #[must_use]
    pub fn batch_nodes(&self) -> Vec<LockNode> {
        let root_inputs = self
            .nodes
            .get(&self.root)
            .and_then(|root| root.get("inputs"))
            .and_then(Value::as_object)
            .filter(|inputs| !inputs.is_empty());

        match root_inputs {
            Some(inputs) => inputs
                .iter()
                .filter_map(|(input, target)| {
                    // A list is a `follows` path; look the input up under its own name.
                    let key = target.as_str().unwrap_or(input);
                    self.nodes.get(key).map(|value| LockNode::from_value(input.as_str(), value))
                })
                .collect(),
            None => self
                .nodes
                .iter()
                .filter(|(key, _)| **key != self.root)
                .map(|(key, value)| LockNode::from_value(key.as_str(), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const SAMPLE: &str = r#"{
      "nodes": {
        "zz-utils": {
          "locked": { "type": "github", "owner": "numtide", "repo": "flake-utils", "lastModified": 1700000000 },
          "original": { "type": "github", "owner": "numtide", "repo": "flake-utils" }
        },
        "nixpkgs_2": {
          "locked": { "type": "github", "owner": "NixOS", "repo": "nixpkgs", "lastModified": 1000 },
          "original": { "type": "github", "owner": "NixOS", "repo": "nixpkgs", "ref": "nixos-unstable" }
        },
        "home": {
          "locked": { "type": "tarball", "url": "https://example.com/a.tar.gz", "lastModified": 5 }
        },
        "root": {
          "inputs": { "nixpkgs": "nixpkgs_2", "utils": "zz-utils", "follower": ["nixpkgs"], "dangling": "gone" }
        }
      },
      "root": "root",
      "version": 7
    }"#;

    struct MapFs(Option<String>);

    impl FileSystem for MapFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.0.clone().ok_or_else(|| format!("No such file: {}", path.display()).into())
        }
    }

    #[test]
    fn extracts_node_fields() {
        let lock = LockFile::parse(SAMPLE).unwrap();
        let node = lock.node("nixpkgs_2").unwrap();
        assert_eq!(node.name, "nixpkgs_2");
        assert!(node.is_trackable());
        assert_eq!(node.owner.as_deref(), Some("NixOS"));
        assert_eq!(node.repo.as_deref(), Some("nixpkgs"));
        assert_eq!(node.branch_hint.as_deref(), Some("nixos-unstable"));
        assert_eq!(node.locked_timestamp, Some(1000));

        let utils = lock.node("zz-utils").unwrap();
        assert_eq!(utils.branch_hint, None);
        assert!(!lock.node("home").unwrap().is_trackable());
        assert!(!lock.node("root").unwrap().is_trackable());
        assert!(lock.node("missing").is_none());
    }

    #[test]
    fn batch_uses_root_inputs_in_file_order() {
        let lock = LockFile::parse(SAMPLE).unwrap();
        let names: Vec<String> = lock.batch_nodes().into_iter().map(|n| n.name).collect();
        // `follower` has no node of its own name and `dangling` points nowhere.
        assert_eq!(names, vec!["nixpkgs", "utils"]);
        let first = &lock.batch_nodes()[0];
        assert_eq!(first.repo.as_deref(), Some("nixpkgs"));
    }

    #[test]
    fn follows_list_falls_back_to_input_name() {
        let lock = LockFile::parse(
            r#"{"root": "root", "nodes": {
                "nixpkgs": {"locked": {"type": "github", "owner": "o", "repo": "r", "lastModified": 1}},
                "root": {"inputs": {"nixpkgs": ["other", "nixpkgs"]}}
            }}"#,
        )
        .unwrap();
        let nodes = lock.batch_nodes();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "nixpkgs");
    }

    #[test]
    fn batch_falls_back_to_all_nodes_except_root() {
        let lock = LockFile::parse(
            r#"{"root": "top", "nodes": {
                "b": {"locked": {"type": "github"}},
                "top": {"inputs": {}},
                "a": {"locked": {"type": "path"}}
            }}"#,
        )
        .unwrap();
        let names: Vec<String> = lock.batch_nodes().into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn root_defaults_to_root() {
        let lock = LockFile::parse(r#"{"nodes": {"root": {}}}"#).unwrap();
        assert_eq!(lock.root(), "root");
        assert!(lock.batch_nodes().is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = LockFile::load(&MapFs(None), &PathBuf::from("/nope/flake.lock")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("/nope/flake.lock"));
    }

    #[test]
    fn load_reports_malformed_json() {
        let fs = MapFs(Some("{ not json".to_string()));
        let err = LockFile::load(&fs, Path::new("flake.lock")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        let fs = MapFs(Some(r#"{"root": "root"}"#.to_string()));
        let err = LockFile::load(&fs, Path::new("flake.lock")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}

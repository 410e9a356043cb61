//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reconciliation core and an
//! external system (lock file on disk, the GitHub API, the credential helper).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod http;
pub mod shell;

pub use filesystem::FileSystem;
pub use http::{HttpClient, HttpFuture, HttpResponse};
pub use shell::{ShellExecutor, ShellOutput};

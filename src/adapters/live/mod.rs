//! Live adapters for real external interactions.

pub mod filesystem;
pub mod http;
pub mod shell;

pub use filesystem::LiveFileSystem;
pub use http::LiveHttpClient;
pub use shell::LiveShellExecutor;

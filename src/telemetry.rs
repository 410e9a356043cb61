//! Tracing initialisation for the `flakelag` binary.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the number of `-v` flags to a default level.
#[must_use]
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Initialise the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Only the first
/// call in a process takes effect.
pub fn init_tracing(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity).as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

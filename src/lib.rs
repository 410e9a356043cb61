//! Core library entry for the `flakelag` CLI.
//!
//! `flakelag` reads a Nix `flake.lock`, asks the GitHub API for the latest
//! commit on each pinned branch, and reports which inputs have fallen behind.

pub mod adapters;
pub mod auth;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod lock;
pub mod ports;
pub mod reconcile;
pub mod report;
pub mod telemetry;
pub mod upstream;

use clap::Parser;

use crate::config::Config;
use crate::error::CheckError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or the check cannot complete.
pub fn run<I, T>(args: I) -> Result<(), CheckError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(CheckError::Usage(err.to_string())),
    };

    telemetry::init_tracing(cli.verbose);
    let config = Config::from_env().with_lock_path(cli.lock_file.clone());
    commands::dispatch(&cli, &config)
}

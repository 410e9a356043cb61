//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser};

/// Top-level CLI parser for `flakelag`.
#[derive(Debug, Parser)]
#[command(
    name = "flakelag",
    version,
    about = "Check Nix flake inputs against their GitHub upstream"
)]
#[command(group(ArgGroup::new("mode").required(true).args(["input", "all", "all_outdated"])))]
pub struct Cli {
    /// Name of the flake input to check (e.g. nixpkgs).
    pub input: Option<String>,
    /// Check all direct inputs and show every result.
    #[arg(short = 'a', long)]
    pub all: bool,
    /// Check all direct inputs but only show outdated ones.
    #[arg(short = 'A', long)]
    pub all_outdated: bool,
    /// Lock file to read instead of `$NH_FLAKE/flake.lock`.
    #[arg(long, value_name = "PATH")]
    pub lock_file: Option<PathBuf>,
    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
    /// Show times in UTC instead of the local time zone.
    #[arg(long)]
    pub utc: bool,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What a run checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One named input; its result is always shown.
    Single(String),
    /// Every direct input.
    All {
        /// Only show stale inputs.
        stale_only: bool,
    },
}

impl Cli {
    /// The run mode selected by the arguments.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match &self.input {
            Some(name) => Mode::Single(name.clone()),
            None => Mode::All { stale_only: self.all_outdated },
        }
    }
}

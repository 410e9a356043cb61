//! Binary entrypoint for the `flakelag` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Recording and replay are handled in commands::dispatch via
    // FLAKELAG_RECORD=<dir> and FLAKELAG_REPLAY=<dir>.
    match flakelag::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! Command dispatch.

pub mod check;

use crate::cli::Cli;
use crate::config::Config;
use crate::cassette::session::RecordingSession;
use crate::context::ServiceContext;
use crate::error::CheckError;
use crate::report::TimeDisplay;

use check::OutputOptions;

/// Wire up the service context and run the check.
///
/// `FLAKELAG_RECORD` records every port interaction into a cassette
/// session; `FLAKELAG_REPLAY` serves them back from one.
///
/// # Errors
///
/// Returns an error if the lock file cannot be loaded, the named input is
/// unknown, or a recording session cannot be set up or written.
pub fn dispatch(cli: &Cli, config: &Config) -> Result<(), CheckError> {
    let (ctx, session) = match (&config.replay_dir, &config.record_dir) {
        (Some(_), Some(_)) => {
            return Err(CheckError::Recording(
                "FLAKELAG_RECORD and FLAKELAG_REPLAY cannot be used together".to_string(),
            ))
        }
        (Some(dir), None) => (ServiceContext::replaying_dir(dir).map_err(CheckError::Recording)?, None),
        (None, Some(dir)) => {
            let (ctx, session) =
                ServiceContext::recording_at(dir).map_err(CheckError::Recording)?;
            (ctx, Some(session))
        }
        (None, None) => (ServiceContext::live().map_err(CheckError::Recording)?, None),
    };

    let options = OutputOptions {
        json: cli.json,
        display: if cli.utc { TimeDisplay::Utc } else { TimeDisplay::Local },
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CheckError::Runtime)?;
    let result = runtime.block_on(check::run(&ctx, config, &cli.mode(), options));

    if let Ok(output) = &result {
        if let Some(notice) = &output.notice {
            eprintln!("{notice}");
        }
        print!("{}", output.stdout);
    }

    // Finish recording after the check completes (even on error)
    let result = match session {
        Some(session) => {
            drop(ctx);
            finish_recording(session, result)
        }
        None => result,
    };

    result.map(|_| ())
}

/// Writes the session's cassettes.
///
/// A failed check keeps its own error; a failure to write the cassettes is
/// then only logged.
fn finish_recording<T>(
    session: RecordingSession,
    result: Result<T, CheckError>,
) -> Result<T, CheckError> {
    match (session.finish(), result) {
        (Ok(dir), result) => {
            eprintln!("Recording saved to: {}", dir.display());
            result
        }
        (Err(reason), Ok(_)) => Err(CheckError::Recording(reason)),
        (Err(reason), Err(err)) => {
            tracing::warn!("recording not saved: {reason}");
            Err(err)
        }
    }
}

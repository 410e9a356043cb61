//! The check command: load, resolve a credential, reconcile, render.

use crate::auth::TokenResolver;
use crate::cli::Mode;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::CheckError;
use crate::lock::LockFile;
use crate::reconcile::ReconciliationEngine;
use crate::report::{render_json, render_text, TimeDisplay};

const EMPTY_BATCH: &str = "No inputs found to check.";
const RATE_LIMIT_TIP: &str = "Tip: set GITHUB_TOKEN or log in with `gh auth login` \
                              to avoid GitHub API rate limits.";

/// How results are presented.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Emit a JSON array instead of text blocks.
    pub json: bool,
    /// Time zone for displayed instants.
    pub display: TimeDisplay,
}

/// What a finished check prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutput {
    /// Report for stdout.
    pub stdout: String,
    /// Advisory line for stderr.
    pub notice: Option<String>,
}

/// Runs one check against the ports in `ctx`.
///
/// # Errors
///
/// Returns an error if the lock file cannot be loaded, a named input is not
/// in it, or JSON rendering fails. Upstream failures never error here.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    mode: &Mode,
    options: OutputOptions,
) -> Result<CheckOutput, CheckError> {
    let lock = LockFile::load(ctx.fs.as_ref(), &config.lock_path)?;

    let (nodes, stale_only) = match mode {
        Mode::Single(name) => {
            let node = lock.node(name).ok_or_else(|| CheckError::UnknownNode {
                name: name.clone(),
                path: config.lock_path.clone(),
            })?;
            (vec![node], false)
        }
        Mode::All { stale_only } => (lock.batch_nodes(), *stale_only),
    };
    tracing::info!(count = nodes.len(), root = lock.root(), "loaded lock file");

    let credential =
        TokenResolver::new(config.token.as_deref(), &config.token_helper, ctx.shell.as_ref())
            .resolve();

    let notice = match mode {
        Mode::All { stale_only: false } if credential.is_none() && !options.json => {
            Some(RATE_LIMIT_TIP.to_string())
        }
        _ => None,
    };

    let engine = ReconciliationEngine::new(ctx.http.as_ref(), &config.api_url);
    let results = engine.reconcile_all(&nodes, credential.as_ref(), stale_only).await;

    let stdout = if options.json {
        let mut text = render_json(&results)?;
        text.push('\n');
        text
    } else if nodes.is_empty() && !stale_only {
        format!("{EMPTY_BATCH}\n")
    } else {
        results.iter().map(|r| render_text(r, options.display)).collect()
    };

    Ok(CheckOutput { stdout, notice })
}

//! Human-readable and JSON rendering of reconciliation results.

use std::fmt::Write as _;

use chrono::{DateTime, Local, SecondsFormat, TimeDelta, Utc};

use crate::reconcile::{Outcome, ReconciliationResult};

const SEPARATOR_WIDTH: usize = 40;

/// Time zone used when presenting instants. Comparison is always in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDisplay {
    /// The viewer's local zone.
    #[default]
    Local,
    /// UTC with a `Z` suffix.
    Utc,
}

/// Formats an instant as RFC 3339 with second precision.
#[must_use]
pub fn format_instant(instant: DateTime<Utc>, display: TimeDisplay) -> String {
    match display {
        TimeDisplay::Utc => instant.to_rfc3339_opts(SecondsFormat::Secs, true),
        TimeDisplay::Local => {
            instant.with_timezone(&Local).to_rfc3339_opts(SecondsFormat::Secs, false)
        }
    }
}

/// Formats a lag as `[N day[s], ]H:MM:SS`.
#[must_use]
pub fn format_lag(lag: TimeDelta) -> String {
    let total = lag.num_seconds().unsigned_abs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;
    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

/// Renders one result as a text block ending with a separator line.
#[must_use]
pub fn render_text(result: &ReconciliationResult, display: TimeDisplay) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Checking {} ({})...", result.node_name, result.slug());
    match result.outcome {
        Outcome::Stale => {
            let _ = writeln!(out, "    🚨 UPDATE AVAILABLE");
            if let (Some(local), Some(upstream)) = (result.local, result.upstream) {
                let _ = writeln!(out, "       Local:    {}", format_instant(local, display));
                let _ = writeln!(out, "       Upstream: {}", format_instant(upstream, display));
            }
            let _ = writeln!(out, "       Lag:      {}", format_lag(result.lag));
        }
        Outcome::LocalAhead => {
            let _ = writeln!(out, "    ⚠️  Local ahead by {}", format_lag(result.lag));
        }
        Outcome::Fresh => {
            let _ = writeln!(out, "    ✅ Up to date");
        }
        Outcome::Unresolvable => {
            let _ = writeln!(out, "    ❌ Could not fetch upstream info.");
        }
    }
    let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    out
}

/// Renders results as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(results: &[ReconciliationResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}

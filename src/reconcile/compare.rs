//! Staleness classification of a locked instant against upstream.

use std::cmp::Ordering;

use chrono::{DateTime, TimeDelta, Utc};

use super::Outcome;

/// Classifies `local` against `upstream` and returns the absolute lag.
///
/// Only exact equality is `Fresh`; there is no tolerance window.
#[must_use]
pub fn compare(local: DateTime<Utc>, upstream: DateTime<Utc>) -> (Outcome, TimeDelta) {
    match local.cmp(&upstream) {
        Ordering::Less => (Outcome::Stale, upstream - local),
        Ordering::Greater => (Outcome::LocalAhead, local - upstream),
        Ordering::Equal => (Outcome::Fresh, TimeDelta::zero()),
    }
}

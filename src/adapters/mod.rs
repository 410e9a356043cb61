//! Port implementations.
//!
//! - `live` talks to the real disk, network and shell.
//! - `recording` wraps a live adapter and appends every call to a cassette.
//! - `replaying` serves calls from a previously recorded cassette.

pub mod live;
pub mod recording;
pub mod replaying;

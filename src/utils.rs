//! Utility functions

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time in nanoseconds since the Unix epoch.
///
/// Owners use this to produce `timestamp_ns` values for
/// [`crate::MatchingCore::iterate`] and snapshot captures. The matching core
/// itself never consults a clock.
#[must_use]
pub fn current_time_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos() as u64)
        .unwrap_or(0)
}

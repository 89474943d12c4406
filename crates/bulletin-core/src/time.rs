//! Physical (wall-clock) time values.
//!
//! Post timestamps travel as ISO-8601 strings and are ordered lexically, so
//! the only conversion the core needs is a fixed-width RFC 3339 rendering.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock time in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhysicalTime {
    /// Milliseconds since the Unix epoch
    pub ts_ms: u64,
}

impl PhysicalTime {
    /// Create a physical time from milliseconds since the epoch.
    pub fn from_millis(ts_ms: u64) -> Self {
        Self { ts_ms }
    }

    /// Render as a UTC RFC 3339 timestamp with millisecond precision.
    ///
    /// Every rendering has the same width and a `Z` suffix, so lexical order
    /// of the strings equals chronological order.
    pub fn to_rfc3339(&self) -> String {
        let millis = i64::try_from(self.ts_ms).unwrap_or(i64::MAX);
        DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Time shifted forward by `ms` milliseconds.
    pub fn plus_millis(&self, ms: u64) -> Self {
        Self {
            ts_ms: self.ts_ms.saturating_add(ms),
        }
    }
}

//! Latest-version record returned by the Go module proxy
//!
//! The `@latest` endpoint answers with `{"Version": ..., "Time": ...}`.
//! Some proxies emit lowercase keys, so those are accepted as aliases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A module version together with its publish time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// The version string (e.g. "v0.5.2")
    #[serde(rename = "Version", alias = "version")]
    pub version: String,
    /// When this version was published
    #[serde(rename = "Time", alias = "time")]
    pub time: DateTime<Utc>,
}

impl VersionInfo {
    /// Creates a new VersionInfo
    pub fn new(version: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            time,
        }
    }
}

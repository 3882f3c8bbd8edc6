//! Module requirement parsed from a go.mod manifest

use serde::{Deserialize, Serialize};
use std::fmt;

/// One require entry from a go.mod file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRequirement {
    /// Module path, e.g. "golang.org/x/mod"
    pub path: String,
    /// Currently required version, e.g. "v0.5.0"
    pub version: String,
    /// Whether the entry carries an `// indirect` comment
    pub indirect: bool,
}

impl ModuleRequirement {
    /// Creates a new direct requirement
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            indirect: false,
        }
    }

    /// Marks the requirement as indirect (builder pattern)
    pub fn indirect(mut self) -> Self {
        self.indirect = true;
        self
    }
}

impl fmt::Display for ModuleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.indirect { " (indirect)" } else { "" };
        write!(f, "{} {}{}", self.path, self.version, marker)
    }
}

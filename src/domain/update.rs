//! Update records and the per-manifest update report

use serde::{Deserialize, Serialize};
use std::fmt;

/// One outdated module: the declared version differs from the latest
/// published version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Module path
    pub module: String,
    /// Version currently required by the manifest
    pub old_version: String,
    /// Latest version published to the proxy
    pub new_version: String,
}

impl Update {
    /// Creates a new Update
    pub fn new(
        module: impl Into<String>,
        old_version: impl Into<String>,
        new_version: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            old_version: old_version.into(),
            new_version: new_version.into(),
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.module, self.old_version, self.new_version
        )
    }
}

/// All updates found for one manifest.
///
/// Holds at most one Update per distinct module path; `insert` ignores
/// duplicates. `sort` orders by module path so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    updates: Vec<Update>,
}

impl UpdateReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an update unless the module is already present
    pub fn insert(&mut self, update: Update) {
        if self.updates.iter().any(|u| u.module == update.module) {
            return;
        }
        self.updates.push(update);
    }

    /// Sorts the report by module path
    pub fn sort(&mut self) {
        self.updates.sort_by(|a, b| a.module.cmp(&b.module));
    }

    /// Number of updates in the report
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// True when no updates were found
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// The updates in the report
    pub fn updates(&self) -> &[Update] {
        &self.updates
    }

    /// Iterates over the updates
    pub fn iter(&self) -> std::slice::Iter<'_, Update> {
        self.updates.iter()
    }
}

impl IntoIterator for UpdateReport {
    type Item = Update;
    type IntoIter = std::vec::IntoIter<Update>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_new() {
        let update = Update::new("golang.org/x/mod", "v0.5.0", "v0.5.2");
        assert_eq!(update.module, "golang.org/x/mod");
        assert_eq!(update.old_version, "v0.5.0");
        assert_eq!(update.new_version, "v0.5.2");
    }

    #[test]
    fn test_update_display() {
        let update = Update::new("golang.org/x/mod", "v0.5.0", "v0.5.2");
        assert_eq!(format!("{}", update), "golang.org/x/mod v0.5.0 -> v0.5.2");
    }

    #[test]
    fn test_report_empty() {
        let report = UpdateReport::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn test_report_insert() {
        let mut report = UpdateReport::new();
        report.insert(Update::new("a", "v1.0.0", "v1.1.0"));
        report.insert(Update::new("b", "v2.0.0", "v2.0.1"));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_report_insert_ignores_duplicate_module() {
        let mut report = UpdateReport::new();
        report.insert(Update::new("a", "v1.0.0", "v1.1.0"));
        report.insert(Update::new("a", "v1.0.0", "v1.2.0"));
        assert_eq!(report.len(), 1);
        assert_eq!(report.updates()[0].new_version, "v1.1.0");
    }

    #[test]
    fn test_report_sort() {
        let mut report = UpdateReport::new();
        report.insert(Update::new("golang.org/x/text", "v0.13.0", "v0.14.0"));
        report.insert(Update::new("github.com/spf13/cobra", "v1.7.0", "v1.8.0"));
        report.sort();

        let modules: Vec<&str> = report.iter().map(|u| u.module.as_str()).collect();
        assert_eq!(modules, vec!["github.com/spf13/cobra", "golang.org/x/text"]);
    }

    #[test]
    fn test_report_into_iter() {
        let mut report = UpdateReport::new();
        report.insert(Update::new("a", "v1.0.0", "v1.1.0"));
        let collected: Vec<Update> = report.into_iter().collect();
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn test_serde_report() {
        let mut report = UpdateReport::new();
        report.insert(Update::new("golang.org/x/mod", "v0.5.0", "v0.5.2"));
        let json = serde_json::to_string(&report).unwrap();
        let parsed: UpdateReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}

//! Check workflow across project directories
//!
//! This module provides:
//! - Per-path workflow: read <dir>/go.mod, run the update check
//! - Independent outcomes: a failing path never stops the others

use crate::checker::UpdateChecker;
use crate::domain::UpdateReport;
use crate::error::{AppError, ManifestError};
use crate::progress::Progress;
use std::path::{Path, PathBuf};

/// Outcome of checking one project directory
pub struct PathOutcome {
    /// The project directory that was checked
    pub path: PathBuf,
    /// The update report, or the failure that ended this path's check
    pub result: Result<UpdateReport, AppError>,
}

impl PathOutcome {
    /// True when the check succeeded and found at least one update
    pub fn has_updates(&self) -> bool {
        matches!(&self.result, Ok(report) if !report.is_empty())
    }
}

/// Orchestrator walking the input directories
pub struct Orchestrator {
    checker: UpdateChecker,
    paths: Vec<PathBuf>,
    verbose: bool,
    show_progress: bool,
}

impl Orchestrator {
    /// Creates an orchestrator over the given project directories
    pub fn new(checker: UpdateChecker, paths: Vec<PathBuf>, verbose: bool, show_progress: bool) -> Self {
        Self {
            checker,
            paths,
            verbose,
            show_progress,
        }
    }

    /// Checks every path and returns one outcome per path
    pub async fn run(&self) -> Vec<PathOutcome> {
        let mut progress = Progress::new(self.show_progress);
        progress.spinner("Checking projects...");

        let mut outcomes = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            progress.set_message(&format!("Checking {}", path.display()));
            if self.verbose {
                eprintln!("Checking path {}", path.display());
            }

            let result = self.check_path(path).await;
            outcomes.push(PathOutcome {
                path: path.clone(),
                result,
            });
        }
        progress.finish_and_clear();

        outcomes
    }

    /// Reads <dir>/go.mod and checks it for updates
    async fn check_path(&self, dir: &Path) -> Result<UpdateReport, AppError> {
        let manifest_path = dir.join("go.mod");
        let bytes =
            std::fs::read(&manifest_path).map_err(|e| ManifestError::read(&manifest_path, e))?;

        Ok(self.checker.check_manifest_bytes(&bytes).await?)
    }
}

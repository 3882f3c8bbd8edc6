//! Output formatting for check results
//!
//! This module provides:
//! - Text output for human-readable display, with colors
//! - JSON output for machine processing

use crate::orchestrator::PathOutcome;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

impl OutputFormat {
    /// Pick the format from CLI arguments
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Per-path results
    paths: Vec<JsonPath>,
}

/// JSON representation of one checked path
#[derive(Serialize)]
struct JsonPath {
    /// The project directory
    path: String,
    /// Updates found for this path
    updates: Vec<JsonUpdate>,
    /// The failure that ended this path's check, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// JSON representation of one update
#[derive(Serialize)]
struct JsonUpdate {
    /// Module path
    module: String,
    /// Version currently required
    from: String,
    /// Latest published version
    to: String,
}

/// Format and write the outcomes in the selected format
pub fn render(
    outcomes: &[PathOutcome],
    format: OutputFormat,
    quiet: bool,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => render_text(outcomes, quiet, writer),
        OutputFormat::Json => render_json(outcomes, writer),
    }
}

/// Human-readable listing: one block per path with updates
fn render_text(
    outcomes: &[PathOutcome],
    quiet: bool,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    let mut any_updates = false;

    for outcome in outcomes {
        let report = match &outcome.result {
            Ok(report) if !report.is_empty() => report,
            // Errors go to stderr at the top level
            _ => continue,
        };
        any_updates = true;

        writeln!(
            writer,
            "{}: {} update(s) available",
            outcome.path.display().to_string().bold(),
            report.len().to_string().yellow()
        )?;
        for update in report.iter() {
            writeln!(
                writer,
                "  {} {} {} {}",
                update.module.cyan(),
                update.old_version.red(),
                "->".dimmed(),
                update.new_version.green()
            )?;
        }
    }

    let all_ok = outcomes.iter().all(|o| o.result.is_ok());
    if !any_updates && all_ok && !quiet {
        writeln!(writer, "All modules up to date")?;
    }

    Ok(())
}

/// Machine-readable listing of every path, including failed ones
fn render_json(outcomes: &[PathOutcome], writer: &mut dyn Write) -> std::io::Result<()> {
    let output = JsonOutput {
        paths: outcomes
            .iter()
            .map(|outcome| {
                let (updates, error) = match &outcome.result {
                    Ok(report) => (
                        report
                            .iter()
                            .map(|u| JsonUpdate {
                                module: u.module.clone(),
                                from: u.old_version.clone(),
                                to: u.new_version.clone(),
                            })
                            .collect(),
                        None,
                    ),
                    Err(e) => (Vec::new(), Some(e.to_string())),
                };
                JsonPath {
                    path: outcome.path.display().to_string(),
                    updates,
                    error,
                }
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *writer, &output)?;
    writeln!(writer)
}

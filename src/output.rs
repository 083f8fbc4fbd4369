//! CLI output formatting.
//!
//! One status line per file, then a summary:
//!
//! ```text
//! a.png changed: 1600x900 -> 800x450
//! b.gif unchanged (400x300)
//! broken.jpg failed: Failed to decode ./broken.jpg: ...
//! Resized 1, unchanged 1, failed 1
//! ```
//!
//! In a dry run, resizable files read `would change` instead of `changed`.
//!
//! Format functions are pure and return strings for testability; `print_*`
//! wrappers write them to stdout.

use crate::imaging::FitOutcome;
use crate::process::{ProcessEvent, RunReport};

/// Format the status line for a single file.
pub fn format_outcome(name: &str, outcome: &FitOutcome) -> String {
    match outcome {
        FitOutcome::Resized { from, to } => format!("{name} changed: {from} -> {to}"),
        FitOutcome::WouldResize { from, to } => format!("{name} would change: {from} -> {to}"),
        FitOutcome::Unchanged { dimensions } => format!("{name} unchanged ({dimensions})"),
        FitOutcome::Failed { error } => format!("{name} failed: {error}"),
    }
}

/// Format a progress event as output lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::FileProcessed { name, outcome } => vec![format_outcome(name, outcome)],
    }
}

/// Format the summary printed after a run.
pub fn format_summary(report: &RunReport) -> String {
    let verb = if report.dry_run {
        "Would resize"
    } else {
        "Resized"
    };
    format!(
        "{verb} {}, unchanged {}, failed {}",
        report.resized(),
        report.unchanged(),
        report.failed()
    )
}

pub fn print_summary(report: &RunReport) {
    println!("{}", format_summary(report));
}

/// Print the whole report as pretty JSON.
pub fn print_json_report(report: &RunReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

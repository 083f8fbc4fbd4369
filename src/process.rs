//! The batch resize loop.
//!
//! Scans the target directory and fits every candidate image to the maximum
//! width, one file at a time, in sorted order. Each file is opened,
//! measured, possibly resampled and saved, and closed before the next one is
//! touched.
//!
//! ## Failures
//!
//! An enumeration failure (missing or unreadable directory) always aborts
//! the run, since there is nothing to iterate. Decode and write failures
//! follow [`OnError`]:
//!
//! - [`OnError::Abort`] stops at the first failing file and returns
//!   [`ProcessError::Image`]. Files before it have already been rewritten;
//!   the error carries the report so far, ending with the failed file.
//! - [`OnError::Skip`] records the failure in the report as
//!   [`FitOutcome::Failed`] and carries on.
//!
//! ## Progress
//!
//! Pass a [`Sender`] to receive a [`ProcessEvent`] as each file finishes, so
//! the caller can print status lines while the run is still going.

use crate::config::{OnError, ResizeConfig};
use crate::imaging::{BackendError, FitOutcome, ImageBackend, RustBackend, fit_image};
use crate::scan::{self, ScanError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Cannot read directory: {0}")]
    Scan(#[from] ScanError),
    #[error("{}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: BackendError,
        partial: Box<RunReport>,
    },
}

impl ProcessError {
    /// What the run did before it stopped, if it got as far as processing files.
    pub fn partial_report(&self) -> Option<&RunReport> {
        match self {
            ProcessError::Image { partial, .. } => Some(&**partial),
            ProcessError::Scan(_) => None,
        }
    }
}

/// Progress event sent after each file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    FileProcessed { name: String, outcome: FitOutcome },
}

/// Outcome for one file, as recorded in the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub name: String,
    #[serde(flatten)]
    pub outcome: FitOutcome,
}

/// Everything a run did, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub max_width: u32,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Files rewritten (or, in a dry run, files that would be).
    pub fn resized(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                FitOutcome::Resized { .. } | FitOutcome::WouldResize { .. }
            )
        })
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, FitOutcome::Unchanged { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FitOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FitOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Resize the images in `dir` with the `image`-crate backend.
pub fn process(
    dir: &Path,
    config: &ResizeConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunReport, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, dir, config, events)
}

/// Resize the images in `dir` using a specific backend (allows testing with mock).
pub fn process_with_backend<B: ImageBackend>(
    backend: &B,
    dir: &Path,
    config: &ResizeConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<RunReport, ProcessError> {
    let files = scan::scan(dir, config.scan_options())?;
    let params = config.fit_params();

    info!(
        dir = %dir.display(),
        candidates = files.len(),
        max_width = params.max_width,
        dry_run = params.dry_run,
        "starting resize run"
    );

    let mut report = RunReport {
        max_width: params.max_width,
        dry_run: params.dry_run,
        files: Vec::with_capacity(files.len()),
    };

    for file in files {
        let outcome = match fit_image(backend, &file.path, &params) {
            Ok(outcome) => {
                debug!(file = %file.name, ?outcome, "processed");
                outcome
            }
            Err(source) => match config.on_error {
                OnError::Abort => {
                    report.files.push(FileReport {
                        name: file.name,
                        outcome: FitOutcome::Failed {
                            error: source.to_string(),
                        },
                    });
                    return Err(ProcessError::Image {
                        path: file.path,
                        source,
                        partial: Box::new(report),
                    });
                }
                OnError::Skip => {
                    warn!(file = %file.name, error = %source, "skipping file");
                    FitOutcome::Failed {
                        error: source.to_string(),
                    }
                }
            },
        };

        if let Some(tx) = &events {
            // The receiver going away only loses progress output.
            let _ = tx.send(ProcessEvent::FileProcessed {
                name: file.name.clone(),
                outcome: outcome.clone(),
            });
        }

        report.files.push(FileReport {
            name: file.name,
            outcome,
        });
    }

    info!(
        resized = report.resized(),
        unchanged = report.unchanged(),
        failed = report.failed(),
        "resize run finished"
    );

    Ok(report)
}

use crate::error::DownloadError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An image element as seen on the page at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    /// Absolute URL of the image
    pub url: String,

    /// Rendered height in CSS pixels
    pub height: f64,
}

impl PageImage {
    pub fn new(url: impl Into<String>, height: f64) -> Self {
        Self {
            url: url.into(),
            height,
        }
    }
}

/// An image queued for download under a given filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadTask {
    pub url: String,
    pub filename: String,
}

impl DownloadTask {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}

/// A download that reached the save target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedImage {
    pub url: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// A download that did not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub url: String,
    pub reason: String,
}

/// Terminal state of a single download task
pub type Outcome = Result<SavedImage, DownloadError>;

/// Aggregate of every task in a run, built only after all of them settled
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Number of download tasks submitted
    pub attempted: usize,
    pub succeeded: Vec<SavedImage>,
    pub failed: Vec<Failure>,
    /// Qualifying image URLs left out for lack of a filename
    pub skipped: Vec<String>,
}

impl Report {
    /// Classify settled outcomes, pairing each with the task that produced it
    pub fn from_outcomes(
        tasks: &[DownloadTask],
        outcomes: Vec<Outcome>,
        skipped: Vec<String>,
    ) -> Self {
        let mut report = Report {
            attempted: outcomes.len(),
            skipped,
            ..Report::default()
        };

        for (task, outcome) in tasks.iter().zip(outcomes) {
            match outcome {
                Ok(saved) => report.succeeded.push(saved),
                Err(e) => report.failed.push(Failure {
                    url: task.url.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        report
    }

    /// Write the summary to the log
    pub fn log(&self) {
        ::log::info!(
            "{} image(s) downloaded, {} failed",
            self.succeeded.len(),
            self.failed.len()
        );
        for failure in &self.failed {
            ::log::warn!("  {}: {}", failure.url, failure.reason);
        }
        if !self.skipped.is_empty() {
            ::log::info!("{} image(s) skipped without a filename", self.skipped.len());
        }
    }
}

use thiserror::Error;

/// Errors that stop a harvest before any download is attempted
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("could not connect to any WebDriver server (tried {0})")]
    WebDriverUnavailable(String),

    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("unexpected image snapshot from the page: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("invalid page URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Why a single image download did not produce a saved file
///
/// The message of each variant is the failure reason listed in the final report.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("fetch failed: {0}")]
    Status(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("save failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DownloadError {
    fn from(e: reqwest::Error) -> Self {
        DownloadError::Network(e.to_string())
    }
}

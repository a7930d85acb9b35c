// Re-export modules
pub mod config;
pub mod download;
pub mod error;
pub mod filename;
pub mod locators;
pub mod orchestrator;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{HarvestConfig, MissingFilenamePolicy};
pub use error::{DownloadError, HarvestError};
pub use filename::extract_filename;
pub use locators::{PageSnapshot, locate};
pub use results::{DownloadTask, PageImage, Report};

use download::{DirectoryTarget, HttpFetcher};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where the page's images are read from
#[derive(Debug, Clone)]
pub enum PageSource {
    /// A live page, loaded in a WebDriver-controlled browser
    Web(String),
    /// A saved HTML document; relative `src` values resolve against the URL
    HtmlFile { path: PathBuf, base_url: String },
}

/// Main builder for a harvest run
pub struct Harvest {
    source: PageSource,
    config: HarvestConfig,
}

impl Harvest {
    /// Create a new Harvest builder with default configuration
    pub fn new(source: PageSource) -> Self {
        Self {
            source,
            config: HarvestConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: HarvestConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, HarvestError> {
        let config = HarvestConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    pub fn with_min_height(mut self, min_height: f64) -> Self {
        self.config.min_height = min_height;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn with_settle(mut self, seconds: u64) -> Self {
        self.config.settle_secs = seconds;
        self
    }

    pub fn with_missing_filename(mut self, policy: MissingFilenamePolicy) -> Self {
        self.config.missing_filename = policy;
        self
    }

    pub fn with_status_check(mut self, check_status: bool) -> Self {
        self.config.check_status = check_status;
        self
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout_secs = Some(seconds);
        self
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Capture the page's images as they are right now
    pub async fn snapshot(&self) -> Result<PageSnapshot, HarvestError> {
        match &self.source {
            PageSource::Web(page_url) => {
                let mut config = self.config.clone();
                // Override the WebDriver URL with an environment variable if provided
                config.apply_env();

                locators::browser::snapshot(
                    &config.webdriver_url,
                    page_url,
                    Duration::from_secs(config.settle_secs),
                )
                .await
            }
            PageSource::HtmlFile { path, base_url } => {
                let base = Url::parse(base_url).map_err(|source| HarvestError::InvalidUrl {
                    url: base_url.clone(),
                    source,
                })?;
                let html =
                    tokio::fs::read_to_string(path)
                        .await
                        .map_err(|source| HarvestError::Io {
                            path: path.display().to_string(),
                            source,
                        })?;
                Ok(locators::html::snapshot(&html, &base))
            }
        }
    }

    /// Locate, name and download every qualifying image, then report.
    ///
    /// Only failing to read the page is an error; individual downloads that
    /// fail are listed in the report.
    pub async fn run(self) -> Result<Report, HarvestError> {
        let snapshot = self.snapshot().await?;
        let urls = snapshot.locate(self.config.min_height);

        let fetcher = HttpFetcher::new(self.config.request_timeout_secs)
            .map_err(|e| HarvestError::Config(e.to_string()))?;
        let target = DirectoryTarget::new(&self.config.output_dir);

        Ok(orchestrator::harvest_urls(
            &fetcher,
            &target,
            &urls,
            self.config.missing_filename,
            self.config.check_status,
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_html_source_snapshot() {
        let path = std::env::temp_dir().join(format!("img-harvest-page-{}.html", std::process::id()));
        std::fs::write(
            &path,
            r#"<body><img src="a.png?x=1" height="500"><img src="b.jpg" height="900"></body>"#,
        )
        .unwrap();

        let harvest = Harvest::new(PageSource::HtmlFile {
            path: path.clone(),
            base_url: "https://example.com/p/".to_string(),
        });
        let snapshot = harvest.snapshot().await.unwrap();
        assert_eq!(
            snapshot.locate(400.0),
            vec![
                "https://example.com/p/a.png?x=1".to_string(),
                "https://example.com/p/b.jpg".to_string(),
            ]
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_html_source_bad_base_url() {
        let harvest = Harvest::new(PageSource::HtmlFile {
            path: PathBuf::from("unused.html"),
            base_url: "not a url".to_string(),
        });
        assert!(matches!(
            harvest.snapshot().await,
            Err(HarvestError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_with_nothing_to_download() {
        let path = std::env::temp_dir().join(format!("img-harvest-small-{}.html", std::process::id()));
        std::fs::write(&path, r#"<body><img src="icon.png?x=1" height="16"></body>"#).unwrap();

        let report = Harvest::new(PageSource::HtmlFile {
            path: path.clone(),
            base_url: "https://example.com/".to_string(),
        })
        .with_output_dir(std::env::temp_dir())
        .run()
        .await
        .unwrap();

        assert_eq!(report.attempted, 0);
        assert!(report.succeeded.is_empty() && report.failed.is_empty());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_builder_overrides() {
        let harvest = Harvest::new(PageSource::Web("https://example.com".to_string()))
            .with_min_height(250.0)
            .with_settle(3)
            .with_missing_filename(MissingFilenamePolicy::Default)
            .with_status_check(false)
            .with_request_timeout(30);
        let config = harvest.config();
        assert_eq!(config.min_height, 250.0);
        assert_eq!(config.settle_secs, 3);
        assert_eq!(config.missing_filename, MissingFilenamePolicy::Default);
        assert!(!config.check_status);
        assert_eq!(config.request_timeout_secs, Some(30));
    }
}

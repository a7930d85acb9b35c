use crate::error::HarvestError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Filename used when an image URL yields none and the `Default` policy is active
pub const DEFAULT_FILENAME: &str = "image.jpg";

/// What to do with an image whose URL has no extractable filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFilenamePolicy {
    /// Leave the image out of the download batch
    #[default]
    Skip,
    /// Download it as `image.jpg`
    Default,
}

/// Configuration for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Images must be strictly taller than this many pixels
    #[serde(default = "default_min_height")]
    pub min_height: f64,

    /// Directory downloaded images are saved into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Seconds to wait after navigation so lazy images can lay out
    #[serde(default)]
    pub settle_secs: u64,

    #[serde(default)]
    pub missing_filename: MissingFilenamePolicy,

    /// Treat non-2xx responses as failures
    #[serde(default = "default_check_status")]
    pub check_status: bool,

    /// Per-request timeout; no timeout beyond the network stack's when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_min_height() -> f64 {
    400.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Rejects heights that no image could be compared against
pub fn check_min_height(min_height: f64) -> Result<f64, String> {
    if !min_height.is_finite() || min_height < 0.0 {
        return Err(format!(
            "min_height must be a non-negative number, got {}",
            min_height
        ));
    }
    Ok(min_height)
}

/// Parses a `--min-height` value
pub fn parse_min_height(value: &str) -> Result<f64, String> {
    let min_height: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    check_min_height(min_height)
}

fn default_check_status() -> bool {
    true
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            min_height: default_min_height(),
            output_dir: default_output_dir(),
            webdriver_url: default_webdriver_url(),
            settle_secs: 0,
            missing_filename: MissingFilenamePolicy::default(),
            check_status: default_check_status(),
            request_timeout_secs: None,
        }
    }
}

impl HarvestConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|source| HarvestError::Io {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, HarvestError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| HarvestError::Config(e.to_string()))?;
        check_min_height(config.min_height).map_err(HarvestError::Config)?;
        Ok(config)
    }

    /// Override the WebDriver URL from `WEBDRIVER_URL` when it is set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = HarvestConfig::from_json("{}").unwrap();
        assert_eq!(config.min_height, 400.0);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.missing_filename, MissingFilenamePolicy::Skip);
        assert!(config.check_status);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_earliest_revision_policy() {
        let json = r#"{"missing_filename": "default", "check_status": false, "min_height": 250}"#;
        let config = HarvestConfig::from_json(json).unwrap();
        assert_eq!(config.missing_filename, MissingFilenamePolicy::Default);
        assert!(!config.check_status);
        assert_eq!(config.min_height, 250.0);
    }

    #[test]
    fn test_rejects_negative_height() {
        assert!(HarvestConfig::from_json(r#"{"min_height": -1}"#).is_err());
        assert!(HarvestConfig::from_json(r#"{"missing_filename": "rename"}"#).is_err());
    }

    #[test]
    fn test_parse_min_height() {
        assert_eq!(parse_min_height("250"), Ok(250.0));
        assert_eq!(parse_min_height("0"), Ok(0.0));
        assert!(parse_min_height("NaN").is_err());
        assert!(parse_min_height("inf").is_err());
        assert!(parse_min_height("-5").is_err());
        assert!(parse_min_height("tall").is_err());
        assert!(HarvestConfig::from_json(r#"{"min_height": 1e400}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = HarvestConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, HarvestError::Io { .. }));
    }
}

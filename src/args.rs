use clap::{Parser, ValueEnum};
use img_harvest::config::parse_min_height;
use img_harvest::{MissingFilenamePolicy, PageSource};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "img-harvest")]
#[command(about = "Downloads the large images of a web page")]
#[command(version)]
pub struct Args {
    /// Page to harvest; the base URL for relative sources when --html is given
    pub page: String,

    /// Read images from a saved HTML file instead of a live browser
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to save images into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only images strictly taller than this many pixels are downloaded
    #[arg(long, value_parser = parse_min_height)]
    pub min_height: Option<f64>,

    /// Seconds to wait after the page loads before reading images
    #[arg(long)]
    pub settle: Option<u64>,

    /// What to do with images whose URL yields no filename
    #[arg(long, value_enum)]
    pub missing_filename: Option<MissingFilenameArg>,

    /// Save responses even when the server reports an error status
    #[arg(long)]
    pub no_status_check: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MissingFilenameArg {
    Skip,
    Default,
}

impl From<MissingFilenameArg> for MissingFilenamePolicy {
    fn from(arg: MissingFilenameArg) -> Self {
        match arg {
            MissingFilenameArg::Skip => MissingFilenamePolicy::Skip,
            MissingFilenameArg::Default => MissingFilenamePolicy::Default,
        }
    }
}

impl Args {
    /// Convert from CLI arguments to the page source
    pub fn source(&self) -> PageSource {
        match &self.html {
            Some(path) => PageSource::HtmlFile {
                path: path.clone(),
                base_url: self.page.clone(),
            },
            None => PageSource::Web(self.page.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_height_is_validated() {
        let args = Args::try_parse_from(["img-harvest", "https://example.com", "--min-height", "250"])
            .unwrap();
        assert_eq!(args.min_height, Some(250.0));

        for bad in ["NaN", "-1", "inf"] {
            let result =
                Args::try_parse_from(["img-harvest", "https://example.com", "--min-height", bad]);
            assert!(result.is_err(), "accepted --min-height {}", bad);
        }
    }

    #[test]
    fn test_html_source_uses_page_as_base() {
        let args =
            Args::try_parse_from(["img-harvest", "https://example.com/p/", "--html", "saved.html"])
                .unwrap();
        match args.source() {
            PageSource::HtmlFile { path, base_url } => {
                assert_eq!(path, PathBuf::from("saved.html"));
                assert_eq!(base_url, "https://example.com/p/");
            }
            other => panic!("unexpected source {:?}", other),
        }
    }
}

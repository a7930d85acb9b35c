use crate::error::HarvestError;
use crate::locators::PageSnapshot;
use crate::results::PageImage;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;

/// Reads every `<img>` in document order with its layout height.
///
/// `HTMLImageElement.height` is the rendered height, or 0 for an image that
/// is not laid out.
const SNAPSHOT_SCRIPT: &str = r#"
return Array.from(document.images).map(function (img) {
    return { url: img.src, height: img.height };
});
"#;

/// Loads `page_url` in a WebDriver-controlled browser and snapshots its images.
///
/// The session is closed before returning, on success or failure.
pub async fn snapshot(
    webdriver_url: &str,
    page_url: &str,
    settle: Duration,
) -> Result<PageSnapshot, HarvestError> {
    let client = connect_to_webdriver(webdriver_url).await?;

    let result = read_images(&client, page_url, settle).await;

    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }

    let snapshot = result?;
    ::log::info!("Found {} images on {}", snapshot.images.len(), page_url);
    Ok(snapshot)
}

async fn read_images(
    client: &Client,
    page_url: &str,
    settle: Duration,
) -> Result<PageSnapshot, HarvestError> {
    ::log::debug!("Navigating to {}", page_url);
    client.goto(page_url).await?;

    if !settle.is_zero() {
        ::log::debug!("Waiting {:?} for images to lay out", settle);
        tokio::time::sleep(settle).await;
    }

    let value = client.execute(SNAPSHOT_SCRIPT, Vec::new()).await?;
    parse_snapshot(value)
}

/// Decodes the value returned by the snapshot script
pub fn parse_snapshot(value: serde_json::Value) -> Result<PageSnapshot, HarvestError> {
    let images: Vec<PageImage> = serde_json::from_value(value)?;
    // src="" resolves to the empty string and can never be fetched
    let images = images.into_iter().filter(|i| !i.url.is_empty()).collect();
    Ok(PageSnapshot::new(images))
}

/// Connects to the WebDriver instance, then to the common alternative endpoints
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, HarvestError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4444", // geckodriver / Selenium default
        "http://127.0.0.1:4444",
    ];

    let mut tried = vec![webdriver_url.to_string()];
    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        tried.push(url.to_string());
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(HarvestError::WebDriverUnavailable(tried.join(", ")))
}

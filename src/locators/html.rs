use crate::locators::PageSnapshot;
use crate::results::PageImage;
use scraper::{Html, Selector};
use url::Url;

/// Builds a snapshot from a saved HTML document.
///
/// There is no layout here, so the declared `height` attribute stands in for
/// the rendered height; images without one count as 0 pixels tall, like an
/// image the browser has not laid out. `src` values are resolved against
/// `base_url`, and images whose `src` is missing or unresolvable are dropped.
pub fn snapshot(html: &str, base_url: &Url) -> PageSnapshot {
    let doc = Html::parse_document(html);
    let img_selector = Selector::parse("img").unwrap();

    let images: Vec<PageImage> = doc
        .select(&img_selector)
        .filter_map(|e| {
            let src = e.value().attr("src")?.trim();
            if src.is_empty() {
                return None;
            }
            let url = base_url.join(src).ok()?;
            let height = e
                .value()
                .attr("height")
                .and_then(declared_height)
                .unwrap_or(0.0);
            Some(PageImage::new(url.to_string(), height))
        })
        .collect();

    ::log::debug!("HTML document declares {} images", images.len());
    PageSnapshot::new(images)
}

/// Parses `height="500"` or `height="500px"`
fn declared_height(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|h| h.is_finite() && *h >= 0.0)
}

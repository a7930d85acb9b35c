use crate::locators::browser::parse_snapshot;
use crate::locators::{DEFAULT_MIN_HEIGHT, PageSnapshot, locate};
use crate::results::PageImage;
use serde_json::json;

fn images(heights: &[f64]) -> Vec<PageImage> {
    heights
        .iter()
        .enumerate()
        .map(|(i, h)| PageImage::new(format!("https://example.com/img{}.png?v=1", i), *h))
        .collect()
}

#[test]
fn test_strictly_taller_in_document_order() {
    let images = images(&[100.0, 500.0, 401.0, 400.0]);
    let urls = locate(&images, DEFAULT_MIN_HEIGHT);
    assert_eq!(
        urls,
        vec![
            "https://example.com/img1.png?v=1".to_string(),
            "https://example.com/img2.png?v=1".to_string(),
        ]
    );
}

#[test]
fn test_nothing_qualifies() {
    assert!(locate(&images(&[10.0, 400.0]), DEFAULT_MIN_HEIGHT).is_empty());
    assert!(locate(&[], DEFAULT_MIN_HEIGHT).is_empty());
}

#[test]
fn test_custom_threshold() {
    let urls = locate(&images(&[100.0, 50.0, 101.0]), 100.0);
    assert_eq!(urls, vec!["https://example.com/img2.png?v=1".to_string()]);
}

#[test]
fn test_locate_is_idempotent() {
    let snapshot = PageSnapshot::new(images(&[900.0, 20.0, 450.0]));
    assert_eq!(
        snapshot.locate(DEFAULT_MIN_HEIGHT),
        snapshot.locate(DEFAULT_MIN_HEIGHT)
    );
}

#[test]
fn test_parse_browser_snapshot() {
    let value = json!([
        {"url": "https://example.com/a.png?x=1", "height": 640},
        {"url": "", "height": 900},
        {"url": "https://example.com/b.png", "height": 12.5}
    ]);
    let snapshot = parse_snapshot(value).unwrap();
    assert_eq!(
        snapshot.images,
        vec![
            PageImage::new("https://example.com/a.png?x=1", 640.0),
            PageImage::new("https://example.com/b.png", 12.5),
        ]
    );
}

#[test]
fn test_parse_browser_snapshot_rejects_garbage() {
    assert!(parse_snapshot(json!({"images": 3})).is_err());
    assert!(parse_snapshot(json!([{"url": "x"}])).is_err());
}

pub mod browser;
pub mod html;

#[cfg(test)]
mod tests;

use crate::results::PageImage;

/// Default minimum rendered height, in pixels
pub const DEFAULT_MIN_HEIGHT: f64 = 400.0;

/// Images of a page, captured in document order at a single point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    pub images: Vec<PageImage>,
}

impl PageSnapshot {
    pub fn new(images: Vec<PageImage>) -> Self {
        Self { images }
    }

    /// URLs of the images taller than `min_height`
    pub fn locate(&self, min_height: f64) -> Vec<String> {
        locate(&self.images, min_height)
    }
}

/// Returns, in document order, the URLs of images whose rendered height strictly
/// exceeds `min_height`.
pub fn locate(images: &[PageImage], min_height: f64) -> Vec<String> {
    let urls: Vec<String> = images
        .iter()
        .filter(|image| image.height > min_height)
        .map(|image| image.url.clone())
        .collect();

    ::log::debug!(
        "{} of {} images are taller than {}px",
        urls.len(),
        images.len(),
        min_height
    );
    urls
}

use regex::Regex;
use std::sync::LazyLock;

/// A run of non-slash characters between a `/` and a `?`
static FILENAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([^/]+)\?").expect("filename pattern is valid"));

/// Extracts the filename that sits right before the query string of an image URL.
///
/// URLs without a query string never match, even when the path clearly ends
/// in a file name. A returned name is never empty.
pub fn extract_filename(url: &str) -> Option<String> {
    FILENAME_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_before_query() {
        assert_eq!(
            extract_filename("https://example.com/path/name123?size=large"),
            Some("name123".to_string())
        );
        assert_eq!(
            extract_filename("https://cdn.example.com/a.png?x=1"),
            Some("a.png".to_string())
        );
    }

    #[test]
    fn test_no_query_string() {
        assert_eq!(extract_filename("https://example.com/path/name123"), None);
        assert_eq!(extract_filename("https://example.com/photos/b.jpg"), None);
    }

    #[test]
    fn test_no_run_before_question_mark() {
        assert_eq!(extract_filename("https://example.com/?v=2"), None);
        assert_eq!(extract_filename("no-slash-here?x=1"), None);
    }

    #[test]
    fn test_first_match_wins() {
        // The first `?` closes the match; anything after it is ignored
        assert_eq!(
            extract_filename("https://example.com/img/pic.webp?next=/other.png?z=1"),
            Some("pic.webp".to_string())
        );
    }

    #[test]
    fn test_host_only_before_query() {
        assert_eq!(
            extract_filename("https://example.com?img=1"),
            Some("example.com".to_string())
        );
    }
}

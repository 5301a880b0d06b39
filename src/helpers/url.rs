//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in a path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Prefix every blog route lives under
pub const BLOG_ROOT: &str = "/blog";

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// URL of a post detail page
///
/// Identifiers come from file names and are used unencoded.
pub fn post_url(slug: &str) -> String {
    format!("{}/{}", BLOG_ROOT, slug)
}

/// URL of a category listing
pub fn category_url(category: &str) -> String {
    format!("{}/category/{}", BLOG_ROOT, encode_segment(category))
}

/// URL of a tag listing
pub fn tag_url(tag: &str) -> String {
    format!("{}/tag/{}", BLOG_ROOT, encode_segment(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_url() {
        assert_eq!(post_url("hello-world"), "/blog/hello-world");
    }

    #[test]
    fn test_taxonomy_urls_are_encoded() {
        assert_eq!(category_url("tech"), "/blog/category/tech");
        assert_eq!(tag_url("c++"), "/blog/tag/c%2B%2B");
        assert_eq!(tag_url("web dev"), "/blog/tag/web%20dev");
        assert_eq!(tag_url("日本"), "/blog/tag/%E6%97%A5%E6%9C%AC");
    }
}

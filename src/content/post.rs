//! Post model

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

use super::markdown::TocEntry;

/// Title used when the front-matter has none
pub const DEFAULT_TITLE: &str = "No Title";

/// A blog post
///
/// Built once by the loader and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Identifier: the source file name without its extension
    pub slug: String,

    /// Post title
    pub title: String,

    /// Post author
    pub author: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// `date` rendered with the configured format
    pub formatted_date: String,

    /// Single category label, possibly empty
    pub category: String,

    /// Post tags, in front-matter order
    pub tags: Vec<String>,

    /// Short summary from the front-matter
    pub excerpt: Option<String>,

    /// Rendered HTML content
    pub content: String,

    /// Raw markdown body
    #[serde(skip)]
    pub raw: String,

    /// Headings of the rendered body
    pub toc: Vec<TocEntry>,

    /// Estimated reading time in minutes
    pub reading_time: usize,

    /// URL path of the detail page
    pub url: String,

    /// Full source file path
    #[serde(skip)]
    pub full_source: PathBuf,
}

impl Post {
    /// Whether the post's category equals `category`, ignoring case
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Whether the post carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// Lowercased tags, for case-insensitive comparisons
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.to_lowercase()).collect()
    }

    /// Get the newer neighbour in a date-descending list
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        pos.checked_sub(1).map(|i| &posts[i])
    }

    /// Get the older neighbour in a date-descending list
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        posts.get(pos + 1)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// A post with only the fields the index looks at filled in
    pub fn post(slug: &str, day: u32, category: &str, tags: &[&str]) -> Post {
        let date = Local
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .single()
            .unwrap();
        Post {
            slug: slug.to_string(),
            title: format!("Post {}", slug),
            author: "Anonymous".to_string(),
            date,
            formatted_date: date.format("%Y-%m-%d").to_string(),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            excerpt: None,
            content: String::new(),
            raw: String::new(),
            toc: Vec::new(),
            reading_time: 1,
            url: format!("/blog/{}", slug),
            full_source: PathBuf::from(format!("{}.md", slug)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::post;

    #[test]
    fn test_category_match_ignores_case() {
        let p = post("a", 1, "Tech", &[]);
        assert!(p.in_category("tech"));
        assert!(p.in_category("TECH"));
        assert!(!p.in_category("life"));
        assert!(post("b", 1, "", &[]).in_category(""));
    }

    #[test]
    fn test_tag_match_ignores_case() {
        let p = post("a", 1, "", &["Rust", "go"]);
        assert!(p.has_tag("rust"));
        assert!(p.has_tag("GO"));
        assert!(!p.has_tag("python"));
        assert_eq!(p.normalized_tags(), vec!["rust", "go"]);
    }

    #[test]
    fn test_neighbours() {
        let posts = vec![post("a", 3, "", &[]), post("b", 2, "", &[]), post("c", 1, "", &[])];
        assert!(posts[0].prev(&posts).is_none());
        assert_eq!(posts[1].prev(&posts).unwrap().slug, "a");
        assert_eq!(posts[1].next(&posts).unwrap().slug, "c");
        assert!(posts[2].next(&posts).is_none());
    }
}

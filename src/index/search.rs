//! Keyword search over posts
//!
//! A query is split on whitespace; a post matches when every term occurs,
//! case-insensitively, as a substring of its title, excerpt, markdown body,
//! category or one of its tags. Partial words match.

use crate::content::Post;

/// Lowercased search terms of `query`; empty for a blank query
pub fn terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether `post` contains every one of `terms`
pub fn matches(post: &Post, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }

    let haystacks = [
        post.title.to_lowercase(),
        post.excerpt.as_deref().unwrap_or_default().to_lowercase(),
        post.raw.to_lowercase(),
        post.category.to_lowercase(),
    ];
    let tags = post.normalized_tags();

    terms.iter().all(|term| {
        haystacks.iter().any(|h| h.contains(term.as_str()))
            || tags.iter().any(|t| t.contains(term.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fixtures::post;

    fn sample() -> Post {
        let mut p = post("s", 1, "Tech", &["Rustacean"]);
        p.title = "Async in Practice".to_string();
        p.excerpt = Some("Notes on executors".to_string());
        p.raw = "Tokio drives the futures.".to_string();
        p
    }

    #[test]
    fn test_blank_query_has_no_terms() {
        assert!(terms("").is_empty());
        assert!(terms("   \t").is_empty());
        assert!(!matches(&sample(), &terms("")));
    }

    #[test]
    fn test_matches_each_field() {
        let p = sample();
        assert!(matches(&p, &terms("ASYNC")));
        assert!(matches(&p, &terms("executors")));
        assert!(matches(&p, &terms("tokio")));
        assert!(matches(&p, &terms("tech")));
        assert!(matches(&p, &terms("rust")));
        assert!(!matches(&p, &terms("python")));
    }

    #[test]
    fn test_all_terms_required() {
        let p = sample();
        assert!(matches(&p, &terms("tokio practice")));
        assert!(!matches(&p, &terms("tokio python")));
    }
}

//! Related-post ranking

use serde::Serialize;

use crate::content::Post;

/// Number of related posts shown under a post
pub const DEFAULT_RELATED: usize = 3;

/// Score for sharing the reference post's category
pub const CATEGORY_SCORE: u32 = 5;

/// Score for each tag shared with the reference post
pub const TAG_SCORE: u32 = 3;

/// A post together with its relevance to some reference post
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoredPost<'a> {
    pub post: &'a Post,
    pub score: u32,
}

/// Relevance of `other` to `reference`
pub fn relevance(reference: &Post, other: &Post) -> u32 {
    let mut score = 0;

    if !reference.category.is_empty() && other.in_category(&reference.category) {
        score += CATEGORY_SCORE;
    }

    let other_tags = other.normalized_tags();
    for tag in reference.normalized_tags() {
        if other_tags.contains(&tag) {
            score += TAG_SCORE;
        }
    }

    score
}

/// Rank `posts` by relevance to `reference`, best first
///
/// The reference post and posts scoring zero are left out. Equal scores
/// keep the order of `posts`.
pub fn rank<'a>(posts: &'a [Post], reference: &Post, max: usize) -> Vec<ScoredPost<'a>> {
    let mut scored: Vec<ScoredPost<'a>> = posts
        .iter()
        .filter(|p| p.slug != reference.slug)
        .map(|post| ScoredPost {
            post,
            score: relevance(reference, post),
        })
        .filter(|s| s.score > 0)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(max);
    scored
}

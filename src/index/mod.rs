//! In-memory post index
//!
//! Holds the loaded collection, newest first, and answers every query the
//! views need: lookup, category/tag filters, counts, search and related
//! posts. The collection only changes through [`PostIndex::reload`].

mod related;
mod search;

use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::content::{Post, PostLoader};

pub use related::{relevance, ScoredPost, CATEGORY_SCORE, DEFAULT_RELATED, TAG_SCORE};

/// Aggregate numbers shown on the home page
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats<'a> {
    pub total_posts: usize,
    pub total_categories: usize,
    pub total_tags: usize,
    pub latest: Option<&'a Post>,
}

/// Posts sorted by publication date, newest first
#[derive(Debug, Default)]
pub struct PostIndex {
    source_dir: Option<PathBuf>,
    posts: Vec<Post>,
}

impl PostIndex {
    /// Index an already-loaded collection
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self {
            source_dir: None,
            posts,
        }
    }

    /// Load and index every post in `dir`
    pub fn load(loader: &PostLoader, dir: &Path) -> Self {
        let posts = loader.load_dir(dir);
        tracing::info!("Indexed {} posts from {:?}", posts.len(), dir);
        Self {
            source_dir: Some(dir.to_path_buf()),
            posts,
        }
    }

    /// Re-read the source directory, replacing the whole collection
    ///
    /// An index built with [`PostIndex::new`] has no directory and is left as-is.
    pub fn reload(&mut self, loader: &PostLoader) {
        if let Some(dir) = self.source_dir.clone() {
            *self = Self::load(loader, &dir);
        }
    }

    /// Directory the posts were loaded from
    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// All posts, newest first
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    /// Find a post by its identifier
    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Posts whose category equals `category`, ignoring case
    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.in_category(category))
            .collect()
    }

    /// Posts tagged with `tag`, ignoring case
    pub fn by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// Lowercased category -> number of posts, in order of first appearance
    pub fn category_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for post in &self.posts {
            if post.category.is_empty() {
                continue;
            }
            *counts.entry(post.category.to_lowercase()).or_insert(0) += 1;
        }
        counts
    }

    /// Lowercased tag -> number of posts, in order of first appearance
    pub fn tag_counts(&self) -> IndexMap<String, usize> {
        let mut counts = IndexMap::new();
        for post in &self.posts {
            for tag in post.normalized_tags() {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Posts matching every whitespace-separated term of `query`
    ///
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let terms = search::terms(query);
        if terms.is_empty() {
            return Vec::new();
        }
        self.posts
            .iter()
            .filter(|p| search::matches(p, &terms))
            .collect()
    }

    /// Up to `max` posts most related to `post`, best first
    pub fn related(&self, post: &Post, max: usize) -> Vec<ScoredPost<'_>> {
        related::rank(&self.posts, post, max)
    }

    /// Totals for the home page
    pub fn stats(&self) -> IndexStats<'_> {
        IndexStats {
            total_posts: self.posts.len(),
            total_categories: self.category_counts().len(),
            total_tags: self.tag_counts().len(),
            latest: self.posts.first(),
        }
    }
}

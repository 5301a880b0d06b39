//! Content loader - loads posts from the posts directory

use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::post::DEFAULT_TITLE;
use super::{FrontMatter, LoadError, MarkdownRenderer, Post};
use crate::config::BlogConfig;
use crate::helpers::{format_date, post_url, reading_time, resolve_date};

/// Loads posts from a single directory
pub struct PostLoader {
    renderer: MarkdownRenderer,
    date_format: String,
    default_author: String,
}

impl PostLoader {
    /// Create a loader using the blog's highlight, date and author settings
    pub fn new(config: &BlogConfig) -> Self {
        let renderer =
            MarkdownRenderer::with_options(&config.highlight.theme, config.highlight.line_number);
        Self {
            renderer,
            date_format: config.date_format.clone(),
            default_author: config.author.clone(),
        }
    }

    /// Load every markdown file directly inside `dir`, newest first
    ///
    /// A missing directory yields an empty list. Files that fail to load
    /// are logged and skipped. When two files map to the same identifier
    /// the one loaded later replaces the earlier one.
    pub fn load_dir(&self, dir: &Path) -> Vec<Post> {
        if !dir.is_dir() {
            tracing::debug!("Posts directory {:?} does not exist", dir);
            return Vec::new();
        }

        let now = Local::now();
        let mut posts: Vec<Post> = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path, now) {
                Ok(post) => {
                    if let Some(existing) = posts.iter_mut().find(|p| p.slug == post.slug) {
                        tracing::warn!(
                            "Duplicate post identifier {:?}: {:?} replaces {:?}",
                            post.slug,
                            post.full_source,
                            existing.full_source
                        );
                        *existing = post;
                    } else {
                        posts.push(post);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                }
            }
        }

        // Sort by date descending (newest first); stable on ties
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), dir);
        posts
    }

    /// Load a single post from a file
    pub fn load_post(&self, path: &Path, now: DateTime<Local>) -> Result<Post, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LoadError::InvalidFileName(path.to_path_buf()))?
            .to_string();

        let mut post = self.parse_post(&slug, &content, now)?;
        post.full_source = path.to_path_buf();
        Ok(post)
    }

    /// Build a post from file contents
    pub fn parse_post(
        &self,
        slug: &str,
        content: &str,
        now: DateTime<Local>,
    ) -> Result<Post, LoadError> {
        let (fm, body) = FrontMatter::parse(content)?;

        let date = resolve_date(fm.date.as_deref(), now);
        let rendered = self.renderer.render(body);

        Ok(Post {
            slug: slug.to_string(),
            title: fm.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            author: fm.author.unwrap_or_else(|| self.default_author.clone()),
            formatted_date: format_date(&date, &self.date_format),
            date,
            category: fm.category.unwrap_or_default(),
            tags: fm.tags,
            excerpt: fm.excerpt.filter(|e| !e.trim().is_empty()),
            reading_time: reading_time(&rendered.html),
            content: rendered.html,
            raw: body.to_string(),
            toc: rendered.toc,
            url: post_url(slug),
            full_source: Default::default(),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

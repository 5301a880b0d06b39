//! Blog configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,
    pub description: String,
    /// Author used for posts that do not name one
    pub author: String,
    pub url: String,

    // Server
    pub host: String,
    pub port: u16,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,

    // Listing
    pub per_page: usize,
    /// chrono format string used for `Post::formatted_date`
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Staticle".to_string(),
            description: "Modern Blog with HTMX".to_string(),
            author: "Anonymous".to_string(),
            url: "http://localhost:5001".to_string(),

            host: "0.0.0.0".to_string(),
            port: 5001,

            posts_dir: "content/posts".to_string(),
            static_dir: "static".to_string(),

            per_page: 10,
            date_format: "%Y年%m月%d日".to_string(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Apply overrides from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (keeps tests off the real environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }
        if let Some(title) = lookup("BLOG_TITLE") {
            self.title = title;
        }
        if let Some(description) = lookup("BLOG_DESCRIPTION") {
            self.description = description;
        }
        if let Some(author) = lookup("BLOG_AUTHOR") {
            self.author = author;
        }
        if let Some(per_page) = lookup("POSTS_PER_PAGE") {
            match per_page.parse() {
                Ok(n) => self.per_page = n,
                Err(_) => tracing::warn!("Ignoring invalid POSTS_PER_PAGE value: {}", per_page),
            }
        }
        if let Some(url) = lookup("SITE_URL") {
            self.url = url;
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

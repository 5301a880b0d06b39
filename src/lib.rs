//! staticle: a file-based markdown blog engine
//!
//! Posts are markdown files with a YAML metadata header. They are loaded
//! into an in-memory [`index::PostIndex`] once at startup and served
//! through a small axum application.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod index;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The blog application
#[derive(Debug, Clone)]
pub struct Staticle {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the markdown posts
    pub posts_dir: PathBuf,
    /// Directory served under /static
    pub static_dir: PathBuf,
}

impl Staticle {
    /// Create a new instance from a directory
    ///
    /// Reads `_config.yml` when present, then applies environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::BlogConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::BlogConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);
        Self {
            config,
            base_dir,
            posts_dir,
            static_dir,
        }
    }

    /// A loader configured for this blog
    pub fn loader(&self) -> content::PostLoader {
        content::PostLoader::new(&self.config)
    }

    /// Load the posts directory into a fresh index
    pub fn load_index(&self) -> index::PostIndex {
        index::PostIndex::load(&self.loader(), &self.posts_dir)
    }
}

//! Errors raised while loading a single post

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a source file is dropped from the collection
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("File name is not valid UTF-8: {0:?}")]
    InvalidFileName(PathBuf),
}

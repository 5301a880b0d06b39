//! Content module - handles post loading and markdown processing

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::LoadError;
pub use frontmatter::FrontMatter;
pub use loader::PostLoader;
pub use markdown::{MarkdownRenderer, Rendered, TocEntry};
pub use post::{Post, DEFAULT_TITLE};

#[cfg(test)]
pub(crate) use post::fixtures;

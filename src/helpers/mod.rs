//! Helper functions shared by the loader and the views
//!
//! Date policy, HTML text utilities, URL building and page arithmetic.

mod date;
mod html;
pub mod pagination;
mod url;

pub use date::*;
pub use html::*;
pub use pagination::Paginator;
pub use url::*;

//! Page metadata and post listings for a markdown blog.
//!
//! The host site generator discovers content and renders templates; this
//! crate derives the frontmatter each page is rendered with, lists the posts
//! with their creation dates, and formats dates for templates.

pub mod config;
pub mod date;
pub mod derive;
pub mod front_matter;
pub mod pipeline;
pub mod posts;
pub mod summary;
pub mod transformer;
pub mod types;
pub mod utils;

//! Markdown documentation rendering for Kontora.
//!
//! # Modules
//!
//! - [`frontmatter`]: YAML front-matter extraction
//! - [`markdown`]: Title extraction and sanitized HTML rendering
//! - [`document`]: The [`Document`] type
//! - [`library`]: [`DocsLibrary`], lookup and listing over a docs root

#![doc = include_str!("../README.md")]

pub mod document;
pub mod frontmatter;
pub mod library;
pub mod markdown;

pub use document::Document;
pub use library::{DEFAULT_CONTENT_FILE, DocsLibrary};

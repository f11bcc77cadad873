//! Shared errors, configuration traits, and filesystem helpers for Kontora.
//!
//! This crate provides the foundational types used across all Kontora crates.
//! It has no internal Kontora dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Core traits for configuration abstraction
//! - [`util`]: File and path utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

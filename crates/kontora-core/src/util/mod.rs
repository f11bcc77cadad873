//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async directory listing and file reading
//! - [`paths`]: Path helpers (tilde expansion, single-component checks)

pub mod files;
pub mod paths;

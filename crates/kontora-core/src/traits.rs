//! Core traits for Kontora configuration abstraction.
//!
//! The primary trait is [`ConfigProvider`], which lets the documentation and
//! workspace crates ask for the paths and connection details they need
//! without depending on the concrete configuration type of the binary.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use kontora_core::traits::ConfigProvider;
/// use kontora_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "kontora"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn docs_path(&self) -> Result<PathBuf> {
///         Ok(self.root.join("docs"))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Root directory holding one subdirectory per document.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn docs_path(&self) -> Result<PathBuf>;

    /// Name of the Markdown file inside each document directory.
    fn docs_content_file(&self) -> &str {
        "index.md"
    }

    /// Connection URL for the workspace database, if one is configured.
    fn database_url(&self) -> Option<&str> {
        None
    }
}

//! Lookup and listing over a documentation root.
//!
//! Layout: `<root>/<id>/<content_file>`. Every subdirectory of the root is a
//! candidate document; a candidate without its content file is skipped.
//!
//! Missing documents are an expected condition and come back as `None`.
//! Filesystem failures on existing paths are returned as errors, since the
//! tree is bundled, developer-controlled content.

use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use kontora_core::util::{files, paths};
use kontora_core::{ConfigProvider, Result};

use crate::document::Document;

/// Content file name used when none is configured.
pub const DEFAULT_CONTENT_FILE: &str = "index.md";

/// Documentation tree rooted at a directory.
#[derive(Debug, Clone)]
pub struct DocsLibrary {
    root: PathBuf,
    content_file: String,
}

impl DocsLibrary {
    /// Create a library over `root` using [`DEFAULT_CONTENT_FILE`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            content_file: DEFAULT_CONTENT_FILE.to_string(),
        }
    }

    /// Build a library from the configured docs path and content file name.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.docs_path()?).with_content_file(config.docs_content_file()))
    }

    /// Override the per-document content file name.
    pub fn with_content_file(mut self, name: impl Into<String>) -> Self {
        self.content_file = name.into();
        self
    }

    /// The documentation root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The per-document content file name.
    pub fn content_file(&self) -> &str {
        &self.content_file
    }

    /// Identifiers of all candidate documents, in filesystem order.
    pub async fn list_document_identifiers(&self) -> Result<Vec<String>> {
        let dirs = files::list_subdirectories(&self.root).await?;
        let mut ids = Vec::with_capacity(dirs.len());

        for dir in dirs {
            match dir.file_name().and_then(|n| n.to_str()) {
                Some(name) => ids.push(name.to_string()),
                None => log::warn!("Skipping non UTF-8 docs directory {}", dir.display()),
            }
        }

        Ok(ids)
    }

    /// Look up a single document.
    ///
    /// Returns `Ok(None)` when `id` is empty or not a plain directory name,
    /// when the directory does not exist, or when it has no content file.
    pub async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        if !paths::is_single_component(id) {
            log::debug!("Rejecting document id {id:?}");
            return Ok(None);
        }

        let dir = self.root.join(id);
        if !files::is_dir(&dir).await {
            return Ok(None);
        }

        let Some(source) = files::read_file_if_exists(&dir.join(&self.content_file)).await? else {
            log::debug!("Document {id} has no {}", self.content_file);
            return Ok(None);
        };

        Document::parse(id, &source).map(Some)
    }

    /// Rendered HTML for `id`, or an empty string when it does not exist.
    pub async fn render_document_html(&self, id: &str) -> Result<String> {
        Ok(self
            .get_document(id)
            .await?
            .map(|doc| doc.html)
            .unwrap_or_default())
    }

    /// Every resolvable document, sorted by identifier.
    pub async fn list_all_documents(&self) -> Result<Vec<Document>> {
        let ids = self.list_document_identifiers().await?;
        let found = try_join_all(ids.iter().map(|id| self.get_document(id))).await?;

        let mut docs: Vec<Document> = found.into_iter().flatten().collect();
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(docs)
    }
}

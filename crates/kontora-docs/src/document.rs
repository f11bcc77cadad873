//! The rendered documentation page.

use kontora_core::Result;
use serde::Serialize;

use crate::{frontmatter, markdown};

/// A documentation page read from disk.
///
/// Built fresh on every lookup; nothing is cached between calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Directory name under the docs root; also the routing key.
    pub id: String,
    /// First level-one heading, or `id` when the body has none.
    pub title: String,
    /// Parsed front-matter. Carried along, not interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_matter: Option<yaml_serde::Value>,
    /// Markdown body with the front-matter removed.
    pub body: String,
    /// Sanitized HTML rendering of `body`.
    pub html: String,
}

impl Document {
    /// Build a document from the raw contents of its content file.
    ///
    /// # Errors
    ///
    /// Fails only when the front-matter block holds malformed YAML.
    pub fn parse(id: impl Into<String>, source: &str) -> Result<Self> {
        let id = id.into();
        let extracted = frontmatter::extract(source)?;
        let title = markdown::extract_title(extracted.body).unwrap_or_else(|| id.clone());
        let html = markdown::render_html(extracted.body);

        Ok(Self {
            id,
            title,
            front_matter: extracted.front_matter,
            body: extracted.body.to_string(),
            html,
        })
    }
}

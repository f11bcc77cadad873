//! YAML front-matter extraction.
//!
//! A front-matter block is a first line of exactly `---`, followed by YAML,
//! closed by a line of `---` (or `...`). A block that is never closed is not
//! front-matter; the whole input is then treated as body.

use kontora_core::{Error, Result};

/// Front-matter split from a Markdown source.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    /// Parsed YAML, or `None` when the source has no (or an empty) block.
    pub front_matter: Option<yaml_serde::Value>,
    /// Markdown following the block.
    pub body: &'a str,
}

/// Split `content` into raw YAML and body without parsing the YAML.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let marker = line.trim_end_matches(['\r', '\n']);
        if marker == "---" || marker == "..." {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Extract and parse the front-matter of a Markdown source.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] when a closed block contains malformed YAML.
pub fn extract(content: &str) -> Result<Extracted<'_>> {
    let Some((yaml, body)) = split(content) else {
        return Ok(Extracted {
            front_matter: None,
            body: content.strip_prefix('\u{feff}').unwrap_or(content),
        });
    };

    if yaml.trim().is_empty() {
        return Ok(Extracted {
            front_matter: None,
            body,
        });
    }

    let value: yaml_serde::Value = yaml_serde::from_str(yaml)
        .map_err(|e| Error::invalid_data(format!("front-matter: {e}")))?;

    Ok(Extracted {
        front_matter: Some(value),
        body,
    })
}

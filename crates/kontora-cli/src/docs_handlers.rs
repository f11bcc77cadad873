//! Handler functions for `kontora docs {list,show,render}`.

use kontora_core::Result;
use kontora_docs::{Document, DocsLibrary};
use serde::Serialize;

use crate::output::{Outcome, to_json};

#[derive(Serialize)]
struct Summary<'a> {
    id: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct Rendered<'a> {
    id: &'a str,
    html: &'a str,
}

/// List resolvable documents as `id<TAB>title`, sorted by id.
pub async fn handle_list(library: &DocsLibrary, json: bool) -> Result<Outcome> {
    let docs = library.list_all_documents().await?;
    log::debug!("Found {} document(s) under {}", docs.len(), library.root().display());

    if json {
        let summaries: Vec<Summary<'_>> = docs.iter().map(summary).collect();
        return Ok(Outcome::ok(to_json(&summaries)?));
    }

    let lines: Vec<String> = docs
        .iter()
        .map(|d| format!("{}\t{}", d.id, d.title))
        .collect();
    Ok(Outcome::ok(lines.join("\n")))
}

/// Show one document's metadata and Markdown body.
pub async fn handle_show(library: &DocsLibrary, id: &str, json: bool) -> Result<Outcome> {
    let Some(doc) = library.get_document(id).await? else {
        return Ok(not_found(id));
    };

    if json {
        return Ok(Outcome::ok(to_json(&doc)?));
    }
    Ok(Outcome::ok(describe(&doc)?))
}

/// Print the sanitized HTML of one document.
pub async fn handle_render(library: &DocsLibrary, id: &str, json: bool) -> Result<Outcome> {
    let html = library.render_document_html(id).await?;
    if html.is_empty() {
        return Ok(not_found(id));
    }

    if json {
        return Ok(Outcome::ok(to_json(&Rendered { id, html: &html })?));
    }
    Ok(Outcome::ok(html))
}

fn summary(doc: &Document) -> Summary<'_> {
    Summary {
        id: &doc.id,
        title: &doc.title,
    }
}

fn describe(doc: &Document) -> Result<String> {
    let mut out = format!("Title: {}\nId:    {}\n", doc.title, doc.id);
    if let Some(front_matter) = &doc.front_matter {
        out.push_str("Front-matter:\n");
        out.push_str(&to_json(front_matter)?);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(doc.body.trim_end());
    Ok(out)
}

fn not_found(id: &str) -> Outcome {
    log::info!("Document {id:?} not found");
    Outcome::failed(format!("Document '{id}' not found"))
}

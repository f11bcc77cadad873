//! Markdown title extraction and sanitized HTML rendering.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// URL schemes that can execute script when followed or embedded.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Parser options used for documentation: GFM tables, task lists,
/// strikethrough and footnotes.
pub fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
}

/// Text of the first non-empty level-one heading in `body`.
///
/// Inline formatting is flattened to its text; inline code keeps its
/// contents.
pub fn extract_title(body: &str) -> Option<String> {
    let mut in_title = false;
    let mut title = String::new();

    for event in Parser::new_ext(body, options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                in_title = true;
                title.clear();
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let trimmed = title.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_title = false;
            }
            Event::Text(text) | Event::Code(text) if in_title => title.push_str(&text),
            Event::SoftBreak | Event::HardBreak if in_title => title.push(' '),
            _ => {}
        }
    }

    None
}

/// Render Markdown to HTML.
///
/// Raw HTML (block or inline) is emitted as escaped text, and link or image
/// destinations with a blocked scheme are replaced by `#`.
pub fn render_html(body: &str) -> String {
    let parser = Parser::new_ext(body, options()).map(sanitize);
    let mut out = String::with_capacity(body.len() + body.len() / 2);
    html::push_html(&mut out, parser);
    out
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    // Browsers ignore whitespace and control characters inside the scheme.
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();

    if BLOCKED_SCHEMES.iter().any(|s| normalized.starts_with(s)) {
        log::warn!("Dropping link with blocked scheme: {}", url);
        CowStr::Borrowed("#")
    } else {
        url
    }
}

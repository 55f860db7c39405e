//! Content Extractor
//!
//! Locates the content region of a page, serializes its inner markup and
//! removes excluded subtrees. Title and meta description are read from the
//! same parse.

use tracing::debug;

use crate::dom::{self, Document};
use crate::result::ExtractedContent;
use crate::selector::{self, Selector, SelectorList};

/// Error message when the content selector matches nothing.
pub const SELECTOR_NOT_FOUND: &str = "Selector not found";

/// Error message when the page has no usable body.
pub const NO_BODY_CONTENT: &str = "No body content found";

/// Extract the content region from an HTML page.
///
/// * `content_selector` - class name of the region; the first element (in
///   document order) carrying that class token is used. `None` or blank means
///   the whole `<body>`.
/// * `skip_selectors` - comma-separated selector list of subtrees to remove
///   from the extracted markup.
///
/// # Example
///
/// ```rust
/// use page2docx::extract_content;
///
/// let page = r#"<html><head><title> Hello </title></head>
/// <body><div class="main">hi <span class="ad">buy</span></div></body></html>"#;
///
/// let content = extract_content(page, Some("main"), Some(".ad"));
/// assert!(content.success);
/// assert_eq!(content.html.as_deref(), Some("hi "));
/// assert_eq!(content.meta_title.as_deref(), Some("Hello"));
/// ```
#[must_use]
pub fn extract_content(
    html: &str,
    content_selector: Option<&str>,
    skip_selectors: Option<&str>,
) -> ExtractedContent {
    let doc = dom::parse(html);

    let meta_title = extract_meta_title(&doc);
    let meta_description = extract_meta_description(&doc);

    let content_selector = content_selector.map(str::trim).filter(|s| !s.is_empty());

    let mut content_html = if let Some(class) = content_selector {
        let class = class.strip_prefix('.').unwrap_or(class);
        let found = selector::matches(&doc.root(), &Selector::ByClass(class.to_string()));
        let Some(region) = found.first() else {
            debug!(selector = class, "content selector matched nothing");
            return ExtractedContent::failed(SELECTOR_NOT_FOUND, meta_title, meta_description);
        };
        dom::inner_html(region).to_string()
    } else {
        match dom::body(&doc).map(|body| dom::inner_html(&body).to_string()) {
            Some(inner) if !inner.trim().is_empty() => inner,
            _ => {
                return ExtractedContent::failed(NO_BODY_CONTENT, meta_title, meta_description);
            }
        }
    };

    if let Some(skip) = skip_selectors.map(str::trim).filter(|s| !s.is_empty()) {
        content_html = remove_skip_selectors(&content_html, &SelectorList::parse(skip));
        debug!(bytes = content_html.len(), "after removing skip selectors");
    }

    debug!(
        bytes = content_html.len(),
        title = meta_title.as_deref().unwrap_or("none"),
        "extraction result"
    );

    ExtractedContent::found(content_html, meta_title, meta_description)
}

/// Remove every subtree matched by `selectors` from a markup fragment.
///
/// The fragment is re-parsed on its own; selectors run one after another,
/// each against what the previous ones left behind. The remaining children
/// are re-serialized with their original ordering and whitespace.
#[must_use]
pub fn remove_skip_selectors(html: &str, selectors: &SelectorList) -> String {
    if selectors.is_empty() {
        return html.to_string();
    }

    let doc = dom::parse(html);
    let Some(body) = dom::body(&doc) else {
        return html.to_string();
    };

    for sel in selectors.selectors() {
        let found = selector::matches(&body, sel);
        debug!(selector = sel.name(), matched = found.len(), "removing skipped nodes");
        for node in &found {
            dom::remove(node);
        }
    }

    dom::inner_html(&body).to_string()
}

/// Trimmed text of the first `<title>` element.
#[must_use]
pub fn extract_meta_title(doc: &Document) -> Option<String> {
    let titles = doc.select("title");
    let title = titles.nodes().first()?;
    non_empty(title.text().trim())
}

/// Trimmed `content` of the first `<meta name="description">`.
#[must_use]
pub fn extract_meta_description(doc: &Document) -> Option<String> {
    let metas = doc.select("meta");
    let meta = metas
        .nodes()
        .iter()
        .find(|m| m.attr("name").is_some_and(|n| &*n == "description"))?;
    non_empty(meta.attr("content")?.trim())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

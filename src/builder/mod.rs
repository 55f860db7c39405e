//! Document Builder
//!
//! Walks the sanitized content DOM and appends [`Block`]s to a [`Document`].
//! Dispatch is by lower-cased tag name; a run context (the paragraph being
//! assembled from styled spans) exists only under `p` when
//! [`Options::inline_formatting`] is set.

pub mod handlers;
pub mod state;
pub mod tags;

use tracing::{debug, warn};

use crate::document::{Block, Document, Run};
use crate::dom::{self, NodeRef};
use crate::error::Result;
use crate::patterns::{ANY_TAG, BLANK_LINE};
use crate::result::ExtractedContent;
use crate::sanitize::sanitize;
use crate::Options;

use handlers::{
    finish_runs, handle_class_heading, handle_heading, handle_paragraph, handle_table,
    heading_class_size, push_text_run,
};
use state::BuildState;
use tags::{is_bold_tag, is_container_tag, is_italic_tag, is_list_tag};

/// Minimum char count for a stray text node to become its own paragraph.
const MIN_STRAY_TEXT_CHARS: usize = 3;

/// Build a document from the children of `root`.
///
/// # Errors
///
/// Returns [`crate::Error::DepthExceeded`] when the markup nests deeper than
/// [`Options::max_tree_depth`].
pub fn build(root: &NodeRef, opts: &Options) -> Result<Document> {
    let mut builder = Builder::new(opts);
    builder.walk_children(root, None)?;
    Ok(builder.finish())
}

/// Build the full output document for one extracted page.
///
/// Prepends the page title and meta description (when present and
/// [`Options::include_meta`] is set), then sanitizes the content markup and
/// walks its body. Markup that yields no body is split into plain-text
/// paragraphs instead.
///
/// # Errors
///
/// Returns [`crate::Error::DepthExceeded`] on pathologically nested markup.
///
/// # Example
///
/// ```rust
/// use page2docx::{build_document, extract_content, Block, Options};
///
/// let page = r#"<html><head><title>Guide</title></head>
/// <body><h2>Intro</h2><p>Some text.</p></body></html>"#;
///
/// let content = extract_content(page, None, None);
/// let doc = build_document(&content, &Options::default()).unwrap();
///
/// assert_eq!(doc.blocks()[0], Block::Title { text: "Guide".into() });
/// assert_eq!(doc.blocks()[2].plain_text(), "Some text.");
/// ```
pub fn build_document(content: &ExtractedContent, opts: &Options) -> Result<Document> {
    let mut doc = Document::new();

    if opts.include_meta {
        if let Some(title) = decoded(content.meta_title.as_deref()) {
            debug!(title = %truncate(&title, 50), "adding meta title");
            doc.push(Block::Title { text: title });
        }
        if let Some(description) = decoded(content.meta_description.as_deref()) {
            debug!(description = %truncate(&description, 50), "adding meta description");
            doc.push(Block::Description { text: description });
        }
    }

    let Some(html) = content.html.as_deref().filter(|h| !h.trim().is_empty()) else {
        warn!("no HTML content to add");
        return Ok(doc);
    };

    let clean = sanitize(html);
    debug!(before = html.len(), after = clean.len(), "sanitized content");

    let parsed = dom::parse(&clean);
    match dom::body(&parsed) {
        Some(body) => {
            doc.append(build(&body, opts)?);
        }
        // html5ever always synthesizes a body, so this arm only guards
        // against a parser that leaves one out.
        None => {
            for text in plain_text_paragraphs(&clean) {
                doc.push(Block::text(text));
            }
            debug!("content added as plain text");
        }
    }

    debug!(blocks = doc.len(), "document built");
    Ok(doc)
}

/// Split markup into plain-text paragraphs on blank lines, tags stripped.
#[must_use]
pub fn plain_text_paragraphs(html: &str) -> Vec<String> {
    let text = ANY_TAG.replace_all(html, "");
    BLANK_LINE
        .split(text.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn decoded(text: Option<&str>) -> Option<String> {
    let text = html_escape::decode_html_entities(text?.trim()).into_owned();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    s.char_indices().nth(max_chars).map_or(s, |(i, _)| &s[..i])
}

struct Builder {
    state: BuildState,
    doc: Document,
}

impl Builder {
    fn new(opts: &Options) -> Self {
        Self {
            state: BuildState::new(opts),
            doc: Document::new(),
        }
    }

    fn finish(self) -> Document {
        self.doc
    }

    fn walk_children(&mut self, node: &NodeRef, mut runs: Option<&mut Vec<Run>>) -> Result<()> {
        for child in node.children() {
            self.walk(&child, runs.as_deref_mut())?;
        }
        Ok(())
    }

    fn walk(&mut self, node: &NodeRef, runs: Option<&mut Vec<Run>>) -> Result<()> {
        if node.is_text() {
            self.handle_text(node, runs);
            return Ok(());
        }
        let Some(tag) = dom::tag_name(node) else {
            return Ok(());
        };

        self.state.descend()?;
        let result = self.handle_element(node, &tag, runs);
        self.state.ascend();
        result
    }

    fn handle_text(&mut self, node: &NodeRef, runs: Option<&mut Vec<Run>>) {
        let text = node.text();
        match runs {
            Some(runs) => push_text_run(runs, &text),
            None => {
                let trimmed = text.trim();
                if trimmed.chars().count() >= MIN_STRAY_TEXT_CHARS {
                    self.doc.push(Block::text(trimmed));
                }
            }
        }
    }

    fn handle_element(
        &mut self,
        node: &NodeRef,
        tag: &str,
        runs: Option<&mut Vec<Run>>,
    ) -> Result<()> {
        if let Some(level) = dom::heading_level(tag) {
            if let Some(block) = handle_heading(node, level) {
                self.doc.push(block);
            }
            return Ok(());
        }

        match tag {
            "p" => self.handle_p(node, runs)?,
            "br" => {
                if let Some(runs) = runs {
                    runs.push(Run::line_break());
                }
            }
            "table" => {
                if let Some(block) = handle_table(node) {
                    self.doc.push(block);
                }
            }
            t if is_bold_tag(t) || is_italic_tag(t) => {
                let Some(runs) = runs else {
                    return Ok(());
                };
                let text = dom::text_content(node);
                if text.is_empty() {
                    return Ok(());
                }
                let run = if is_bold_tag(t) { Run::bold(text) } else { Run::italic(text) };
                runs.push(run);
            }
            t if is_list_tag(t) => self.handle_list(node, t == "ol")?,
            t if is_container_tag(t) => match heading_class_size(node) {
                Some(size) => {
                    if let Some(block) = handle_class_heading(node, size) {
                        self.doc.push(block);
                    }
                }
                None => self.walk_children(node, runs)?,
            },
            _ => self.walk_children(node, runs)?,
        }
        Ok(())
    }

    fn handle_p(&mut self, node: &NodeRef, runs: Option<&mut Vec<Run>>) -> Result<()> {
        if !self.state.inline_formatting() {
            if let Some(block) = handle_paragraph(node) {
                self.doc.push(block);
            }
            return Ok(());
        }

        // a nested p keeps writing into the enclosing paragraph
        if let Some(runs) = runs {
            return self.walk_children(node, Some(runs));
        }

        let mut own = Vec::new();
        self.walk_children(node, Some(&mut own))?;
        if let Some(runs) = finish_runs(own) {
            self.doc.push(Block::Paragraph { runs });
        }
        Ok(())
    }

    fn handle_list(&mut self, list: &NodeRef, ordered: bool) -> Result<()> {
        for item in dom::children_named(list, &["li"]) {
            if dom::contains_heading(&item) {
                self.state.descend()?;
                let result = self.walk_children(&item, None);
                self.state.ascend();
                result?;
                continue;
            }

            let text = dom::text_content(&item);
            if !text.is_empty() {
                self.doc.push(Block::ListItem { text, ordered, depth: 0 });
            }
        }
        Ok(())
    }
}

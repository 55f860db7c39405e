//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate. The tree is an arena owned by the
//! [`Document`]; nodes are addressed by [`NodeId`] and hold only a
//! non-owning link to their parent, which is used for removal and ancestor
//! checks but never for ownership.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

pub use tendril::StrTendril;

/// Heading tag names in level order.
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

// === Parsing ===

/// Parse HTML into a document.
///
/// The parser is tolerant: malformed markup is recovered into a best-effort
/// tree and never aborts.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// First `<body>` element of a document, if any.
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().copied()
}

// === Tag/Attribute Information ===

/// Get tag name (lowercase). `None` for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Get element ID attribute.
#[inline]
#[must_use]
pub fn id(node: &NodeRef) -> Option<String> {
    node.attr("id").map(|s| s.to_string())
}

/// Get element class attribute.
#[inline]
#[must_use]
pub fn class_name(node: &NodeRef) -> Option<String> {
    node.attr("class").map(|s| s.to_string())
}

/// Whether the whitespace-separated `class` attribute contains `token` exactly.
///
/// `bar` does not match `foobar`; matching is case-sensitive like HTML class
/// matching in standards mode.
#[must_use]
pub fn has_class_token(node: &NodeRef, token: &str) -> bool {
    node.attr("class")
        .is_some_and(|class| class.split_ascii_whitespace().any(|t| t == token))
}

/// Heading level (1-6) for `h1`..`h6`, `None` otherwise.
#[must_use]
pub fn heading_level(tag: &str) -> Option<u8> {
    HEADING_TAGS
        .iter()
        .position(|h| h.eq_ignore_ascii_case(tag))
        .and_then(|i| u8::try_from(i + 1).ok())
}

/// Whether any descendant of `node` is a heading element.
#[must_use]
pub fn contains_heading(node: &NodeRef) -> bool {
    node.descendants()
        .iter()
        .filter_map(tag_name)
        .any(|tag| heading_level(&tag).is_some())
}

/// Direct element children of `node`, in document order.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// Direct element children whose tag is one of `tags`.
#[must_use]
pub fn children_named<'a>(node: &NodeRef<'a>, tags: &[&str]) -> Vec<NodeRef<'a>> {
    element_children(node)
        .into_iter()
        .filter(|child| tag_name(child).is_some_and(|t| tags.contains(&t.as_str())))
        .collect()
}

/// Whether `node` or one of its ancestors carries any of the class tokens.
#[must_use]
pub fn self_or_ancestor_has_class(node: &NodeRef, tokens: &[&str]) -> bool {
    let mut current = Some(*node);
    while let Some(n) = current {
        if n.is_element() && tokens.iter().any(|t| has_class_token(&n, t)) {
            return true;
        }
        current = n.parent();
    }
    false
}

// === Text Content ===

/// Get inner HTML (serialized children) of a node.
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> StrTendril {
    Selection::from(*node).inner_html()
}

/// Concatenated descendant text with inferred spacing.
///
/// Adjacent text segments are joined with a single space unless the text
/// gathered so far already ends in whitespace (or the next segment starts with
/// it), so `<span>foo</span><span>bar</span>` yields `"foo bar"`. The result
/// is trimmed.
#[must_use]
pub fn text_content(node: &NodeRef) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        if !descendant.is_text() {
            continue;
        }
        let segment = descendant.text();
        if segment.is_empty() {
            continue;
        }
        let needs_space = !out.is_empty()
            && !out.ends_with(char::is_whitespace)
            && !segment.starts_with(char::is_whitespace);
        if needs_space {
            out.push(' ');
        }
        out.push_str(&segment);
    }
    out.trim().to_string()
}

// === Tree Manipulation ===

/// Detach a node (and its subtree) from its parent.
///
/// Nodes already detached are left alone.
pub fn remove(node: &NodeRef) {
    if node.parent().is_some() {
        node.remove_from_parent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(doc: &'a Document, css: &str) -> NodeRef<'a> {
        doc.select(css).nodes().first().copied().expect("node present")
    }

    #[test]
    fn test_parse_and_attributes() {
        let doc = parse(r#"<div id="main" class="container wide">content</div>"#);
        let div = first(&doc, "div");

        assert_eq!(id(&div), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("container wide".to_string()));
        assert_eq!(tag_name(&div), Some("div".to_string()));
    }

    #[test]
    fn test_has_class_token_is_token_exact() {
        let doc = parse(r#"<div class="navigation  foobar">x</div>"#);
        let div = first(&doc, "div");

        assert!(has_class_token(&div, "navigation"));
        assert!(has_class_token(&div, "foobar"));
        assert!(!has_class_token(&div, "nav"));
        assert!(!has_class_token(&div, "bar"));
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("H6"), Some(6));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("p"), None);
    }

    #[test]
    fn test_text_content_inserts_spaces_between_inline_elements() {
        let doc = parse("<div><span>foo</span><span>bar</span></div>");
        assert_eq!(text_content(&first(&doc, "div")), "foo bar");
    }

    #[test]
    fn test_text_content_keeps_existing_whitespace() {
        let doc = parse("<p>  Hello, <b>world</b>  </p>");
        assert_eq!(text_content(&first(&doc, "p")), "Hello, world");
    }

    #[test]
    fn test_contains_heading_at_any_depth() {
        let doc = parse("<ul><li><div><span><h4>Deep</h4></span></div></li><li>plain</li></ul>");
        let items = doc.select("li");
        let nodes = items.nodes();
        assert!(contains_heading(&nodes[0]));
        assert!(!contains_heading(&nodes[1]));
    }

    #[test]
    fn test_children_named_filters_direct_children() {
        let doc = parse("<ul><li>a</li><!-- c --><li>b</li>text</ul>");
        let ul = first(&doc, "ul");
        assert_eq!(children_named(&ul, &["li"]).len(), 2);
        assert_eq!(element_children(&ul).len(), 2);
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let doc = parse(r#"<div><span class="ad">ad</span><p>content</p></div>"#);
        let span = first(&doc, "span");
        remove(&span);
        remove(&span);

        assert!(doc.select(".ad").is_empty());
        assert!(!inner_html(&first(&doc, "div")).contains("ad"));
    }

    #[test]
    fn test_self_or_ancestor_has_class() {
        let doc = parse(r#"<div class="accordion-title"><h3>Q</h3></div><h3>R</h3>"#);
        let headings = doc.select("h3");
        let nodes = headings.nodes();
        assert!(self_or_ancestor_has_class(&nodes[0], &["accordion-title"]));
        assert!(!self_or_ancestor_has_class(&nodes[1], &["accordion-title"]));
    }
}

//! HTML sanitizing before document building.
//!
//! A lexical pass over raw markup: it removes scripts, styles, comments and
//! embedded media, collapses empty elements, decodes entities and trims.
//! Being pattern based rather than DOM based, it can under- or over-match on
//! deeply nested or malformed tag soup. That is an accepted limitation.

use std::borrow::Cow;

use regex::Captures;

use crate::dom::heading_level;
use crate::patterns::{
    EMPTY_ELEMENT, HTML_COMMENT, IFRAME_BLOCK, NOSCRIPT_BLOCK, SCRIPT_BLOCK, STYLE_BLOCK,
    SVG_BLOCK,
};

/// Clean extracted markup for document building.
///
/// Steps, in order:
/// 1. strip `<script>` and `<style>` blocks
/// 2. strip comments
/// 3. strip `<svg>`, `<noscript>` and `<iframe>` blocks
/// 4. drop elements that contain only whitespace, except `h1`-`h6`
/// 5. decode HTML entities
/// 6. trim
///
/// Step 4 is a single pass: `<div><p></p></div>` becomes `<div></div>`.
///
/// # Example
///
/// ```rust
/// use page2docx::sanitize::sanitize;
///
/// assert_eq!(sanitize("<h1></h1>"), "<h1></h1>");
/// assert_eq!(sanitize("<p></p>"), "");
/// assert_eq!(sanitize("<p>Fish &amp; chips</p>"), "<p>Fish & chips</p>");
/// ```
#[must_use]
pub fn sanitize(html: &str) -> String {
    let html = SCRIPT_BLOCK.replace_all(html, "");
    let html = STYLE_BLOCK.replace_all(&html, "");
    let html = HTML_COMMENT.replace_all(&html, "");
    let html = SVG_BLOCK.replace_all(&html, "");
    let html = NOSCRIPT_BLOCK.replace_all(&html, "");
    let html = IFRAME_BLOCK.replace_all(&html, "");
    let html = collapse_empty_elements(&html);
    let html = html_escape::decode_html_entities(&html);

    html.trim().to_string()
}

/// Remove `<tag ...>   </tag>` pairs whose names match exactly, keeping headings.
fn collapse_empty_elements(html: &str) -> Cow<'_, str> {
    EMPTY_ELEMENT.replace_all(html, |caps: &Captures| {
        let open = &caps[1];
        let close = &caps[2];
        if open != close || heading_level(open).is_some() {
            caps[0].to_string()
        } else {
            String::new()
        }
    })
}

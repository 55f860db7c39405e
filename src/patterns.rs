//! Compiled regex patterns used by the sanitizer and the slug deriver.
//!
//! All patterns are compiled once at first use via `LazyLock`. The sanitizer
//! patterns are applied in the order they are declared here.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Sanitizer Patterns
// =============================================================================

/// `<script>` blocks, non-greedy, case-insensitive, spanning newlines.
pub static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("SCRIPT_BLOCK regex")
});

/// `<style>` blocks.
pub static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("STYLE_BLOCK regex")
});

/// HTML comments.
pub static HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->").expect("HTML_COMMENT regex")
});

/// `<svg>` blocks.
pub static SVG_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<svg\b[^>]*>.*?</svg>").expect("SVG_BLOCK regex")
});

/// `<noscript>` blocks.
pub static NOSCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<noscript\b[^>]*>.*?</noscript>").expect("NOSCRIPT_BLOCK regex")
});

/// `<iframe>` blocks.
pub static IFRAME_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe>").expect("IFRAME_BLOCK regex")
});

/// An opening tag followed only by whitespace and a closing tag.
///
/// The `regex` crate has no backreferences, so both tag names are captured
/// and compared by the caller; a mismatched pair is left untouched.
pub static EMPTY_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(\w+)[^>]*>\s*</(\w+)>").expect("EMPTY_ELEMENT regex")
});

// =============================================================================
// Slug Patterns
// =============================================================================

/// Trailing page extension stripped from slugs.
pub static PAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(html?|php|aspx?)$").expect("PAGE_EXTENSION regex")
});

/// Runs of characters that are not ASCII alphanumerics.
pub static NON_ALPHANUMERIC_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9]+").expect("NON_ALPHANUMERIC_RUN regex")
});

/// Runs of characters not allowed in project directory names.
pub static PROJECT_NAME_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_-]+").expect("PROJECT_NAME_DISALLOWED regex")
});

// =============================================================================
// Text Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex")
});

/// Blank-line paragraph separator used by the plain-text fallback.
pub static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n\s*\n").expect("BLANK_LINE regex")
});

/// Any markup tag, for the plain-text fallback.
pub static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[^>]*>").expect("ANY_TAG regex")
});

//! Configuration options for page conversion.
//!
//! The `Options` struct controls which region of a page is extracted, which
//! subtrees are dropped, where documents are written and how the network
//! collaborator behaves.

use std::path::PathBuf;

/// Browser-like user agent sent with every fetch.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Configuration options for fetching, extraction and document generation.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use page2docx::Options;
///
/// let options = Options {
///     content_selector: Some("entry-content".to_string()),
///     skip_selectors: Some("#sidebar, .share, nav".to_string()),
///     ..Options::default()
/// };
/// assert_eq!(options.timeout_secs, 30);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Class name of the content region to extract.
    ///
    /// The first element carrying this class token becomes the extraction
    /// root. When `None` (or blank), the whole `<body>` is used.
    ///
    /// Default: `None`
    pub content_selector: Option<String>,

    /// Comma-separated selector list of subtrees to remove from the
    /// extracted region (`#id`, `.class`, or a bare name).
    ///
    /// Default: `None`
    pub skip_selectors: Option<String>,

    /// Project name; documents are nested one directory below the output
    /// root under its sanitized form.
    ///
    /// Default: `None`
    pub project: Option<String>,

    /// Directory that receives generated documents.
    ///
    /// Default: `output`
    pub output_root: PathBuf,

    /// Network timeout per fetch, in seconds.
    ///
    /// Default: `30`
    pub timeout_secs: u64,

    /// User agent sent with every fetch.
    ///
    /// Default: [`DEFAULT_USER_AGENT`]
    pub user_agent: String,

    /// Maximum number of URLs processed per batch. Extra URLs are dropped.
    ///
    /// Default: `100`
    pub max_urls: usize,

    /// Maximum element nesting the document builder descends into.
    ///
    /// Deeper markup fails the job for that URL instead of exhausting the stack.
    ///
    /// Default: `512`
    pub max_tree_depth: usize,

    /// Build paragraphs as styled runs (bold, italic, line breaks) instead
    /// of a single flattened run.
    ///
    /// Default: `false`
    pub inline_formatting: bool,

    /// Prepend the page title and meta description to the document.
    ///
    /// Default: `true`
    pub include_meta: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content_selector: None,
            skip_selectors: None,
            project: None,
            output_root: PathBuf::from("output"),
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_urls: 100,
            max_tree_depth: 512,
            inline_formatting: false,
            include_meta: true,
        }
    }
}

impl Options {
    /// Content selector with surrounding whitespace and a leading `.` removed.
    ///
    /// Returns `None` when the configured selector is absent or blank.
    #[must_use]
    pub fn effective_content_selector(&self) -> Option<&str> {
        self.content_selector
            .as_deref()
            .map(str::trim)
            .map(|s| s.strip_prefix('.').unwrap_or(s))
            .filter(|s| !s.is_empty())
    }

    /// Skip selector list, or `None` when absent or blank.
    #[must_use]
    pub fn effective_skip_selectors(&self) -> Option<&str> {
        self.skip_selectors
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert!(opts.content_selector.is_none());
        assert!(opts.skip_selectors.is_none());
        assert!(opts.project.is_none());
        assert_eq!(opts.output_root, PathBuf::from("output"));
        assert_eq!(opts.timeout_secs, 30);
        assert_eq!(opts.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(opts.max_urls, 100);
        assert_eq!(opts.max_tree_depth, 512);
        assert!(!opts.inline_formatting);
        assert!(opts.include_meta);
    }

    #[test]
    fn test_effective_content_selector_trims_dot_and_blank() {
        let opts = Options {
            content_selector: Some("  .main ".to_string()),
            ..Options::default()
        };
        assert_eq!(opts.effective_content_selector(), Some("main"));

        let blank = Options {
            content_selector: Some("   ".to_string()),
            ..Options::default()
        };
        assert_eq!(blank.effective_content_selector(), None);
    }

    #[test]
    fn test_effective_skip_selectors() {
        let opts = Options {
            skip_selectors: Some(" nav, .ad ".to_string()),
            ..Options::default()
        };
        assert_eq!(opts.effective_skip_selectors(), Some("nav, .ad"));
        assert_eq!(Options::default().effective_skip_selectors(), None);
    }
}

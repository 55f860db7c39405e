//! # page2docx
//!
//! Fetch web pages, extract a content region and convert it to Word
//! (`.docx`) documents.
//!
//! The pipeline runs strictly left to right:
//!
//! 1. **Fetch** raw bytes ([`fetch`]) and decode them to UTF-8 ([`encoding`]).
//! 2. **Extract** the content region by class name, dropping excluded
//!    subtrees ([`extract`], [`selector`]).
//! 3. **Sanitize** the markup lexically ([`sanitize`]).
//! 4. **Build** a [`Document`] of headings, paragraphs, list items and tables
//!    ([`builder`]).
//! 5. **Save** it as `<slug>.docx` ([`docx`], [`url_utils`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use page2docx::{convert_html, Block, Options};
//!
//! let html = r#"<html><head><title>Guide</title></head><body>
//! <nav>menu</nav>
//! <div class="content"><h2>Setup</h2><ul><li>Install</li><li>Run</li></ul></div>
//! </body></html>"#;
//!
//! let options = Options {
//!     content_selector: Some("content".to_string()),
//!     ..Options::default()
//! };
//! let doc = convert_html(html, &options)?;
//!
//! assert_eq!(doc.blocks()[0], Block::Title { text: "Guide".into() });
//! assert_eq!(doc.blocks().len(), 4);
//! # Ok::<(), page2docx::Error>(())
//! ```
//!
//! Batches of URLs go through [`run_batch`], which never aborts on a single
//! failing URL and reports one [`JobResult`] per input.

mod error;
mod options;
mod patterns;
mod result;

/// DOM adapter over `dom_query`: parsing, node access, text content.
pub mod dom;

/// Selector grammar (`#id`, `.class`, bare name) and matching.
pub mod selector;

/// Content region extraction and skip-selector removal.
pub mod extract;

/// Lexical markup cleanup before document building.
pub mod sanitize;

/// HTML-to-document tree walk (tag tables, walk state, element handlers).
pub mod builder;

/// Document model: blocks, runs, table rows.
pub mod document;

/// `.docx` writer.
pub mod docx;

/// URL validation, slugs and output paths.
pub mod url_utils;

/// Charset detection and transcoding.
pub mod encoding;

/// Page fetching.
pub mod fetch;

/// Per-URL jobs and batch processing.
pub mod job;

// Public API - re-exports
pub use builder::{build, build_document};
pub use document::{Block, Document, Run, TableCell, TableRow};
pub use error::{Error, ErrorKind, Result};
pub use extract::extract_content;
pub use fetch::{FetchedPage, Fetcher, HttpFetcher};
pub use job::{process_url, run_batch, BatchReport, BatchSummary, JobResult, JobStatus};
pub use options::{Options, DEFAULT_USER_AGENT};
pub use result::ExtractedContent;
pub use sanitize::sanitize;
pub use selector::{Selector, SelectorList};

/// Extract and build a document from an HTML page.
///
/// Uses the content and skip selectors from `options`.
///
/// # Errors
///
/// Returns [`Error::Extraction`] when the content region or body is missing
/// and [`Error::DepthExceeded`] for pathologically nested markup.
pub fn convert_html(html: &str, options: &Options) -> Result<Document> {
    let content = extract_content(
        html,
        options.effective_content_selector(),
        options.effective_skip_selectors(),
    )
    .check()?;
    build_document(&content, options)
}

/// Like [`convert_html`], decoding raw bytes first.
///
/// The charset is taken from a byte-order mark or the page's `<meta>`
/// declaration; UTF-8 otherwise.
pub fn convert_bytes(html: &[u8], options: &Options) -> Result<Document> {
    convert_html(&encoding::decode_page(html, None), options)
}

//! Error types for page2docx.
//!
//! This module defines the error types returned by the fetch, extraction,
//! build and save stages, plus the coarse taxonomy used when reporting jobs.

/// Coarse failure category of an [`Error`].
///
/// Every per-URL failure falls into one of the first four kinds; `Config`
/// is the only kind that aborts a batch before any URL is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or non-http(s) URL, rejected before any network call.
    InvalidUrl,
    /// Network, timeout or DNS failure. No partial HTML is usable.
    FetchFailure,
    /// HTML was fetched but the configured extraction target is absent.
    ExtractionFailure,
    /// Unexpected failure while assembling or saving the document.
    BuildFailure,
    /// Configuration-level problem (e.g. unusable output root).
    Config,
}

/// Error type for page2docx operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL is malformed or does not use http/https.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Fetching the page failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// The extraction target could not be found.
    #[error("{0}")]
    Extraction(String),

    /// The document could not be assembled.
    #[error("Build failed: {0}")]
    Build(String),

    /// The markup nests deeper than the configured bound.
    #[error("Maximum tree depth of {0} exceeded")]
    DepthExceeded(usize),

    /// Filesystem error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The .docx container could not be written.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Maps this error onto the reporting taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Self::Fetch(_) => ErrorKind::FetchFailure,
            Self::Extraction(_) => ErrorKind::ExtractionFailure,
            Self::Build(_) | Self::DepthExceeded(_) | Self::Io(_) | Self::Archive(_) => {
                ErrorKind::BuildFailure
            }
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for page2docx operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Result types for content extraction.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Outcome of extracting the content region from one page.
///
/// Produced once per page and consumed once by the document builder.
/// `meta_title` and `meta_description` are populated even when extraction
/// fails, so callers can still report what page they were looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Whether the content region was found.
    pub success: bool,

    /// Inner markup of the content region, after skip-selector removal.
    pub html: Option<String>,

    /// Trimmed text of the first `<title>`.
    pub meta_title: Option<String>,

    /// Trimmed `content` of `<meta name="description">`.
    pub meta_description: Option<String>,

    /// Why extraction failed (`"Selector not found"`, `"No body content found"`).
    pub error: Option<String>,
}

impl ExtractedContent {
    /// Successful extraction.
    #[must_use]
    pub fn found(html: String, meta_title: Option<String>, meta_description: Option<String>) -> Self {
        Self {
            success: true,
            html: Some(html),
            meta_title,
            meta_description,
            error: None,
        }
    }

    /// Failed extraction carrying whatever metadata was found.
    #[must_use]
    pub fn failed(
        error: impl Into<String>,
        meta_title: Option<String>,
        meta_description: Option<String>,
    ) -> Self {
        Self {
            success: false,
            html: None,
            meta_title,
            meta_description,
            error: Some(error.into()),
        }
    }

    /// Converts a failed extraction into an [`Error::Extraction`].
    pub fn check(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::Extraction(
                self.error.unwrap_or_else(|| "Extraction failed".to_string()),
            ))
        }
    }
}

//! Per-URL jobs and the batch loop.
//!
//! A job takes one URL through validate → fetch → extract → build → save and
//! always ends in a [`JobResult`]; failures never escape the per-URL boundary.
//! The batch runs jobs sequentially in input order and tallies them into a
//! [`BatchSummary`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::builder::build_document;
use crate::docx;
use crate::error::{Error, ErrorKind, Result};
use crate::extract::extract_content;
use crate::fetch::Fetcher;
use crate::url_utils::{output_dir, output_path, slug, validate_url};
use crate::Options;

/// Message of a successful job.
pub const MSG_SUCCESS: &str = "Successfully generated DOCX";
/// Message of a job rejected before fetching.
pub const MSG_INVALID_URL: &str = "Invalid URL format";
/// Message of a job whose fetch failed.
pub const MSG_FETCH_FAILED: &str = "Failed to fetch URL";

/// Outcome category of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Document written.
    Success,
    /// Page fetched but the extraction target was absent; nothing written.
    Warning,
    /// Invalid URL, fetch failure, or build/save failure.
    Error,
}

/// Result of processing one URL. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobResult {
    pub status: JobStatus,
    pub url: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl JobResult {
    fn success(url: &str, path: PathBuf) -> Self {
        Self {
            status: JobStatus::Success,
            url: url.to_string(),
            message: MSG_SUCCESS.to_string(),
            output_path: Some(path),
        }
    }

    fn from_error(url: &str, err: &Error) -> Self {
        let (status, message) = match err.kind() {
            ErrorKind::InvalidUrl => (JobStatus::Error, MSG_INVALID_URL.to_string()),
            ErrorKind::FetchFailure => (JobStatus::Error, MSG_FETCH_FAILED.to_string()),
            ErrorKind::ExtractionFailure => (JobStatus::Warning, format!("Skipped: {err}")),
            ErrorKind::BuildFailure | ErrorKind::Config => {
                (JobStatus::Error, format!("Failed to generate DOCX: {err}"))
            }
        };
        Self {
            status,
            url: url.to_string(),
            message,
            output_path: None,
        }
    }

    /// Whether the job wrote a document.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }
}

/// Process one URL end to end.
///
/// The output directory for the configured project is created if missing.
#[must_use]
pub fn process_url(url: &str, fetcher: &dyn Fetcher, opts: &Options) -> JobResult {
    match convert(url, fetcher, opts) {
        Ok(path) => {
            info!(url, path = %path.display(), "document generated");
            JobResult::success(url, path)
        }
        Err(err) => {
            warn!(url, error = %err, "job failed");
            JobResult::from_error(url, &err)
        }
    }
}

fn convert(url: &str, fetcher: &dyn Fetcher, opts: &Options) -> Result<PathBuf> {
    let parsed = validate_url(url)?;

    let page = fetcher.fetch(&parsed)?;
    let html = page.text();
    debug!(bytes = html.len(), "HTML fetched");

    let content = extract_content(
        &html,
        opts.effective_content_selector(),
        opts.effective_skip_selectors(),
    )
    .check()?;

    let slug = slug(url);
    debug!(slug, "derived slug");

    let document = build_document(&content, opts)?;

    let path = output_path(&opts.output_root, opts.project.as_deref(), &slug);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    docx::save(document, &path)?;
    Ok(path)
}

/// One failed URL in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUrl {
    pub url: String,
    pub message: String,
}

/// Tally of a finished batch.
///
/// Warnings and errors both count as failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub failures: Vec<FailedUrl>,
}

impl BatchSummary {
    /// Tally job results.
    #[must_use]
    pub fn from_results(results: &[JobResult]) -> Self {
        let failures: Vec<FailedUrl> = results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| FailedUrl {
                url: r.url.clone(),
                message: r.message.clone(),
            })
            .collect();

        Self {
            total: results.len(),
            successful: results.len() - failures.len(),
            failed: failures.len(),
            failures,
        }
    }

    /// One-line status, e.g. `Processed 3 URLs: 2 successful, 1 failed`.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Processed {} URLs: {} successful, {} failed",
            self.total, self.successful, self.failed
        )
    }

    /// Render the error log artifact for this batch.
    ///
    /// Every line is prefixed with `[YYYY-mm-dd HH:MM:SS]`. The log has a
    /// header (project, selector, total), one entry per failed URL, a
    /// summary tally and the list of failed URLs.
    #[must_use]
    pub fn render_error_log(&self, opts: &Options, at: NaiveDateTime) -> String {
        let stamp = at.format("%Y-%m-%d %H:%M:%S").to_string();
        let mut out = String::new();
        let mut line = |text: &str| {
            out.push_str(&format!("[{stamp}] {text}\n"));
        };

        line("=== DOCX Generation Error Log ===");
        line(&format!(
            "Project: {}",
            opts.project.as_deref().map(str::trim).filter(|p| !p.is_empty()).unwrap_or("No project")
        ));
        line(&format!(
            "Selector: {}",
            opts.effective_content_selector().unwrap_or("Full body")
        ));
        line(&format!("Total URLs: {}", self.total));
        line("=====================================");

        for failure in &self.failures {
            line(&format!("URL: {}", failure.url));
            line(&format!("Error: {}", failure.message));
        }

        line("=== Summary ===");
        line(&format!("Total URLs: {}", self.total));
        line(&format!("Successful: {}", self.successful));
        line(&format!("Failed: {}", self.failed));
        line("=== Failed URLs List ===");
        for failure in &self.failures {
            line(&failure.url);
        }
        out
    }

    /// Write the error log into `dir` when the batch had failures.
    ///
    /// Returns the log path, or `None` when every URL succeeded.
    pub fn write_error_log(
        &self,
        dir: &Path,
        opts: &Options,
        at: NaiveDateTime,
    ) -> Result<Option<PathBuf>> {
        if self.failed == 0 {
            return Ok(None);
        }
        let path = dir.join(error_log_file_name(at));
        fs::write(&path, self.render_error_log(opts, at))?;
        Ok(Some(path))
    }
}

/// File name of the error log, e.g. `errors_2024-05-01_13-45-00.log`.
#[must_use]
pub fn error_log_file_name(at: NaiveDateTime) -> String {
    format!("errors_{}.log", at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Results of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub results: Vec<JobResult>,
    pub summary: BatchSummary,
    /// Directory the batch wrote into.
    pub output_dir: PathBuf,
    /// URLs dropped because the batch exceeded [`Options::max_urls`].
    pub dropped: usize,
}

/// Process a list of URLs sequentially.
///
/// Blank entries are skipped and the list is capped at
/// [`Options::max_urls`]. Results keep input order; a failing URL never
/// stops the ones after it.
///
/// # Errors
///
/// Returns [`Error::Config`] before any URL is attempted when no URLs remain
/// or the output directory cannot be created.
pub fn run_batch<S: AsRef<str>>(
    urls: &[S],
    fetcher: &dyn Fetcher,
    opts: &Options,
) -> Result<BatchReport> {
    let mut urls: Vec<&str> = urls
        .iter()
        .map(|u| u.as_ref().trim())
        .filter(|u| !u.is_empty())
        .collect();

    if urls.is_empty() {
        return Err(Error::Config("No URLs provided".to_string()));
    }

    let dropped = urls.len().saturating_sub(opts.max_urls);
    if dropped > 0 {
        warn!(
            dropped,
            "Maximum {max} URLs allowed. Only first {max} URLs will be processed.",
            max = opts.max_urls
        );
        urls.truncate(opts.max_urls);
    }

    let dir = output_dir(&opts.output_root, opts.project.as_deref());
    fs::create_dir_all(&dir).map_err(|e| {
        Error::Config(format!("cannot create output directory {}: {e}", dir.display()))
    })?;

    info!(
        project = opts.project.as_deref().unwrap_or("none"),
        selector = opts.effective_content_selector().unwrap_or("none"),
        skip = opts.effective_skip_selectors().unwrap_or("none"),
        urls = urls.len(),
        "starting batch"
    );

    let total = urls.len();
    let results: Vec<JobResult> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| {
            info!("processing URL {}/{total}: {url}", i + 1);
            process_url(url, fetcher, opts)
        })
        .collect();

    let summary = BatchSummary::from_results(&results);
    info!("{}", summary.message());

    Ok(BatchReport {
        results,
        summary,
        output_dir: dir,
        dropped,
    })
}

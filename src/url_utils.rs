//! URL validation and output naming.
//!
//! Source URLs are validated before any network call, then turned into a
//! filesystem-safe slug that names the generated document. Output lands under
//! `<root>[/<project>]/<slug>.docx`.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};
use crate::patterns::{NON_ALPHANUMERIC_RUN, PAGE_EXTENSION, PROJECT_NAME_DISALLOWED};

/// Slug used when nothing usable remains of the URL.
pub const FALLBACK_SLUG: &str = "document";

/// Project directory used when the project name sanitizes to nothing.
pub const FALLBACK_PROJECT: &str = "default";

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 100;

/// Maximum project directory name length in characters.
pub const MAX_PROJECT_LEN: usize = 50;

/// Validate a source URL.
///
/// The trimmed URL must be non-empty, use the `http` or `https` scheme
/// (case-insensitive) and parse with a host.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] carrying the rejected input.
pub fn validate_url(url_str: &str) -> Result<Url> {
    let trimmed = url_str.trim();
    let invalid = || Error::InvalidUrl(trimmed.to_string());

    if trimmed.is_empty() {
        return Err(invalid());
    }

    let scheme_ok = trimmed
        .split_once("://")
        .is_some_and(|(scheme, _)| scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"));
    if !scheme_ok {
        return Err(invalid());
    }

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    Ok(url)
}

/// Derive a filesystem-safe slug from a URL.
///
/// Takes the last non-empty path segment (or the host when the path is
/// empty), strips a trailing `.html`/`.htm`/`.php`/`.asp`/`.aspx`, replaces
/// runs of non-alphanumerics with `-`, trims hyphens, lowercases and
/// truncates to 100 characters. Input that does not parse as an absolute URL
/// is treated as a bare path, so `slug` is idempotent on its own output.
///
/// # Examples
///
/// ```
/// use page2docx::url_utils::slug;
///
/// assert_eq!(slug("https://example.com/abc/xyz/efg"), "efg");
/// assert_eq!(slug("https://example.com/page.html"), "page");
/// assert_eq!(slug("https://example.com/"), "example-com");
/// assert_eq!(slug(""), "document");
/// ```
#[must_use]
pub fn slug(url_str: &str) -> String {
    let (path, host) = match Url::parse(url_str.trim()) {
        Ok(url) => (url.path().to_string(), url.host_str().map(ToString::to_string)),
        Err(_) => (bare_path(url_str).to_string(), None),
    };

    let base = last_segment(&path)
        .map(ToString::to_string)
        .or(host)
        .unwrap_or_else(|| FALLBACK_SLUG.to_string());

    let base = PAGE_EXTENSION.replace(&base, "");
    let hyphenated = NON_ALPHANUMERIC_RUN.replace_all(&base, "-");
    let mut slug = hyphenated.trim_matches('-').to_ascii_lowercase();
    slug.truncate(MAX_SLUG_LEN);
    let trimmed_len = slug.trim_end_matches('-').len();
    slug.truncate(trimmed_len);

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Sanitize a project name for use as a directory name.
///
/// Runs of characters outside `[A-Za-z0-9_-]` become `-`, hyphens are
/// trimmed, the result is lowercased and truncated to 50 characters.
#[must_use]
pub fn sanitize_project_name(project: &str) -> String {
    let replaced = PROJECT_NAME_DISALLOWED.replace_all(project, "-");
    let mut name = replaced.trim_matches('-').to_ascii_lowercase();
    name.truncate(MAX_PROJECT_LEN);
    let trimmed_len = name.trim_end_matches('-').len();
    name.truncate(trimmed_len);

    if name.is_empty() {
        FALLBACK_PROJECT.to_string()
    } else {
        name
    }
}

/// Directory documents are written to: the root, or one project level below.
///
/// A blank project name means no project directory.
#[must_use]
pub fn output_dir(root: &Path, project: Option<&str>) -> PathBuf {
    match project.map(str::trim).filter(|p| !p.is_empty()) {
        Some(project) => root.join(sanitize_project_name(project)),
        None => root.to_path_buf(),
    }
}

/// Full path of the document generated for `slug`.
#[must_use]
pub fn output_path(root: &Path, project: Option<&str>, slug: &str) -> PathBuf {
    output_dir(root, project).join(format!("{slug}.docx"))
}

/// Path part of a string that is not an absolute URL.
fn bare_path(s: &str) -> &str {
    let s = s.trim();
    let end = s.find(['?', '#']).unwrap_or(s.len());
    &s[..end]
}

/// Last non-empty `/`-separated segment of a path.
fn last_segment(path: &str) -> Option<&str> {
    path.trim_end_matches('/')
        .rsplit('/')
        .find(|segment| !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("https://example.com/path").is_ok());
        assert!(validate_url("  HTTP://example.com  ").is_ok());
    }

    #[test]
    fn test_validate_url_rejects() {
        for bad in ["", "   ", "example.com", "ftp://example.com/x", "https://", "javascript:alert(1)"] {
            assert!(
                matches!(validate_url(bad), Err(Error::InvalidUrl(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_slug_last_segment() {
        assert_eq!(slug("https://example.com/abc/xyz/efg"), "efg");
        assert_eq!(slug("https://example.com/abc/xyz/efg/"), "efg");
        assert_eq!(slug("https://example.com/a//b//"), "b");
    }

    #[test]
    fn test_slug_strips_page_extension() {
        assert_eq!(slug("https://example.com/page.html"), "page");
        assert_eq!(slug("https://example.com/Index.PHP?x=1"), "index");
        assert_eq!(slug("https://example.com/default.aspx"), "default");
        assert_eq!(slug("https://example.com/archive.tar.gz"), "archive-tar-gz");
    }

    #[test]
    fn test_slug_host_fallback() {
        assert_eq!(slug("https://example.com/"), "example-com");
        assert_eq!(slug("https://Sub.Example.com"), "sub-example-com");
    }

    #[test]
    fn test_slug_never_empty() {
        assert_eq!(slug(""), "document");
        assert_eq!(slug("https://example.com/---/"), "document");
        assert_eq!(slug("https://example.com/.html"), "document");
    }

    #[test]
    fn test_slug_properties() {
        let long = format!("https://example.com/{}", "Ab_".repeat(80));
        let cut_on_hyphen = format!("https://example.com/{}-tail", "a".repeat(99));
        for url in [
            "https://example.com/abc/xyz/efg",
            "https://example.com/Hello World!.htm",
            "https://example.com/caf%C3%A9?q=1#top",
            long.as_str(),
            cut_on_hyphen.as_str(),
        ] {
            let s = slug(url);
            assert!(!s.is_empty());
            assert!(s.len() <= MAX_SLUG_LEN);
            assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            assert!(!s.starts_with('-') && !s.ends_with('-'));
            assert_eq!(slug(url), s);
            assert_eq!(slug(&s), s);
        }
    }

    #[test]
    fn test_sanitize_project_name() {
        assert_eq!(sanitize_project_name("My Project!"), "my-project");
        assert_eq!(sanitize_project_name("client_a-2024"), "client_a-2024");
        assert_eq!(sanitize_project_name("../../etc"), "etc");
        assert_eq!(sanitize_project_name("!!!"), "default");
        assert_eq!(sanitize_project_name(&"x".repeat(80)).len(), MAX_PROJECT_LEN);
        assert_eq!(sanitize_project_name(&format!("{} y", "x".repeat(49))), "x".repeat(49));
    }

    #[test]
    fn test_output_path_layout() {
        let root = Path::new("output");
        assert_eq!(output_path(root, None, "efg"), Path::new("output/efg.docx"));
        assert_eq!(output_path(root, Some("  "), "efg"), Path::new("output/efg.docx"));
        assert_eq!(
            output_path(root, Some("Acme Corp"), "efg"),
            Path::new("output/acme-corp/efg.docx")
        );
    }
}

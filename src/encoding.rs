//! Charset detection and transcoding of fetched pages.
//!
//! Fetched bytes are decoded to UTF-8 before parsing. The charset comes from,
//! in order: a byte-order mark, the `Content-Type` response header, a
//! `<meta charset>` or `http-equiv` declaration in the first 1024 bytes.
//! UTF-8 is the default, decoded lossily.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Bytes of the document searched for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("valid regex")
});

/// `charset=` parameter of a Content-Type value.
#[allow(clippy::expect_used)]
static CHARSET_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Pick the encoding of a page.
///
/// `content_type` is the raw `Content-Type` header value, if the response had
/// one. Unknown labels are ignored.
#[must_use]
pub fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let from_header = content_type
        .and_then(|ct| charset_label(&CHARSET_PARAM, ct))
        .and_then(|label| Encoding::for_label(label.as_bytes()));
    if let Some(encoding) = from_header {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_LEN)]);
    charset_label(&META_CHARSET, &head)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD; decoding never fails.
///
/// # Examples
///
/// ```
/// use page2docx::encoding::decode_page;
///
/// let latin1 = b"<meta charset=\"iso-8859-1\"><p>caf\xe9</p>";
/// assert!(decode_page(latin1, None).contains("caf\u{e9}"));
/// ```
#[must_use]
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(bytes, content_type);
    let (decoded, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = used.name(), "replaced invalid byte sequences");
    }
    decoded.into_owned()
}

fn charset_label(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{SHIFT_JIS, UTF_16LE, WINDOWS_1252};

    #[test]
    fn test_default_is_utf8() {
        assert_eq!(detect_encoding(b"<html><body>x</body></html>", None), UTF_8);
    }

    #[test]
    fn test_meta_charset() {
        let html = br#"<html><head><meta charset="Shift_JIS"></head></html>"#;
        assert_eq!(detect_encoding(html, None), SHIFT_JIS);
    }

    #[test]
    fn test_http_equiv_declaration() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=windows-1252">"#;
        assert_eq!(detect_encoding(html, None), WINDOWS_1252);
    }

    #[test]
    fn test_header_wins_over_meta() {
        let html = br#"<meta charset="shift_jis">"#;
        assert_eq!(
            detect_encoding(html, Some("text/html; charset=\"windows-1252\"")),
            WINDOWS_1252
        );
    }

    #[test]
    fn test_bom_wins() {
        let bytes = [0xFF, 0xFE, b'x', 0x00];
        assert_eq!(detect_encoding(&bytes, Some("text/html; charset=utf-8")), UTF_16LE);
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let html = br#"<meta charset="klingon">"#;
        assert_eq!(detect_encoding(html, Some("text/html; charset=bogus")), UTF_8);
    }

    #[test]
    fn test_declaration_past_sniff_window_ignored() {
        let mut html = vec![b' '; SNIFF_LEN];
        html.extend_from_slice(br#"<meta charset="shift_jis">"#);
        assert_eq!(detect_encoding(&html, None), UTF_8);
    }

    #[test]
    fn test_decode_windows_1252() {
        let bytes = b"<meta charset=windows-1252><p>\x93quoted\x94</p>";
        let decoded = decode_page(bytes, None);
        assert!(decoded.contains("\u{201c}quoted\u{201d}"));
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let decoded = decode_page(b"ok \xff\xfe done", Some("text/html"));
        assert!(decoded.starts_with("ok "));
        assert!(decoded.contains('\u{fffd}'));
    }
}

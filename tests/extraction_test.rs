use page2docx::extract::{NO_BODY_CONTENT, SELECTOR_NOT_FOUND};
use page2docx::{extract_content, Error, ExtractedContent};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>  Product Guide </title>
  <meta name="description" content="How to use the product">
</head>
<body>
  <header class="site-header">Header</header>
  <div class="main">
    <h1>Guide</h1>
    <p>First paragraph.</p>
    <div class="share">Share this</div>
    <p id="promo">Buy now</p>
    <p>Last paragraph.</p>
  </div>
  <footer>Footer</footer>
</body>
</html>"#;

#[test]
fn class_selector_extracts_inner_markup() {
    let html = r#"<html><body><div class="main">hi</div></body></html>"#;
    let result = extract_content(html, Some(".main"), None);
    assert!(result.success);
    assert!(result.html.as_deref().is_some_and(|h| h.contains("hi")));
    assert_eq!(result.error, None);
}

#[test]
fn missing_selector_reports_selector_not_found_with_metadata() {
    let result = extract_content(PAGE, Some("content"), None);
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some(SELECTOR_NOT_FOUND));
    assert_eq!(result.html, None);
    assert_eq!(result.meta_title.as_deref(), Some("Product Guide"));
    assert_eq!(result.meta_description.as_deref(), Some("How to use the product"));
}

#[test]
fn first_match_in_document_order_wins() {
    let html = r#"<body><section class="main">one</section><div class="main">two</div></body>"#;
    let result = extract_content(html, Some("main"), None);
    assert_eq!(result.html.as_deref(), Some("one"));
}

#[test]
fn no_selector_uses_the_whole_body() {
    let result = extract_content(PAGE, None, None);
    let html = result.html.expect("body markup");
    assert!(html.contains("Header"));
    assert!(html.contains("Footer"));
}

#[test]
fn blank_selector_is_treated_as_absent() {
    let result = extract_content(PAGE, Some("   "), Some(""));
    assert!(result.success);
    assert!(result.html.is_some_and(|h| h.contains("Header")));
}

#[test]
fn empty_body_reports_no_body_content() {
    let result = extract_content("<html><head><title>T</title></head><body>  </body></html>", None, None);
    assert_eq!(result.error.as_deref(), Some(NO_BODY_CONTENT));
    assert_eq!(result.meta_title.as_deref(), Some("T"));
}

#[test]
fn page_without_body_tag_reports_no_body_content() {
    let page = r#"<html><head><title>T</title><meta name="description" content="D"></head></html>"#;
    let result = extract_content(page, None, None);
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some(NO_BODY_CONTENT));
    assert_eq!(result.meta_title.as_deref(), Some("T"));
    assert_eq!(result.meta_description.as_deref(), Some("D"));
}

#[test]
fn bare_text_without_body_tag_is_body_content() {
    let result = extract_content("just some text", None, None);
    assert!(result.success);
    assert_eq!(result.html.as_deref(), Some("just some text"));
}

#[test]
fn skip_selectors_remove_subtrees_and_keep_the_rest_verbatim() {
    let result = extract_content(PAGE, Some("main"), Some(".share, #promo"));
    let html = result.html.expect("content");

    assert!(!html.contains("Share this"));
    assert!(!html.contains("Buy now"));
    assert!(html.contains("<h1>Guide</h1>\n    <p>First paragraph.</p>"));
    assert!(html.contains("<p>Last paragraph.</p>"));
}

#[test]
fn skip_selector_matching_nothing_is_a_no_op() {
    let with = extract_content(PAGE, Some("main"), Some("#does-not-exist"));
    let without = extract_content(PAGE, Some("main"), None);
    assert_eq!(with.html, without.html);
}

#[test]
fn bare_skip_selector_matches_tags() {
    let result = extract_content(PAGE, None, Some("header, footer"));
    let html = result.html.expect("body");
    assert!(!html.contains("Header"));
    assert!(!html.contains("Footer"));
    assert!(html.contains("First paragraph."));
}

#[test]
fn malformed_markup_still_extracts() {
    let html = r#"<div class="main"><p>open <b>bold <i>both</div><p>after"#;
    let result = extract_content(html, Some("main"), None);
    assert!(result.success);
    assert!(result.html.is_some_and(|h| h.contains("open")));
}

#[test]
fn check_turns_failure_into_extraction_error() {
    let failed = ExtractedContent::failed(SELECTOR_NOT_FOUND, None, None);
    match failed.check() {
        Err(Error::Extraction(msg)) => assert_eq!(msg, SELECTOR_NOT_FOUND),
        other => panic!("expected Err(Extraction), got {other:?}"),
    }
}

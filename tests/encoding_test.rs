use page2docx::{convert_bytes, Block, FetchedPage, Options};

#[test]
fn latin1_page_with_meta_charset_decodes() {
    let bytes = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xe9</title></head>\
<body><p>Cr\xe8me br\xfbl\xe9e</p></body></html>";

    let doc = convert_bytes(bytes, &Options::default()).expect("convert");
    assert_eq!(doc.blocks()[0], Block::Title { text: "Caf\u{e9}".into() });
    assert_eq!(doc.blocks()[1].plain_text(), "Cr\u{e8}me br\u{fb}l\u{e9}e");
}

#[test]
fn utf8_page_without_declaration_decodes() {
    let html = "<p>na\u{ef}ve \u{2014} \u{65e5}\u{672c}</p>";
    let doc = convert_bytes(html.as_bytes(), &Options::default()).expect("convert");
    assert_eq!(doc.blocks()[0].plain_text(), "na\u{ef}ve \u{2014} \u{65e5}\u{672c}");
}

#[test]
fn response_header_charset_is_honoured() {
    let page = FetchedPage {
        body: b"<p>\x93smart quotes\x94</p>".to_vec(),
        content_type: Some("text/html; charset=windows-1252".to_string()),
    };
    assert_eq!(page.text(), "<p>\u{201c}smart quotes\u{201d}</p>");
}

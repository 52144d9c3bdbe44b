use rs_readability::{is_probably_readerable, ReaderableOptions};

const PARAGRAPH: &str = "The river authority published its flood report on Thursday, describing in \
    detail how the new embankments held back the water during the worst storm in a generation.";

fn readerable(html: &str) -> bool {
    is_probably_readerable(html, &ReaderableOptions::default())
}

#[test]
fn article_with_long_paragraphs_is_readerable() {
    let html = format!("<html><body><article><p>{PARAGRAPH}</p><p>{PARAGRAPH}</p><p>{PARAGRAPH}</p></article></body></html>");
    assert!(readerable(&html));
}

#[test]
fn link_list_is_not_readerable() {
    let html = "<html><body><ul><li><a href=\"/a\">Alpha</a></li><li><a href=\"/b\">Beta</a></li></ul></body></html>";
    assert!(!readerable(html));
}

#[test]
fn empty_document_is_not_readerable() {
    assert!(!readerable(""));
    assert!(!readerable("<html><body></body></html>"));
}

#[test]
fn hidden_paragraphs_do_not_count() {
    let html = format!(
        "<html><body><p hidden>{PARAGRAPH}</p><p style=\"display: none\">{PARAGRAPH}</p>\
         <p aria-hidden=\"true\">{PARAGRAPH}</p></body></html>"
    );
    assert!(!readerable(&html));
}

#[test]
fn unlikely_containers_do_not_count() {
    let html = format!(
        "<html><body><p class=\"sidebar\">{PARAGRAPH}</p><p id=\"comment-1\">{PARAGRAPH}</p>\
         <p class=\"footer\">{PARAGRAPH}</p></body></html>"
    );
    assert!(!readerable(&html));
}

#[test]
fn br_separated_div_text_counts() {
    let html = format!("<html><body><div>{PARAGRAPH}<br>{PARAGRAPH}<br>{PARAGRAPH}<br>{PARAGRAPH}</div></body></html>");
    assert!(readerable(&html));
}

#[test]
fn thresholds_are_configurable() {
    let html = format!("<html><body><p>{PARAGRAPH}</p></body></html>");
    assert!(!readerable(&html));

    let lenient = ReaderableOptions { min_content_length: 20, min_score: 5.0 };
    assert!(is_probably_readerable(&html, &lenient));
}

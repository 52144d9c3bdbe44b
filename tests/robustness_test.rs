use rs_readability::{parse, parse_bytes, parse_with_options, ErrorKind, Options};
use std::time::{Duration, Instant};

const SENTENCE: &str = "The bakery on the corner has sold bread since the war, and regulars, \
    new neighbours and passing cyclists still queue for it every morning. ";

#[test]
fn parse_does_not_panic_on_malformed_html_unclosed_tags() {
    let html = "<p>text<div>more";
    match parse(html) {
        Ok(article) => {
            assert!(article.text_content.contains("text"));
            assert!(article.text_content.contains("more"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn parse_does_not_panic_on_malformed_html_invalid_nesting() {
    let result = parse("<p><div></p></div>");
    assert!(matches!(result, Ok(_)) || matches!(result, Err(ref e) if e.kind() == ErrorKind::Extraction));
}

#[test]
fn parse_does_not_panic_on_broken_attributes() {
    let result = parse("<div class=\"test id=broken>");
    assert!(matches!(result, Ok(_)) || matches!(result, Err(ref e) if e.kind() == ErrorKind::Extraction));
}

#[test]
fn parse_handles_incomplete_entities() {
    match parse("&amp text &lt;") {
        Ok(article) => assert!(article.text_content.contains("text <")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn empty_and_whitespace_input_is_a_validation_error() {
    for html in ["", "   \n\t  "] {
        match parse(html) {
            Err(err) => assert_eq!(err.kind(), ErrorKind::Validation),
            Ok(_) => panic!("expected a validation error for {html:?}"),
        }
    }
}

#[test]
fn document_without_content_is_an_extraction_error() {
    for html in ["<html></html>", "<body></body>"] {
        match parse(html) {
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::Extraction);
                assert!(!err.is_recoverable());
            }
            Ok(_) => panic!("expected an extraction error for {html:?}"),
        }
    }
}

#[test]
fn binary_bytes_are_a_parse_error() {
    let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d];
    match parse_bytes(&bytes) {
        Err(err) => assert_eq!(err.kind(), ErrorKind::Parse),
        Ok(_) => panic!("expected a parse error"),
    }
}

#[test]
fn invalid_url_option_is_a_warning() {
    let html = format!("<html><body><article><p>{0}</p><p>{0}</p></article></body></html>", SENTENCE.repeat(3));
    let options = Options { url: Some("not a url".to_string()), ..Options::default() };

    match parse_with_options(&html, &options) {
        Ok(article) => {
            assert!(article.text_content.contains("The bakery"));
            assert_eq!(article.warnings.len(), 1);
            assert!(article.warnings[0].contains("not a url"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn deeply_nested_markup_does_not_overflow() {
    let depth = 200;
    let mut html = String::from("<html><body>");
    html.push_str(&"<div>".repeat(depth));
    html.push_str(&format!("<p>{}</p>", SENTENCE.repeat(5)));
    html.push_str(&"</div>".repeat(depth));
    html.push_str("</body></html>");

    match parse(&html) {
        Ok(article) => assert!(article.text_content.contains("The bakery")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn unicode_text_is_preserved() {
    let html = format!(
        "<html><body><article><p>Smørrebrød, café au lait, 東京の朝市, and Ελληνικά. {0}</p><p>{0}</p></article></body></html>",
        SENTENCE.repeat(2)
    );

    match parse(&html) {
        Ok(article) => {
            assert!(article.text_content.contains("Smørrebrød"));
            assert!(article.text_content.contains("東京の朝市"));
            assert_eq!(article.length, article.text_content.chars().count());
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn parse_handles_large_html_without_panic() {
    let target_size = 512 * 1024;
    let chunk = format!("<p>{SENTENCE}</p>");
    let mut html = String::with_capacity(target_size + 128);
    html.push_str("<html><body><article>");
    while html.len() < target_size {
        html.push_str(&chunk);
    }
    html.push_str("</article></body></html>");

    let start = Instant::now();
    let result = parse(&html);
    let elapsed = start.elapsed();

    assert!(result.is_ok());
    assert!(elapsed < Duration::from_secs(60), "large HTML parsing took {elapsed:?}");
}

#[test]
fn scripts_and_styles_never_reach_the_output() {
    let html = format!(
        r#"<html><head><style>p {{ color: red }}</style></head><body>
        <script>alert('xss')</script>
        <article><p>{0}</p><script>track()</script><p>{0}</p></article>
        </body></html>"#,
        SENTENCE.repeat(3)
    );

    match parse(&html) {
        Ok(article) => {
            assert!(!article.content.contains("<script"));
            assert!(!article.text_content.contains("alert"));
            assert!(!article.text_content.contains("color: red"));
            assert!(article.text_content.contains("The bakery"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn null_bytes_in_text_input_do_not_panic() {
    let result = parse("<p>text\x00more</p>");
    assert!(result.is_ok());
}

//! Retry controller.
//!
//! Runs scoring, assembly and cleaning up to four times. Each attempt that
//! yields less than `char_threshold` characters restores the body from a
//! cached serialization and clears the next heuristic flag. When every flag
//! is cleared and the text is still short, the longest attempt is kept. A
//! body whose whole text is below the threshold is returned as it is.

use dom_query::{Document, NodeRef};

use super::builder::build_article;
use super::cleaner::prep_article;
use super::scoring::score_document;
use super::state::Flags;
use crate::dom;
use crate::error::{Error, Result};
use crate::text::char_len;
use crate::Options;

/// `id` of the wrapper around the extracted content.
pub const PAGE_ID: &str = "readability-page-1";

/// `class` of the wrapper around the extracted content.
pub const PAGE_CLASS: &str = "page";

/// Outcome of the retry loop.
#[derive(Debug, Clone)]
pub struct Extraction<'a> {
    /// Detached `div` holding the page wrapper.
    pub content: NodeRef<'a>,
    /// Byline element text found during scoring.
    pub byline: Option<String>,
    /// Text direction near the content root.
    pub dir: Option<String>,
    /// Text length measured after each attempt.
    pub attempts: Vec<usize>,
    /// The body was returned as it is, without cleaning.
    pub fallback: bool,
}

fn mark_page(node: &NodeRef) {
    node.set_attr("id", PAGE_ID);
    node.set_attr("class", PAGE_CLASS);
}

/// Wrap the children of `content` in the page `div`.
fn wrap_page(content: &NodeRef) {
    let page = dom::create_element(content, "div");
    mark_page(&page);
    dom::move_children(content, &page);
    content.append_child(&page);
}

/// Extract the article content of `doc`.
///
/// `title` is the resolved article title, used to skip a heading that
/// repeats it. The document must already be normalized.
///
/// # Errors
///
/// `Validation` when the document has no body, `Extraction` when the body
/// holds nothing at all.
pub fn grab_article<'a>(doc: &'a Document, title: &str, options: &Options) -> Result<Extraction<'a>> {
    let Some(body) = dom::select_first(doc, "body") else {
        return Err(Error::validation("document has no body"));
    };
    let root = dom::select_first(doc, "html").unwrap_or(body);
    let cached_body = body.inner_html().to_string();

    let mut flags = Flags::all();
    let mut byline: Option<String> = None;
    let mut attempts = Vec::with_capacity(Flags::RELAXATION_ORDER.len() + 1);
    let mut longest: Option<(usize, NodeRef<'a>, Option<String>)> = None;

    for attempt in 0..=Flags::RELAXATION_ORDER.len() {
        let mut scored = score_document(&root, title, flags);
        byline = byline.or(scored.byline.take());

        let built = build_article(&body, &mut scored.candidates, options.nb_top_candidates, flags);
        prep_article(&built.content, options, flags);

        if built.created_top {
            mark_page(&built.top_candidate);
        } else {
            wrap_page(&built.content);
        }

        let length = char_len(&dom::inner_text(&built.content, true));
        attempts.push(length);
        tracing::debug!(attempt, flags = ?flags, length, "extraction attempt");

        if length >= options.char_threshold {
            return Ok(Extraction { content: built.content, byline, dir: built.dir, attempts, fallback: false });
        }
        // Earlier contents are detached, so restoring the body keeps them
        if longest.as_ref().is_none_or(|(best, _, _)| length > *best) {
            longest = Some((length, built.content, built.dir));
        }

        dom::set_inner_html(&body, &cached_body);
        if let Some(flag) = Flags::RELAXATION_ORDER.get(attempt) {
            flags.remove(*flag);
        }
    }

    if dom::element_children(&body).is_empty() && dom::inner_text(&body, true).is_empty() {
        return Err(Error::extraction("document body is empty"));
    }

    let body_length = char_len(&dom::inner_text(&body, true));
    if body_length >= options.char_threshold {
        if let Some((length, content, dir)) = longest.filter(|(length, _, _)| *length > 0) {
            tracing::debug!(attempts = ?attempts, length, "all attempts short, keeping the longest");
            return Ok(Extraction { content, byline, dir, attempts, fallback: false });
        }
    }

    tracing::debug!(attempts = ?attempts, body_length, "all attempts short, falling back to body");

    let content = dom::create_element(&body, "div");
    dom::move_children(&body, &content);
    wrap_page(&content);
    let dir = [body, root].iter().find_map(|node| dom::attr(node, "dir"));

    Ok(Extraction { content, byline, dir, attempts, fallback: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::error::ErrorKind;

    const SENTENCE: &str = "Residents gathered outside the town hall on Friday, waiting for news, \
        while volunteers handed out tea and blankets to anyone who needed them. ";

    fn grab(html: &str, options: &Options) -> Result<(String, Vec<usize>, bool)> {
        let doc = parse(html);
        grab_article(&doc, "", options).map(|e| (e.content.html().to_string(), e.attempts, e.fallback))
    }

    fn summary(html: &str) -> (String, Vec<usize>, bool) {
        match grab(html, &Options::default()) {
            Ok(summary) => summary,
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_first_attempt_succeeds() {
        let html = format!(
            "<html><body><div id=\"story\"><p>{0}</p><p>{0}</p><p>{0}</p><p>{0}</p></div>\
             <footer>site footer</footer></body></html>",
            SENTENCE.repeat(2)
        );
        let (content, attempts, fallback) = summary(&html);
        assert_eq!(attempts.len(), 1);
        assert!(!fallback);
        assert!(content.contains(PAGE_ID));
        assert!(!content.contains("site footer"));
    }

    #[test]
    fn test_short_document_falls_back_to_body() {
        let html = "<html><body><div class=\"sidebar\"><p>Just a short note.</p></div></body></html>";
        let (content, attempts, fallback) = summary(html);
        assert_eq!(attempts.len(), 4);
        assert!(fallback);
        assert!(content.contains("Just a short note."));
        assert!(content.contains(r#"class="sidebar""#));
    }

    #[test]
    fn test_relaxed_attempt_recovers_unlikely_content() {
        let html = format!(
            "<html><body><div class=\"sidebar\"><p>{0}</p><p>{0}</p><p>{0}</p><p>{0}</p></div></body></html>",
            SENTENCE.repeat(2)
        );
        let (content, attempts, fallback) = summary(&html);
        assert!(!fallback);
        assert!(attempts.len() >= 2);
        assert!(attempts.windows(2).all(|w| w[0] <= w[1]));
        assert!(content.contains("Residents gathered"));
    }

    #[test]
    fn test_longest_attempt_kept_when_relaxing_shrinks_content() {
        let notice = "<p>The tide tables for the northern harbour were printed in the parish newsletter today.</p>";
        let letters = "<p>a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p, q, r, s, t, u</p>";
        let html = format!(
            "<html><body><main><section><div id=\"a\">{}</div><div class=\"disqus\">{}</div></section></main></body></html>",
            notice.repeat(5),
            letters.repeat(5)
        );
        let (content, attempts, fallback) = summary(&html);
        assert!(!fallback);
        assert_eq!(attempts.len(), 4);
        assert!(attempts[1] < attempts[0]);
        assert!(content.contains("northern harbour"));
        assert!(!content.contains("a, b, c"));
    }

    #[test]
    fn test_fallback_keeps_body_markup() {
        let body = r#"<div class="sidebar" data-x="1"><p>Just a short note.</p></div><div><div><span>nested</span></div></div>"#;
        let doc = parse(&format!("<html><body>{body}</body></html>"));
        match grab_article(&doc, "", &Options::default()) {
            Ok(extraction) => {
                assert!(extraction.fallback);
                assert_eq!(
                    extraction.content.inner_html().to_string(),
                    format!(r#"<div id="{PAGE_ID}" class="{PAGE_CLASS}">{body}</div>"#)
                );
            }
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn test_empty_body_is_an_extraction_error() {
        match grab("<html><body></body></html>", &Options::default()) {
            Err(err) => assert_eq!(err.kind(), ErrorKind::Extraction),
            Ok(_) => panic!("expected an extraction error"),
        }
    }
}

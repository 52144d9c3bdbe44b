//! Link density and text density.
//!
//! Both ratios are measured on normalized inner text in characters. Links
//! whose `href` is a bare fragment (`#section`) stay inside the page, so their
//! text only counts for 30% of its length.

use dom_query::NodeRef;

use crate::dom;
use crate::patterns::{HASH_URL, IMPORTANT_LINK};

/// Weight of page-internal (`#fragment`) link text.
pub const HASH_LINK_COEFFICIENT: f64 = 0.3;

/// Share of `node`'s text that sits inside links, in `[0, 1]`.
///
/// Returns `0.0` for nodes without text.
#[must_use]
pub fn link_density(node: &NodeRef) -> f64 {
    let text_length = dom::text_len(node);
    if text_length == 0 {
        return 0.0;
    }

    let link_length: f64 = dom::elements_by_tags(node, &["a"])
        .iter()
        .map(|link| {
            let coefficient = match link.attr("href") {
                Some(href) if HASH_URL.is_match(&href) => HASH_LINK_COEFFICIENT,
                _ => 1.0,
            };
            dom::text_len(link) as f64 * coefficient
        })
        .sum();

    link_length / text_length as f64
}

/// Share of `node`'s text that sits inside descendants tagged with one of `tags`.
#[must_use]
pub fn text_density(node: &NodeRef, tags: &[&str]) -> f64 {
    let text_length = dom::text_len(node);
    if text_length == 0 {
        return 0.0;
    }
    let children_length: usize = dom::elements_by_tags(node, tags).iter().map(dom::text_len).sum();
    children_length as f64 / text_length as f64
}

/// Whether `node` holds a link whose text reads like "read more".
#[must_use]
pub fn has_important_link(node: &NodeRef) -> bool {
    dom::elements_by_tags(node, &["a"])
        .iter()
        .any(|link| IMPORTANT_LINK.is_match(&dom::inner_text(link, true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, select_first};

    fn density(html: &str, css: &str) -> f64 {
        let doc = parse(html);
        select_first(&doc, css).map_or(f64::NAN, |n| link_density(&n))
    }

    #[test]
    fn test_hash_links_weighted() {
        // "Text hash" is 9 chars, "hash" is 4 chars at 0.3
        let ld = density(r##"<p>Text <a href="#x">hash</a></p>"##, "p");
        assert!((ld - 4.0 * 0.3 / 9.0).abs() < 1e-9, "got {ld}");
    }

    #[test]
    fn test_external_links_full_weight() {
        let ld = density(r#"<p>Text <a href="/x">link</a></p>"#, "p");
        assert!((ld - 4.0 / 9.0).abs() < 1e-9, "got {ld}");
    }

    #[test]
    fn test_no_text_no_density() {
        assert!(density("<div><a href='/x'></a></div>", "div").abs() < f64::EPSILON);
        assert!(density("<p>plain paragraph</p>", "p").abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_link_text() {
        let ld = density(r#"<ul><li><a href="/a">one</a></li><li><a href="/b">two</a></li></ul>"#, "ul");
        assert!((ld - 1.0).abs() < 1e-9, "got {ld}");
    }

    #[test]
    fn test_text_density_of_headings() {
        let doc = parse("<div><h2>Head</h2><p>body text</p></div>");
        let div = select_first(&doc, "div");
        let td = div.map_or(f64::NAN, |n| text_density(&n, &["h2"]));
        assert!(td > 0.0 && td < 1.0, "got {td}");
    }

    #[test]
    fn test_important_link_detection() {
        let doc = parse(r#"<div><a href="/full">Read more</a></div><section><a href="/">Home</a></section>"#);
        assert!(select_first(&doc, "div").is_some_and(|n| has_important_link(&n)));
        assert!(!select_first(&doc, "section").is_some_and(|n| has_important_link(&n)));
    }
}

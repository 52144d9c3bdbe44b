//! Tag constants and catalogs used by the extraction passes.
//!
//! Lists are kept both as arrays (for iteration and selector building) and as
//! `HashSet`s (for O(1) lookup in per-node checks).

use std::collections::HashSet;
use std::sync::LazyLock;

use dom_query::NodeRef;

use crate::dom;

// === Tag Lists (arrays for iteration) ===

/// Tags whose text is scored as paragraph-like content.
pub static TAGS_TO_SCORE: [&str; 9] = ["section", "h2", "h3", "h4", "h5", "h6", "p", "td", "pre"];

/// Block elements whose presence keeps a `div` from becoming a `p`.
pub static DIV_TO_P_ELEMENTS: [&str; 9] =
    ["blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul"];

/// Sibling tags kept as-is when appended to the article; others become `div`.
pub static ALTER_TO_DIV_EXCEPTIONS: [&str; 6] = ["div", "article", "section", "p", "ol", "ul"];

/// Heading tags.
pub static HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// ARIA roles of elements that never hold article content.
pub static UNLIKELY_ROLES: [&str; 7] = [
    "menu", "menubar", "complementary", "navigation", "alert", "alertdialog", "dialog",
];

/// Presentational attributes stripped from every element of the content.
pub static PRESENTATIONAL_ATTRIBUTES: [&str; 12] = [
    "align", "background", "bgcolor", "border", "cellpadding", "cellspacing", "frame",
    "hspace", "rules", "style", "valign", "vspace",
];

/// Elements that also lose their legacy `width`/`height`.
pub static DEPRECATED_SIZE_ATTRIBUTE_ELEMS: [&str; 5] = ["table", "th", "td", "hr", "pre"];

/// Inline (phrasing) elements.
pub static PHRASING_ELEMENTS: [&str; 39] = [
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data", "datalist", "dfn",
    "em", "embed", "i", "img", "input", "kbd", "label", "mark", "math", "meter", "noscript",
    "object", "output", "progress", "q", "ruby", "samp", "script", "select", "small", "span",
    "strong", "sub", "sup", "textarea", "time", "var", "wbr",
];

/// Innermost blocks reported as plain text blocks.
pub static TEXT_BLOCK_TAGS: [&str; 15] = [
    "p", "pre", "blockquote", "li", "h1", "h2", "h3", "h4", "h5", "h6", "td", "th", "dd",
    "dt", "figcaption",
];

/// Media elements that keep an otherwise empty paragraph.
pub static MEDIA_TAGS: [&str; 5] = ["img", "embed", "object", "iframe", "picture"];

/// Embedded content checked against the video allow-list.
pub static EMBED_TAGS: [&str; 3] = ["object", "embed", "iframe"];

// === Tag Sets (HashSets for O(1) lookup) ===

/// `TAGS_TO_SCORE` as a `HashSet`
pub static TAGS_TO_SCORE_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    TAGS_TO_SCORE.into_iter().collect()
});

/// `DIV_TO_P_ELEMENTS` as a `HashSet`
pub static DIV_TO_P_ELEMENT_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    DIV_TO_P_ELEMENTS.into_iter().collect()
});

/// `PHRASING_ELEMENTS` as a `HashSet`
pub static PHRASING_ELEMENT_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    PHRASING_ELEMENTS.into_iter().collect()
});

/// `UNLIKELY_ROLES` as a `HashSet`
pub static UNLIKELY_ROLE_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    UNLIKELY_ROLES.into_iter().collect()
});

/// `TEXT_BLOCK_TAGS` as a `HashSet`
pub static TEXT_BLOCK_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    TEXT_BLOCK_TAGS.into_iter().collect()
});

// === Helper Functions ===

/// Whether `tag` is `h1`..`h6`.
#[inline]
#[must_use]
pub fn is_heading(tag: &str) -> bool {
    HEADING_TAGS.contains(&tag)
}

/// Text, a phrasing element, or an `a`/`del`/`ins` holding only phrasing content.
#[must_use]
pub fn is_phrasing_content(node: &NodeRef) -> bool {
    if node.is_text() {
        return true;
    }
    if !node.is_element() {
        return false;
    }
    let tag = dom::tag_name(node);
    if PHRASING_ELEMENT_SET.contains(tag.as_str()) {
        return true;
    }
    matches!(tag.as_str(), "a" | "del" | "ins")
        && node.children().iter().all(is_phrasing_content)
}

/// Whether any descendant is one of `DIV_TO_P_ELEMENTS`.
#[must_use]
pub fn has_child_block_element(node: &NodeRef) -> bool {
    node.children().iter().any(|child| {
        child.is_element()
            && (DIV_TO_P_ELEMENT_SET.contains(dom::tag_name(child).as_str())
                || has_child_block_element(child))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, select_first};

    #[test]
    fn test_array_set_consistency() {
        assert_eq!(TAGS_TO_SCORE_SET.len(), TAGS_TO_SCORE.len());
        assert_eq!(DIV_TO_P_ELEMENT_SET.len(), DIV_TO_P_ELEMENTS.len());
        assert_eq!(PHRASING_ELEMENT_SET.len(), PHRASING_ELEMENTS.len());
        assert_eq!(UNLIKELY_ROLE_SET.len(), UNLIKELY_ROLES.len());
        assert_eq!(TEXT_BLOCK_TAG_SET.len(), TEXT_BLOCK_TAGS.len());
    }

    #[test]
    fn test_score_tags() {
        assert!(TAGS_TO_SCORE_SET.contains("p"));
        assert!(TAGS_TO_SCORE_SET.contains("pre"));
        assert!(!TAGS_TO_SCORE_SET.contains("h1"));
        assert!(!TAGS_TO_SCORE_SET.contains("div"));
    }

    #[test]
    fn test_is_phrasing_content() {
        let doc = parse(r#"<div><a id="a1" href="/"><b>x</b></a><a id="a2" href="/"><p>x</p></a><span id="s">y</span></div>"#);
        let check = |css: &str| select_first(&doc, css).is_some_and(|n| is_phrasing_content(&n));
        assert!(check("#a1"));
        assert!(!check("#a2"));
        assert!(check("#s"));
        assert!(!check("div"));
    }

    #[test]
    fn test_has_child_block_element() {
        let doc = parse(r#"<div id="a"><span><p>x</p></span></div><div id="b"><span>x</span></div>"#);
        assert!(select_first(&doc, "#a").is_some_and(|n| has_child_block_element(&n)));
        assert!(!select_first(&doc, "#b").is_some_and(|n| has_child_block_element(&n)));
    }

    #[test]
    fn test_is_heading() {
        assert!(is_heading("h1"));
        assert!(is_heading("h6"));
        assert!(!is_heading("header"));
    }
}

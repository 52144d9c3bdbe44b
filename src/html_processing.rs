//! Document normalization.
//!
//! Passes that run on the whole document before scoring: lazy-image
//! `<noscript>` fallbacks, script and style removal, `<br>` runs turned into
//! paragraphs, and `<font>` retagging. [`fix_lazy_images`] runs again later on
//! the article content.

use dom_query::{Document, NodeRef, Selection};

use crate::dom;
use crate::extractor::tags::is_phrasing_content;
use crate::patterns::{B64_DATA_URL, IMAGE_EXTENSION, IMAGE_SRC, IMAGE_SRCSET};
use crate::text;

/// Base64 payloads shorter than this are treated as placeholders (about 100 bytes).
const B64_PLACEHOLDER_MAX_LEN: usize = 133;

// === Noscript Images ===

/// Replace lazy-loaded images with the `<noscript>` copy that follows them.
///
/// Images without any source-like attribute are dropped first. Then, for each
/// `<noscript>` holding a single image and preceded by a single-image element,
/// the previous image is replaced by the noscript one. Attributes of the old
/// image that carry a source are copied over; names already present on the
/// new image get a `data-old-` prefix.
pub fn unwrap_noscript_images(doc: &Document) {
    for img in doc.select("img").nodes() {
        let keep = dom::attributes(img).iter().any(|(name, value)| {
            matches!(name.as_str(), "src" | "srcset" | "data-src" | "data-srcset")
                || IMAGE_EXTENSION.is_match(value)
        });
        if !keep {
            img.remove_from_parent();
        }
    }

    for noscript in doc.select("noscript").nodes() {
        let markup = if noscript.first_element_child().is_some() {
            noscript.inner_html().to_string()
        } else {
            noscript.text().to_string()
        };
        let fragment = Document::from(markup.as_str());
        let Some(fragment_body) = dom::select_first(&fragment, "body") else {
            continue;
        };
        if !dom::is_single_image(&fragment_body) {
            continue;
        }

        let Some(prev) = noscript.prev_element_sibling() else {
            continue;
        };
        if !dom::is_single_image(&prev) {
            continue;
        }
        let prev_img = if dom::is_tag(&prev, "img") {
            Some(prev)
        } else {
            dom::elements_by_tags(&prev, &["img"]).first().copied()
        };
        let new_img = dom::elements_by_tags(&fragment_body, &["img"]).first().copied();
        let (Some(prev_img), Some(new_img)) = (prev_img, new_img) else {
            continue;
        };

        for (name, value) in dom::attributes(&prev_img) {
            if value.is_empty() {
                continue;
            }
            if name == "src" || name == "srcset" || IMAGE_EXTENSION.is_match(&value) {
                if new_img.attr(&name).is_some_and(|v| *v == *value) {
                    continue;
                }
                let target = if new_img.has_attr(&name) { format!("data-old-{name}") } else { name };
                new_img.set_attr(&target, &value);
            }
        }

        tracing::trace!("replacing lazy image with its noscript fallback");
        Selection::from(prev).replace_with_html(fragment_body.inner_html());
    }
}

// === Scripts and Styles ===

/// Remove every `<script>` and `<noscript>` element.
pub fn remove_scripts(doc: &Document) {
    doc.select("script, noscript").remove();
}

/// Remove `<style>`, turn `<br>` runs into paragraphs, retag `<font>` to `<span>`.
pub fn prep_document(doc: &Document) {
    doc.select("style").remove();
    if let Some(body) = dom::select_first(doc, "body") {
        replace_brs(&body);
    }
    for font in doc.select("font").nodes() {
        font.rename("span");
    }
}

// === Line Breaks ===

/// Skip whitespace-only text nodes starting at `node`.
fn next_significant<'a>(mut node: Option<NodeRef<'a>>) -> Option<NodeRef<'a>> {
    while let Some(n) = node {
        if n.is_element() || !text::is_blank(&n.text()) {
            return Some(n);
        }
        node = n.next_sibling();
    }
    None
}

/// Replace two or more successive `<br>` with a single `<p>`.
///
/// Whitespace between the breaks is ignored. The new paragraph takes the
/// phrasing content that follows it, up to the next `<br><br>` run. A `<p>`
/// parent of the new paragraph is retagged to `<div>`.
pub fn replace_brs(root: &NodeRef) {
    for br in dom::elements_by_tags(root, &["br"]) {
        if br.parent().is_none() {
            continue;
        }
        let mut next = next_significant(br.next_sibling());
        let mut replaced = false;
        while let Some(n) = next {
            if !dom::is_tag(&n, "br") {
                break;
            }
            replaced = true;
            let after = n.next_sibling();
            n.remove_from_parent();
            next = next_significant(after);
        }
        if !replaced {
            continue;
        }

        let p = dom::create_element(&br, "p");
        dom::replace_node(&br, &p);

        let mut next = p.next_sibling();
        while let Some(n) = next {
            if dom::is_tag(&n, "br") {
                let following = next_significant(n.next_sibling());
                if following.is_some_and(|f| dom::is_tag(&f, "br")) {
                    break;
                }
            }
            if !is_phrasing_content(&n) {
                break;
            }
            let sibling = n.next_sibling();
            dom::move_to_end(&p, &n);
            next = sibling;
        }

        while let Some(last) = p.last_child() {
            if !dom::is_whitespace(&last) {
                break;
            }
            last.remove_from_parent();
        }

        if let Some(parent) = p.parent() {
            if dom::is_tag(&parent, "p") {
                parent.rename("div");
            }
        }
    }
}

// === Lazy Images ===

/// Promote lazy-loading attributes of `img`/`picture`/`figure` to `src`/`srcset`.
///
/// A tiny base64 `src` is dropped when another attribute carries a real image
/// URL, unless it is an SVG. Elements that already have a source and no
/// `lazy` class are left alone.
pub fn fix_lazy_images(root: &NodeRef) {
    for elem in dom::elements_by_tags(root, &["img", "picture", "figure"]) {
        if let Some(src) = elem.attr("src") {
            if let Some(caps) = B64_DATA_URL.captures(&src) {
                if caps.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case("image/svg+xml")) {
                    continue;
                }
                let src_could_be_removed = dom::attributes(&elem)
                    .iter()
                    .any(|(name, value)| name != "src" && IMAGE_EXTENSION.is_match(value));
                let payload_len = caps.get(0).map_or(0, |m| src.len() - m.end());
                if src_could_be_removed && payload_len < B64_PLACEHOLDER_MAX_LEN {
                    elem.remove_attr("src");
                }
            }
        }

        let has_src = elem.attr("src").is_some_and(|s| !s.is_empty());
        let has_srcset = elem.attr("srcset").is_some_and(|s| !s.is_empty() && &*s != "null");
        let lazy = dom::attr_or_empty(&elem, "class").to_lowercase().contains("lazy");
        if (has_src || has_srcset) && !lazy {
            continue;
        }

        for (name, value) in dom::attributes(&elem) {
            if matches!(name.as_str(), "src" | "srcset" | "alt") {
                continue;
            }
            let copy_to = if IMAGE_SRCSET.is_match(&value) {
                "srcset"
            } else if IMAGE_SRC.is_match(&value) {
                "src"
            } else {
                continue;
            };

            if dom::is_any_tag(&elem, &["img", "picture"]) {
                elem.set_attr(copy_to, &value);
            } else if dom::elements_by_tags(&elem, &["img", "picture"]).is_empty() {
                let img = dom::create_element(&elem, "img");
                img.set_attr(copy_to, &value);
                elem.append_child(&img);
            }
        }
    }
}

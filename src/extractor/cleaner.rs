//! Content cleaning.
//!
//! Ordered passes over the assembled article: presentational attributes,
//! table marking, lazy images, unwanted elements, share widgets, headers,
//! conditional cleaning and empty-paragraph cleanup. The article is a
//! detached subtree, so every pass walks it with the helpers in
//! [`crate::dom`] instead of document-level selectors.

use std::collections::HashSet;

use dom_query::NodeRef;

use super::pruning::{is_allowed_embed, should_remove_node, PruneContext};
use super::scoring::class_weight;
use super::state::Flags;
use super::tables::{collapse_single_cell_tables, mark_data_tables};
use super::tags::{DEPRECATED_SIZE_ATTRIBUTE_ELEMS, MEDIA_TAGS, PRESENTATIONAL_ATTRIBUTES};
use crate::dom;
use crate::html_processing::fix_lazy_images;
use crate::patterns::{IMPORTANT_LINK, SHARE_ELEMENTS};
use crate::text::{char_len, is_blank};
use crate::Options;

/// Run every cleaning pass over `article`.
pub fn prep_article(article: &NodeRef, options: &Options, flags: Flags) {
    clean_styles(article);

    let data_tables = mark_data_tables(article);
    fix_lazy_images(article);

    let ctx = PruneContext {
        flags,
        video_regex: options.video_regex(),
        link_density_modifier: options.link_density_modifier,
        preserve_important_links: options.preserve_important_links,
        data_tables: &data_tables,
    };

    clean_conditionally(article, "form", &ctx);
    clean_conditionally(article, "fieldset", &ctx);
    clean_embeds(article, &["object", "embed"], &ctx);
    remove_boilerplate(article, options.preserve_important_links);
    clean_share_elements(article, options.char_threshold);
    clean_headers(article, flags);
    clean_embeds(article, &["iframe"], &ctx);
    remove_tags(article, &["input", "textarea", "select", "button"]);

    clean_conditionally(article, "table", &ctx);
    clean_conditionally(article, "ul", &ctx);
    clean_conditionally(article, "div", &ctx);

    remove_empty_paragraphs(article);
    remove_br_before_paragraphs(article);
    collapse_single_cell_tables(article);
}

fn is_within(node: &NodeRef, root: &NodeRef) -> bool {
    dom::ancestors(node, 0).iter().any(|a| a.id == root.id)
}

// === Attributes ===

/// Strip presentational attributes from `root` and its descendants.
///
/// SVG subtrees are left untouched; `table`, `th`, `td`, `hr` and `pre` also
/// lose `width`/`height`.
pub fn clean_styles(root: &NodeRef) {
    let mut stack = vec![*root];
    while let Some(node) = stack.pop() {
        if dom::is_tag(&node, "svg") {
            continue;
        }
        for name in PRESENTATIONAL_ATTRIBUTES {
            node.remove_attr(name);
        }
        if dom::is_any_tag(&node, &DEPRECATED_SIZE_ATTRIBUTE_ELEMS) {
            node.remove_attr("width");
            node.remove_attr("height");
        }
        stack.extend(dom::element_children(&node));
    }
}

// === Removal Passes ===

fn remove_tags(root: &NodeRef, tags: &[&str]) {
    for node in dom::elements_by_tags(root, tags) {
        node.remove_from_parent();
    }
}

/// Remove embeds unless they point at an allowed video host.
fn clean_embeds(root: &NodeRef, tags: &[&str], ctx: &PruneContext<'_>) {
    for embed in dom::elements_by_tags(root, tags) {
        if is_allowed_embed(&embed, ctx.video_regex) {
            continue;
        }
        tracing::trace!(tag = %dom::tag_name(&embed), "removing embed");
        embed.remove_from_parent();
    }
}

/// Remove `footer`, `link`, `aside` and `nav`.
///
/// With `preserve_links`, "read more"-style links of a removed element are
/// moved into a `div` left in its place.
fn remove_boilerplate(root: &NodeRef, preserve_links: bool) {
    for node in dom::elements_by_tags(root, &["footer", "link", "aside", "nav"]) {
        if !is_within(&node, root) {
            continue;
        }
        if preserve_links {
            let links: Vec<NodeRef> = dom::elements_by_tags(&node, &["a"])
                .into_iter()
                .filter(|a| IMPORTANT_LINK.is_match(&dom::inner_text(a, true)))
                .collect();
            if !links.is_empty() {
                let holder = dom::create_element(&node, "div");
                for link in &links {
                    dom::move_to_end(&holder, link);
                }
                node.insert_before(&holder);
            }
        }
        node.remove_from_parent();
    }
}

/// Remove short share widgets below each child of `root`.
fn clean_share_elements(root: &NodeRef, char_threshold: usize) {
    for child in dom::element_children(root) {
        let end = dom::next_node(&child, true).map(|n| n.id);
        let mut next = dom::next_node(&child, false);
        while let Some(node) = next {
            if end == Some(node.id) {
                break;
            }
            if SHARE_ELEMENTS.is_match(&dom::match_string(&node)) && char_len(&node.text()) < char_threshold {
                tracing::trace!(match_string = %dom::match_string(&node), "removing share element");
                next = dom::remove_and_get_next(&node);
            } else {
                next = dom::next_node(&node, false);
            }
        }
    }
}

/// Remove `h1`/`h2` with a negative class weight and headings that repeat
/// an earlier heading.
fn clean_headers(root: &NodeRef, flags: Flags) {
    let mut seen = HashSet::new();
    for heading in dom::elements_by_tags(root, &["h1", "h2", "h3", "h4", "h5", "h6"]) {
        if !is_within(&heading, root) {
            continue;
        }
        if dom::is_any_tag(&heading, &["h1", "h2"]) && class_weight(&heading, flags) < 0.0 {
            tracing::trace!(text = %dom::inner_text(&heading, true), "removing negative-weight header");
            heading.remove_from_parent();
            continue;
        }
        let text = dom::inner_text(&heading, true).to_lowercase();
        if text.is_empty() {
            continue;
        }
        if !seen.insert(text) {
            heading.remove_from_parent();
        }
    }
}

/// Apply [`should_remove_node`] to every `tag` descendant, innermost first.
fn clean_conditionally(root: &NodeRef, tag: &str, ctx: &PruneContext<'_>) {
    if !ctx.flags.contains(Flags::CLEAN_CONDITIONALLY) {
        return;
    }
    for node in dom::elements_by_tags(root, &[tag]).into_iter().rev() {
        if !is_within(&node, root) {
            continue;
        }
        if should_remove_node(&node, ctx) {
            node.remove_from_parent();
        }
    }
}

fn remove_empty_paragraphs(root: &NodeRef) {
    for p in dom::elements_by_tags(root, &["p"]) {
        let has_media = !dom::elements_by_tags(&p, &MEDIA_TAGS).is_empty();
        if !has_media && is_blank(&p.text()) {
            p.remove_from_parent();
        }
    }
}

fn remove_br_before_paragraphs(root: &NodeRef) {
    for br in dom::elements_by_tags(root, &["br"]) {
        let mut next = br.next_sibling();
        while let Some(sibling) = next {
            if !dom::is_whitespace(&sibling) || sibling.is_element() {
                break;
            }
            next = sibling.next_sibling();
        }
        if next.is_some_and(|n| dom::is_tag(&n, "p")) {
            br.remove_from_parent();
        }
    }
}

//! DOM operations over the `dom_query` arena.
//!
//! Nodes are addressed by `NodeRef` (a `NodeId` into the document's arena), so
//! a removed node only detaches its slot. Every mutating pass walks the tree
//! with [`next_node`] and computes the successor before removing the current
//! node, see [`remove_and_get_next`].

pub use dom_query::{Document, NodeId, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::patterns::{DISPLAY_NONE, VISIBILITY_HIDDEN};
use crate::text;

// === Tag/Node Information ===

/// Lowercase tag name, or an empty string for non-element nodes.
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    if !node.is_element() {
        return String::new();
    }
    node.node_name().map(|t| t.to_ascii_lowercase()).unwrap_or_default()
}

/// Whether `node` is an element with the given lowercase tag.
#[inline]
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().is_some_and(|t| t.eq_ignore_ascii_case(tag))
}

/// Whether `node` is an element whose tag is in `tags`.
#[must_use]
pub fn is_any_tag(node: &NodeRef, tags: &[&str]) -> bool {
    node.is_element()
        && node
            .node_name()
            .is_some_and(|t| tags.iter().any(|tag| t.eq_ignore_ascii_case(tag)))
}

/// Attribute value as an owned string.
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// Attribute value, or an empty string when absent.
#[inline]
#[must_use]
pub fn attr_or_empty(node: &NodeRef, name: &str) -> String {
    attr(node, name).unwrap_or_default()
}

/// `class` and `id` joined by a space, the string the candidate patterns test.
#[must_use]
pub fn match_string(node: &NodeRef) -> String {
    format!("{} {}", attr_or_empty(node, "class"), attr_or_empty(node, "id"))
}

/// All attributes as `(name, value)` pairs in document order.
#[must_use]
pub fn attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|a| (a.name.local.to_string(), a.value.to_string()))
        .collect()
}

// === Traversal ===

/// Next element in depth-first order.
///
/// Returns the first element child unless `ignore_self_and_kids`, else the
/// next element sibling, else the next element sibling of the closest
/// ancestor that has one.
#[must_use]
pub fn next_node<'a>(node: &NodeRef<'a>, ignore_self_and_kids: bool) -> Option<NodeRef<'a>> {
    if !ignore_self_and_kids {
        if let Some(child) = node.first_element_child() {
            return Some(child);
        }
    }
    if let Some(sibling) = node.next_element_sibling() {
        return Some(sibling);
    }
    let mut current = node.parent();
    while let Some(parent) = current {
        if !parent.is_element() {
            return None;
        }
        if let Some(sibling) = parent.next_element_sibling() {
            return Some(sibling);
        }
        current = parent.parent();
    }
    None
}

/// Detach `node` and return the element that followed its subtree.
pub fn remove_and_get_next<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let next = next_node(node, true);
    node.remove_from_parent();
    next
}

/// Element ancestors, nearest first. `max_depth == 0` walks to the root.
#[must_use]
pub fn ancestors<'a>(node: &NodeRef<'a>, max_depth: usize) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        if !parent.is_element() {
            break;
        }
        out.push(parent);
        if max_depth > 0 && out.len() >= max_depth {
            break;
        }
        current = parent.parent();
    }
    out
}

/// Whether an ancestor within `max_depth` levels has tag `tag` and passes
/// `filter`. `max_depth == 0` searches every ancestor.
pub fn has_ancestor_tag<F>(node: &NodeRef, tag: &str, max_depth: usize, filter: F) -> bool
where
    F: Fn(&NodeRef) -> bool,
{
    ancestors(node, max_depth)
        .iter()
        .any(|a| is_tag(a, tag) && filter(a))
}

/// Element children of `node`.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// Descendant elements matching any of `tags`, in document order.
#[must_use]
pub fn elements_by_tags<'a>(node: &NodeRef<'a>, tags: &[&str]) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeRef<'a>> = node.children().into_iter().rev().collect();
    while let Some(current) = stack.pop() {
        if !current.is_element() {
            continue;
        }
        if tags.is_empty() || is_any_tag(&current, tags) {
            out.push(current);
        }
        stack.extend(current.children().into_iter().rev());
    }
    out
}

/// All descendant elements in document order.
#[must_use]
pub fn descendant_elements<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    elements_by_tags(node, &[])
}

/// Nesting depth of `node` counted in ancestors with tag `tag`.
#[must_use]
pub fn ancestor_tag_depth(node: &NodeRef, tag: &str) -> usize {
    ancestors(node, 0).iter().filter(|a| is_tag(a, tag)).count()
}

// === Text Content ===

/// Text of the subtree, trimmed, with whitespace runs collapsed if `normalize`.
#[must_use]
pub fn inner_text(node: &NodeRef, normalize: bool) -> String {
    let raw = node.text();
    if normalize {
        text::normalize_spaces(&raw)
    } else {
        raw.trim().to_string()
    }
}

/// Character count of the normalized subtree text.
#[inline]
#[must_use]
pub fn text_len(node: &NodeRef) -> usize {
    text::char_len(&inner_text(node, true))
}

/// Whitespace-only text node, or a `<br>`.
#[must_use]
pub fn is_whitespace(node: &NodeRef) -> bool {
    if node.is_text() {
        return text::is_blank(&node.text());
    }
    is_tag(node, "br")
}

/// Element with no text whose element children (if any) are all `br`/`hr`.
#[must_use]
pub fn is_element_without_content(node: &NodeRef) -> bool {
    if !node.is_element() || !text::is_blank(&node.text()) {
        return false;
    }
    element_children(node)
        .iter()
        .all(|c| is_any_tag(c, &["br", "hr"]))
}

/// Exactly one element child, tagged `tag`, and no non-blank text children.
#[must_use]
pub fn has_single_tag_inside(node: &NodeRef, tag: &str) -> bool {
    let children = element_children(node);
    if children.len() != 1 || !is_tag(&children[0], tag) {
        return false;
    }
    !node
        .children()
        .iter()
        .any(|c| c.is_text() && !text::is_blank(&c.text()))
}

/// Single `img`, or a chain of single-child wrappers around one, with no text.
#[must_use]
pub fn is_single_image(node: &NodeRef) -> bool {
    let mut current = *node;
    loop {
        if is_tag(&current, "img") {
            return true;
        }
        let children = element_children(&current);
        if children.len() != 1 || !text::is_blank(&current.text()) {
            return false;
        }
        current = children[0];
    }
}

// === Visibility ===

/// False when inline style, `hidden`, or `aria-hidden` hide the node.
///
/// `aria-hidden="true"` is ignored on `fallback-image` elements, which some
/// sites hide from assistive technology while still rendering them.
#[must_use]
pub fn is_probably_visible(node: &NodeRef) -> bool {
    if let Some(style) = node.attr("style") {
        if DISPLAY_NONE.is_match(&style) || VISIBILITY_HIDDEN.is_match(&style) {
            return false;
        }
    }
    if node.has_attr("hidden") {
        return false;
    }
    match node.attr("aria-hidden") {
        Some(v) if &*v == "true" => attr_or_empty(node, "class").contains("fallback-image"),
        _ => true,
    }
}

// === Mutation ===

/// Create a detached element in the same document.
#[inline]
#[must_use]
pub fn create_element<'a>(near: &NodeRef<'a>, tag: &str) -> NodeRef<'a> {
    near.tree.new_element(tag)
}

/// Create a detached text node in the same document.
#[inline]
#[must_use]
pub fn create_text<'a>(near: &NodeRef<'a>, text: &str) -> NodeRef<'a> {
    near.tree.new_text(text)
}

/// Move `child` (detaching it first) to the end of `parent`.
pub fn move_to_end(parent: &NodeRef, child: &NodeRef) {
    child.remove_from_parent();
    parent.append_child(child);
}

/// Move every child of `from` to the end of `to`, preserving order.
pub fn move_children(from: &NodeRef, to: &NodeRef) {
    for child in from.children() {
        move_to_end(to, &child);
    }
}

/// Put `new` where `old` is and detach `old`.
pub fn replace_node(old: &NodeRef, new: &NodeRef) {
    new.remove_from_parent();
    old.insert_before(new);
    old.remove_from_parent();
}

/// Replace the children of `node` with parsed `html`.
#[inline]
pub fn set_inner_html(node: &NodeRef, html: &str) {
    Selection::from(*node).set_html(html);
}

/// Parse an HTML string.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// First element matching `css` under the document root.
#[must_use]
pub fn select_first<'a>(doc: &'a Document, css: &str) -> Option<NodeRef<'a>> {
    doc.select(css).nodes().first().copied()
}

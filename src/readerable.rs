//! Quick check for whether a document is worth extracting.
//!
//! Cheaper than a full parse: no scoring, no mutation. Visible `p`, `pre` and
//! `article` elements, plus parents of `div > br`, add the square root of
//! their text length beyond the minimum until the score is reached.

use dom_query::NodeRef;

use crate::dom;
use crate::options::ReaderableOptions;
use crate::patterns::{MAYBE_CANDIDATE, UNLIKELY_CANDIDATES};
use crate::text::char_len;

fn readerable_nodes<'a>(doc: &'a dom::Document) -> Vec<NodeRef<'a>> {
    let mut nodes: Vec<NodeRef<'a>> = doc.select("p, pre, article").nodes().to_vec();
    for br in doc.select("div > br").nodes() {
        if let Some(parent) = br.parent() {
            if !nodes.iter().any(|n| n.id == parent.id) {
                nodes.push(parent);
            }
        }
    }
    nodes
}

/// Whether `html` probably holds an article.
#[must_use]
pub fn is_probably_readerable(html: &str, options: &ReaderableOptions) -> bool {
    let doc = dom::parse(html);
    let mut score = 0.0;

    for node in readerable_nodes(&doc) {
        if !dom::is_probably_visible(&node) {
            continue;
        }
        let match_string = dom::match_string(&node);
        if UNLIKELY_CANDIDATES.is_match(&match_string) && !MAYBE_CANDIDATE.is_match(&match_string) {
            continue;
        }
        if dom::is_tag(&node, "p") && dom::has_ancestor_tag(&node, "li", 0, |_| true) {
            continue;
        }

        let length = char_len(node.text().trim());
        if length < options.min_content_length {
            continue;
        }
        score += ((length - options.min_content_length) as f64).sqrt();
        if score > options.min_score {
            tracing::trace!(score, "document is readerable");
            return true;
        }
    }
    false
}

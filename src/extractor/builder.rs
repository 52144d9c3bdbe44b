//! Article assembly.
//!
//! Picks the best candidate by link-density-adjusted score, refines it
//! against its ancestors, and moves it together with related siblings into
//! a fresh `div`.

use dom_query::{NodeId, NodeRef};

use super::scoring::initial_score;
use super::state::{Candidates, Flags, NodeInfo};
use super::tags::ALTER_TO_DIV_EXCEPTIONS;
use crate::dom;
use crate::link_density::link_density;
use crate::patterns::SENTENCE_END;
use crate::text::char_len;

/// Alternative candidates that must agree before a shared ancestor wins.
const MINIMUM_TOPCANDIDATES: usize = 3;

/// Score ratio for a candidate to count as an alternative to the best.
const ALTERNATIVE_RATIO: f64 = 0.75;

/// Share of the top score a sibling needs, and the class-match bonus.
const SIBLING_SCORE_RATIO: f64 = 0.2;

/// Sibling threshold when the top score is not positive.
const MIN_SIBLING_THRESHOLD: f64 = 10.0;

/// An assembled article.
#[derive(Debug, Clone)]
pub struct BuiltArticle<'a> {
    /// Detached `div` holding the top candidate and included siblings.
    pub content: NodeRef<'a>,
    /// Selected content root.
    pub top_candidate: NodeRef<'a>,
    /// The top candidate was synthesized from the body.
    pub created_top: bool,
    /// Text direction found around the top candidate.
    pub dir: Option<String>,
}

fn node_at<'a>(near: &NodeRef<'a>, id: NodeId) -> Option<NodeRef<'a>> {
    near.tree.get(&id)
}

/// Rescale scores by link density and return the best `limit`, best first.
fn top_candidates(body: &NodeRef, candidates: &mut Candidates, limit: usize) -> Vec<NodeInfo> {
    let adjusted: Vec<NodeInfo> = candidates
        .iter()
        .filter_map(|info| {
            let node = node_at(body, info.id)?;
            Some(NodeInfo { id: info.id, score: info.score * (1.0 - link_density(&node)) })
        })
        .collect();

    for info in &adjusted {
        candidates.set(info.id, info.score);
    }

    let mut sorted = adjusted;
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted.truncate(limit.max(1));
    sorted
}

fn is_body(node: &NodeRef) -> bool {
    dom::is_tag(node, "body")
}

/// Promote an ancestor shared by enough strong alternatives.
fn shared_ancestor<'a>(top: NodeRef<'a>, best: f64, tops: &[NodeInfo]) -> NodeRef<'a> {
    let alternatives: Vec<Vec<NodeId>> = tops
        .iter()
        .skip(1)
        .filter(|info| best > 0.0 && info.score / best >= ALTERNATIVE_RATIO)
        .filter_map(|info| node_at(&top, info.id))
        .map(|node| dom::ancestors(&node, 0).iter().map(|a| a.id).collect())
        .collect();
    if alternatives.len() < MINIMUM_TOPCANDIDATES {
        return top;
    }

    let mut parent = top.parent();
    while let Some(candidate) = parent {
        if !candidate.is_element() || is_body(&candidate) {
            break;
        }
        let containing = alternatives.iter().filter(|chain| chain.contains(&candidate.id)).count();
        if containing >= MINIMUM_TOPCANDIDATES {
            return candidate;
        }
        parent = candidate.parent();
    }
    top
}

/// Climb while parents score higher than the current candidate.
fn climb_scores<'a>(mut top: NodeRef<'a>, candidates: &Candidates) -> NodeRef<'a> {
    let Some(mut last_score) = candidates.score(top.id) else {
        return top;
    };
    let threshold = last_score / 3.0;
    let mut parent = top.parent();
    while let Some(candidate) = parent {
        if !candidate.is_element() || is_body(&candidate) {
            break;
        }
        let Some(score) = candidates.score(candidate.id) else {
            parent = candidate.parent();
            continue;
        };
        if score < threshold {
            break;
        }
        if score > last_score {
            top = candidate;
            break;
        }
        last_score = score;
        parent = candidate.parent();
    }
    top
}

/// Climb through parents whose only element child is the candidate.
fn climb_single_children(mut top: NodeRef<'_>) -> NodeRef<'_> {
    while let Some(parent) = top.parent() {
        if !parent.is_element() || is_body(&parent) || dom::element_children(&parent).len() != 1 {
            break;
        }
        top = parent;
    }
    top
}

fn find_dir<'a>(top: &NodeRef<'a>) -> Option<String> {
    let parent = top.parent().filter(NodeRef::is_element);
    let mut chain: Vec<NodeRef<'a>> = Vec::new();
    if let Some(parent) = parent {
        chain.push(parent);
    }
    chain.push(*top);
    if let Some(parent) = parent {
        chain.extend(dom::ancestors(&parent, 0));
    }
    chain.iter().find_map(|node| dom::attr(node, "dir"))
}

fn include_paragraph(sibling: &NodeRef) -> bool {
    let density = link_density(sibling);
    let text = dom::inner_text(sibling, true);
    let len = char_len(&text);
    if len > 80 {
        density < 0.25
    } else {
        len > 0 && density == 0.0 && SENTENCE_END.is_match(&text)
    }
}

/// Assemble the article from scored `candidates`.
///
/// `body` is the document body. Siblings are moved, not copied, so the body
/// must be restored before another attempt.
pub fn build_article<'a>(
    body: &NodeRef<'a>,
    candidates: &mut Candidates,
    nb_top_candidates: usize,
    flags: Flags,
) -> BuiltArticle<'a> {
    let tops = top_candidates(body, candidates, nb_top_candidates);
    let best = tops.first().and_then(|info| node_at(body, info.id).map(|node| (node, info.score)));

    let (top, created_top) = match best {
        Some((node, score)) if !is_body(&node) => {
            let mut top = shared_ancestor(node, score, &tops);
            candidates.initialize(top.id, initial_score(&top, flags));
            top = climb_scores(top, candidates);
            top = climb_single_children(top);
            candidates.initialize(top.id, initial_score(&top, flags));
            (top, false)
        }
        _ => {
            let top = dom::create_element(body, "div");
            dom::move_children(body, &top);
            body.append_child(&top);
            candidates.initialize(top.id, 0.0);
            (top, true)
        }
    };

    let dir = find_dir(&top);

    let top_score = candidates.score(top.id).unwrap_or(0.0);
    let threshold = if top_score > 0.0 { top_score * SIBLING_SCORE_RATIO } else { MIN_SIBLING_THRESHOLD };
    let top_class = dom::attr_or_empty(&top, "class");

    let content = dom::create_element(&top, "div");
    let siblings = match top.parent() {
        Some(parent) if parent.is_element() => dom::element_children(&parent),
        _ => vec![top],
    };

    for sibling in siblings {
        let include = if sibling.id == top.id {
            true
        } else {
            let bonus = if !top_class.is_empty() && dom::attr_or_empty(&sibling, "class") == top_class {
                top_score * SIBLING_SCORE_RATIO
            } else {
                0.0
            };
            let score = candidates.score(sibling.id).unwrap_or(0.0) + bonus;
            if score >= threshold {
                true
            } else {
                dom::is_tag(&sibling, "p") && include_paragraph(&sibling)
            }
        };
        if !include {
            continue;
        }

        if !dom::is_any_tag(&sibling, &ALTER_TO_DIV_EXCEPTIONS) {
            tracing::trace!(tag = %dom::tag_name(&sibling), "retagging sibling to div");
            sibling.rename("div");
        }
        dom::move_to_end(&content, &sibling);
    }

    tracing::trace!(
        created_top,
        top_score,
        threshold,
        children = dom::element_children(&content).len(),
        "built article"
    );
    BuiltArticle { content, top_candidate: top, created_top, dir }
}

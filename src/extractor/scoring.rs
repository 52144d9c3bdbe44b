//! Candidate scoring.
//!
//! One depth-first pass over the document prunes hidden, unlikely and empty
//! nodes, turns phrasing-only `div`s into paragraphs, and collects
//! paragraph-like elements. Each collected element with enough text then
//! adds its score to up to five ancestors, divided by how far away they are.

use dom_query::NodeRef;

use super::state::{Candidates, Flags};
use super::tags::{is_phrasing_content, has_child_block_element, TAGS_TO_SCORE_SET, UNLIKELY_ROLE_SET};
use crate::dom;
use crate::link_density::link_density;
use crate::patterns::{BYLINE, MAYBE_CANDIDATE, NEGATIVE, POSITIVE, UNLIKELY_CANDIDATES};
use crate::text::{char_len, comma_count, text_similarity};

/// Weight added or subtracted per positive/negative class or id match.
pub const CLASS_WEIGHT: f64 = 25.0;

/// Minimum paragraph length (characters) that contributes a score.
const MIN_SCORED_TEXT: usize = 25;

/// Ancestor levels that receive a share of a paragraph's score.
const SCORED_ANCESTOR_LEVELS: usize = 5;

/// Similarity above which a heading is taken to repeat the title.
const TITLE_SIMILARITY: f64 = 0.75;

/// Class/id weight of `node`, or `0.0` without `WEIGHT_CLASSES`.
#[must_use]
pub fn class_weight(node: &NodeRef, flags: Flags) -> f64 {
    if !flags.contains(Flags::WEIGHT_CLASSES) {
        return 0.0;
    }

    let mut weight = 0.0;
    for name in ["class", "id"] {
        let Some(value) = node.attr(name) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if NEGATIVE.is_match(&value) {
            weight -= CLASS_WEIGHT;
        }
        if POSITIVE.is_match(&value) {
            weight += CLASS_WEIGHT;
        }
    }
    weight
}

/// Seed score of a newly seen ancestor.
#[must_use]
pub fn initial_score(node: &NodeRef, flags: Flags) -> f64 {
    let base = match dom::tag_name(node).as_str() {
        "div" => 5.0,
        "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    };
    base + class_weight(node, flags)
}

/// Score an element's own text contributes: one point, one per comma, and
/// one per hundred characters up to three.
#[must_use]
pub fn content_score(text: &str) -> f64 {
    let len = char_len(text);
    1.0 + comma_count(text) as f64 + (len / 100).min(3) as f64
}

fn ancestor_divisor(level: usize) -> f64 {
    match level {
        0 => 1.0,
        1 => 2.0,
        _ => (level * 3) as f64,
    }
}

/// Result of a scoring pass.
#[derive(Debug, Default)]
pub struct ScoredDocument {
    /// Scored ancestors, first-seen order.
    pub candidates: Candidates,
    /// Text of the byline element removed during the pass.
    pub byline: Option<String>,
}

struct Scorer<'t> {
    flags: Flags,
    title: &'t str,
    byline: Option<String>,
    title_heading_seen: bool,
}

impl Scorer<'_> {
    fn take_byline(&mut self, node: &NodeRef, match_string: &str) -> bool {
        if self.byline.is_some() {
            return false;
        }
        let rel_author = node.attr("rel").is_some_and(|rel| &*rel == "author");
        let itemprop_author = node.attr("itemprop").is_some_and(|p| p.contains("author"));
        if !(rel_author || itemprop_author || BYLINE.is_match(match_string)) {
            return false;
        }

        let text = node.text();
        let text = text.trim();
        let len = char_len(text);
        if len == 0 || len >= 100 {
            return false;
        }
        self.byline = Some(text.to_string());
        true
    }

    fn repeats_title(&mut self, node: &NodeRef) -> bool {
        if self.title_heading_seen || self.title.is_empty() || !dom::is_any_tag(node, &["h1", "h2"]) {
            return false;
        }
        let heading = dom::inner_text(node, false);
        let repeats = heading.to_lowercase() == self.title.to_lowercase()
            || text_similarity(self.title, &heading) > TITLE_SIMILARITY;
        if repeats {
            self.title_heading_seen = true;
        }
        repeats
    }

    fn is_unlikely(&self, node: &NodeRef, match_string: &str) -> bool {
        if !self.flags.contains(Flags::STRIP_UNLIKELYS) {
            return false;
        }
        if UNLIKELY_CANDIDATES.is_match(match_string)
            && !MAYBE_CANDIDATE.is_match(match_string)
            && !dom::has_ancestor_tag(node, "table", 3, |_| true)
            && !dom::has_ancestor_tag(node, "code", 3, |_| true)
            && !dom::is_any_tag(node, &["body", "a"])
        {
            tracing::trace!(match_string, "removing unlikely candidate");
            return true;
        }
        node.attr("role").is_some_and(|role| UNLIKELY_ROLE_SET.contains(&*role))
    }
}

/// Wrap runs of phrasing children of `div` in paragraphs.
fn wrap_phrasing_runs(div: &NodeRef) {
    let mut paragraph: Option<NodeRef> = None;
    let mut child = div.first_child();
    while let Some(current) = child {
        let next = current.next_sibling();
        if is_phrasing_content(&current) {
            if let Some(p) = &paragraph {
                dom::move_to_end(p, &current);
            } else if !dom::is_whitespace(&current) {
                let p = dom::create_element(div, "p");
                current.insert_before(&p);
                dom::move_to_end(&p, &current);
                paragraph = Some(p);
            }
        } else if let Some(p) = paragraph.take() {
            while let Some(last) = p.last_child() {
                if !dom::is_whitespace(&last) {
                    break;
                }
                last.remove_from_parent();
            }
        }
        child = next;
    }
}

/// Prune and collect paragraph-like elements under `root`.
fn collect_elements<'a>(root: &NodeRef<'a>, scorer: &mut Scorer<'_>) -> Vec<NodeRef<'a>> {
    let mut to_score = Vec::new();
    let mut current = Some(*root);

    while let Some(node) = current {
        let match_string = dom::match_string(&node);

        if !dom::is_probably_visible(&node) {
            tracing::trace!(tag = %dom::tag_name(&node), "removing hidden node");
            current = dom::remove_and_get_next(&node);
            continue;
        }

        let modal = node.attr("aria-modal").is_some_and(|v| &*v == "true");
        let dialog = node.attr("role").is_some_and(|v| &*v == "dialog");
        if modal && dialog {
            current = dom::remove_and_get_next(&node);
            continue;
        }

        if scorer.take_byline(&node, &match_string) {
            current = dom::remove_and_get_next(&node);
            continue;
        }

        if scorer.repeats_title(&node) {
            current = dom::next_node(&node, true);
            continue;
        }

        if scorer.is_unlikely(&node, &match_string) {
            current = dom::remove_and_get_next(&node);
            continue;
        }

        let tag = dom::tag_name(&node);
        let structural = matches!(tag.as_str(), "div" | "section" | "header") || super::tags::is_heading(&tag);
        if structural && dom::is_element_without_content(&node) {
            current = dom::remove_and_get_next(&node);
            continue;
        }

        if TAGS_TO_SCORE_SET.contains(tag.as_str()) {
            to_score.push(node);
        }

        let mut node = node;
        if tag == "div" {
            wrap_phrasing_runs(&node);

            if dom::has_single_tag_inside(&node, "p") && link_density(&node) < 0.25 {
                let child = dom::element_children(&node)[0];
                dom::replace_node(&node, &child);
                node = child;
                to_score.push(node);
            } else if !has_child_block_element(&node) {
                node.rename("p");
                to_score.push(node);
            }
        }

        current = dom::next_node(&node, false);
    }

    to_score
}

/// Score the document rooted at `root` (the `<html>` element).
///
/// Mutates the tree: pruned nodes are detached and `div`s may be retagged
/// or replaced. `title` is the resolved article title.
pub fn score_document(root: &NodeRef, title: &str, flags: Flags) -> ScoredDocument {
    let mut scorer = Scorer { flags, title, byline: None, title_heading_seen: false };
    let elements = collect_elements(root, &mut scorer);
    let mut candidates = Candidates::new();

    for element in &elements {
        if !element.parent().is_some_and(|p| p.is_element()) {
            continue;
        }
        let text = dom::inner_text(element, true);
        if char_len(&text) < MIN_SCORED_TEXT {
            continue;
        }
        let ancestors = dom::ancestors(element, SCORED_ANCESTOR_LEVELS);
        if ancestors.is_empty() {
            continue;
        }

        let score = content_score(&text);
        for (level, ancestor) in ancestors.iter().enumerate() {
            if !ancestor.parent().is_some_and(|p| p.is_element()) {
                continue;
            }
            candidates.initialize(ancestor.id, initial_score(ancestor, flags));
            candidates.add(ancestor.id, score / ancestor_divisor(level));
        }
    }

    tracing::trace!(elements = elements.len(), candidates = candidates.len(), "scored document");
    ScoredDocument { candidates, byline: scorer.byline }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse, select_first};
    use dom_query::Document;

    fn node<'a>(doc: &'a Document, css: &str) -> NodeRef<'a> {
        select_first(doc, css).unwrap()
    }

    fn scored(doc: &Document, title: &str, flags: Flags) -> ScoredDocument {
        score_document(&node(doc, "html"), title, flags)
    }

    fn long_text(n: usize) -> String {
        "word ".repeat(n)
    }

    #[test]
    fn test_class_weight() {
        let doc = parse(r#"<div class="article-body" id="sidebar">x</div><div class="entry">y</div>"#);
        let first = node(&doc, "div");
        assert_eq!(class_weight(&first, Flags::all()), 0.0);
        assert_eq!(class_weight(&node(&doc, ".entry"), Flags::all()), 25.0);
        assert_eq!(class_weight(&node(&doc, ".entry"), Flags::STRIP_UNLIKELYS), 0.0);
    }

    #[test]
    fn test_initial_scores_by_tag() {
        let doc = parse("<div>a</div><pre>b</pre><ul><li>c</li></ul><h2>d</h2><article>e</article>");
        let flags = Flags::empty();
        assert_eq!(initial_score(&node(&doc, "div"), flags), 5.0);
        assert_eq!(initial_score(&node(&doc, "pre"), flags), 3.0);
        assert_eq!(initial_score(&node(&doc, "li"), flags), -3.0);
        assert_eq!(initial_score(&node(&doc, "h2"), flags), -5.0);
        assert_eq!(initial_score(&node(&doc, "article"), flags), 0.0);
    }

    #[test]
    fn test_content_score() {
        assert_eq!(content_score("short"), 1.0);
        assert_eq!(content_score(&"a, ".repeat(50)), 1.0 + 50.0 + 1.0);
        assert_eq!(content_score(&"x".repeat(1000)), 4.0);
    }

    #[test]
    fn test_score_propagates_with_divisors() {
        let text = "x".repeat(250);
        let doc = parse(&format!("<html><body><main><article><p>{text}</p></article></main></body></html>"));
        let result = scored(&doc, "", Flags::empty());
        // base = 1 + 0 + 2 = 3; levels: article /1, main /2, body /3
        let article = node(&doc, "article").id;
        let main = node(&doc, "main").id;
        let body = node(&doc, "body").id;
        assert_eq!(result.candidates.score(article), Some(3.0));
        assert_eq!(result.candidates.score(main), Some(1.5));
        assert_eq!(result.candidates.score(body), Some(1.0));
        // html has no element parent
        assert!(!result.candidates.contains(node(&doc, "html").id));
    }

    #[test]
    fn test_short_paragraphs_not_scored() {
        let doc = parse("<html><body><div><p>too short</p></div></body></html>");
        assert!(scored(&doc, "", Flags::all()).candidates.is_empty());
    }

    #[test]
    fn test_unlikely_candidates_stripped_only_with_flag() {
        let html = format!(
            r#"<html><body><div class="sidebar"><p>{0}</p><p>{0}</p></div><div class="sidebar content"><p>keep</p><p>more</p></div></body></html>"#,
            long_text(10)
        );
        let doc = parse(&html);
        scored(&doc, "", Flags::all());
        assert_eq!(doc.select("div.sidebar").length(), 1);
        assert!(doc.select(".sidebar.content").exists());

        let doc = parse(&html);
        scored(&doc, "", Flags::WEIGHT_CLASSES);
        assert_eq!(doc.select(".sidebar").length(), 2);
    }

    #[test]
    fn test_unlikely_roles_removed() {
        let doc = parse(r#"<html><body><div role="navigation">links</div><div>text</div></body></html>"#);
        scored(&doc, "", Flags::all());
        assert!(!doc.select("[role=navigation]").exists());
    }

    #[test]
    fn test_hidden_and_modal_removed() {
        let doc = parse(
            r#"<html><body><p style="display: none">gone</p><div aria-modal="true" role="dialog">modal</div><p hidden>x</p><p>stay</p></body></html>"#,
        );
        scored(&doc, "", Flags::empty());
        let body = doc.select("body").text();
        assert!(!body.contains("gone"));
        assert!(!body.contains("modal"));
        assert!(body.contains("stay"));
    }

    #[test]
    fn test_first_byline_taken_and_removed() {
        let doc = parse(
            r#"<html><body><p class="byline">By Jane Roe</p><p rel="author">Another</p></body></html>"#,
        );
        let result = scored(&doc, "", Flags::empty());
        assert_eq!(result.byline.as_deref(), Some("By Jane Roe"));
        assert!(!doc.select(".byline").exists());
        assert!(doc.select("[rel=author]").exists());
    }

    #[test]
    fn test_overlong_byline_ignored() {
        let doc = parse(&format!(r#"<html><body><p class="author">{}</p></body></html>"#, "x".repeat(120)));
        let result = scored(&doc, "", Flags::empty());
        assert!(result.byline.is_none());
        assert!(doc.select(".author").exists());
    }

    #[test]
    fn test_title_heading_skipped_but_kept() {
        let doc = parse("<html><body><h1>The Article Title</h1><h2>The Article Title</h2></body></html>");
        scored(&doc, "the article title", Flags::empty());
        assert!(doc.select("h1").exists());
        assert!(doc.select("h2").exists());
    }

    #[test]
    fn test_empty_structural_elements_removed() {
        let doc = parse("<html><body><div><br><hr></div><section> </section><h3></h3><p></p></body></html>");
        scored(&doc, "", Flags::empty());
        assert!(!doc.select("div").exists());
        assert!(!doc.select("section").exists());
        assert!(!doc.select("h3").exists());
        assert!(doc.select("p").exists());
    }

    #[test]
    fn test_phrasing_div_becomes_paragraph() {
        let doc = parse("<html><body><div>Some <b>inline</b> text</div></body></html>");
        scored(&doc, "", Flags::empty());
        assert!(!doc.select("div").exists());
        assert_eq!(doc.select("body > p").length(), 1);
    }

    #[test]
    fn test_div_with_single_paragraph_replaced() {
        let doc = parse("<html><body><div id=\"w\"><p>Only paragraph</p></div></body></html>");
        scored(&doc, "", Flags::empty());
        assert!(!doc.select("#w").exists());
        assert!(doc.select("body > p").exists());
    }

    #[test]
    fn test_mixed_div_wraps_phrasing_runs() {
        let doc = parse("<html><body><div>Loose text <i>here</i><ul><li>item</li></ul> tail </div></body></html>");
        scored(&doc, "", Flags::empty());
        let div = node(&doc, "div");
        let tags: Vec<String> = dom::element_children(&div).iter().map(dom::tag_name).collect();
        assert_eq!(tags, vec!["p", "ul", "p"]);
    }

    #[test]
    fn test_unlikely_inside_table_spared() {
        let doc = parse(r#"<html><body><table><tr><td><div class="comment">cell</div></td></tr></table></body></html>"#);
        scored(&doc, "", Flags::all());
        assert!(doc.select(".comment").exists() || doc.select("td p").exists());
    }
}

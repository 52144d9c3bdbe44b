//! Conditional cleaning.
//!
//! `form`, `fieldset`, `table`, `ul` and `div` elements of the article are
//! measured with [`NodeMetrics`] and dropped when they look like boilerplate:
//! image grids without text, link farms, input-heavy widgets, stray embeds.
//! Headings, substantial lists and text-rich blocks are kept.

use std::collections::HashSet;

use dom_query::{NodeId, NodeRef};
use regex::Regex;

use super::scoring::{class_weight, CLASS_WEIGHT};
use super::state::Flags;
use super::tables::non_link_text_len;
use super::tags::{EMBED_TAGS, HEADING_TAGS};
use crate::dom;
use crate::link_density::{has_important_link, link_density, text_density};
use crate::patterns::{AD_WORDS, LOADING_WORDS};
use crate::text::{char_len, comma_count};

/// Inputs of the removal decision that do not depend on the node.
#[derive(Debug, Clone, Copy)]
pub struct PruneContext<'a> {
    /// Active heuristics; class weights only count with `WEIGHT_CLASSES`.
    pub flags: Flags,
    /// Embed URLs that are never removed.
    pub video_regex: &'a Regex,
    /// Added to both link-density thresholds.
    pub link_density_modifier: f64,
    /// Spare nodes holding "read more"-style links.
    pub preserve_important_links: bool,
    /// Tables classified as data.
    pub data_tables: &'a HashSet<NodeId>,
}

/// Measurements of one conditionally-cleaned node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMetrics {
    /// `p` descendants.
    pub paragraphs: usize,
    /// `img` descendants.
    pub images: usize,
    /// `li` descendants.
    pub list_items: usize,
    /// `input` descendants.
    pub inputs: usize,
    /// Share of text inside headings.
    pub heading_density: f64,
    /// Embeds whose URL is not an allowed video.
    pub embeds: usize,
    /// Any embed pointing at an allowed video.
    pub allowed_embed: bool,
    /// Normalized text length in characters.
    pub content_length: usize,
    /// Characters outside links.
    pub non_link_text: usize,
    /// Link density.
    pub link_density: f64,
    /// A `ul`/`ol`, or a node whose text is more than 90% lists.
    pub is_list: bool,
    /// Inside a `figure`.
    pub in_figure: bool,
    /// Class/id weight.
    pub weight: f64,
    /// Commas in the text.
    pub commas: usize,
    /// An `h1`..`h3` descendant.
    pub has_major_heading: bool,
    /// A "read more"-style link descendant.
    pub has_important_link: bool,
    /// Whole text is an advertisement or loading label.
    pub placeholder_text: bool,
}

/// Whether `embed` points at an allowed video host.
pub(crate) fn is_allowed_embed(embed: &NodeRef, video_regex: &Regex) -> bool {
    if dom::attributes(embed).iter().any(|(_, value)| video_regex.is_match(value)) {
        return true;
    }
    dom::is_tag(embed, "object") && video_regex.is_match(&embed.inner_html())
}

impl NodeMetrics {
    /// Measure `node`.
    #[must_use]
    pub fn compute(node: &NodeRef, ctx: &PruneContext<'_>) -> Self {
        let text = dom::inner_text(node, true);
        let content_length = char_len(&text);
        let count = |tag: &str| dom::elements_by_tags(node, &[tag]).len();

        let mut is_list = dom::is_any_tag(node, &["ul", "ol"]);
        if !is_list && content_length > 0 {
            let list_length: usize = dom::elements_by_tags(node, &["ul", "ol"]).iter().map(dom::text_len).sum();
            is_list = list_length as f64 / content_length as f64 > 0.9;
        }

        let mut embeds = 0;
        let mut allowed_embed = false;
        for embed in dom::elements_by_tags(node, &EMBED_TAGS) {
            if is_allowed_embed(&embed, ctx.video_regex) {
                allowed_embed = true;
            } else {
                embeds += 1;
            }
        }

        Self {
            paragraphs: count("p"),
            images: count("img"),
            list_items: count("li"),
            inputs: count("input"),
            heading_density: text_density(node, &HEADING_TAGS),
            embeds,
            allowed_embed,
            content_length,
            non_link_text: non_link_text_len(node),
            link_density: link_density(node),
            is_list,
            in_figure: dom::has_ancestor_tag(node, "figure", 0, |_| true),
            weight: class_weight(node, ctx.flags),
            commas: comma_count(&text),
            has_major_heading: !dom::elements_by_tags(node, &["h1", "h2", "h3"]).is_empty(),
            has_important_link: has_important_link(node),
            placeholder_text: AD_WORDS.is_match(&text) || LOADING_WORDS.is_match(&text),
        }
    }

    /// Structure worth keeping regardless of the removal rules.
    fn is_preserved(&self, ctx: &PruneContext<'_>) -> bool {
        if self.commas >= 10 {
            return true;
        }
        if ctx.preserve_important_links && self.has_important_link {
            return true;
        }
        self.has_major_heading
            || (self.is_list && (self.list_items >= 3 || self.content_length > 80))
            || self.non_link_text >= 105
    }

    /// Name of the first removal rule that matches, if any.
    fn removal_reason(&self, ctx: &PruneContext<'_>) -> Option<&'static str> {
        let modifier = ctx.link_density_modifier;
        let p = self.paragraphs as f64;

        if !self.in_figure && self.images > 1 && p / (self.images as f64) < 0.5 {
            return Some("bad p to img ratio");
        }
        if !self.is_list && self.list_items > 2 * self.paragraphs && self.content_length < 50 {
            return Some("too many li's outside of a list");
        }
        if self.inputs > self.paragraphs / 3 {
            return Some("too many inputs per p");
        }
        if !self.is_list
            && !self.in_figure
            && self.heading_density < 0.9
            && self.content_length < 25
            && (self.images == 0 || self.images > 2)
        {
            return Some("suspiciously short");
        }
        if !self.is_list && self.weight < CLASS_WEIGHT && self.link_density > 0.3 + modifier {
            return Some("low weight and a little linky");
        }
        let long_list = self.is_list && self.list_items > 4;
        if self.weight >= CLASS_WEIGHT && self.link_density > 0.6 + modifier && !long_list {
            return Some("high weight and mostly links");
        }
        if (self.embeds == 1 && self.content_length < 75) || self.embeds > 1 {
            return Some("suspicious embed");
        }
        None
    }
}

/// Whether every element child of a list holds at most one element and
/// there is one image per item.
fn is_image_gallery(node: &NodeRef, metrics: &NodeMetrics) -> bool {
    if dom::element_children(node).iter().any(|c| dom::element_children(c).len() > 1) {
        return false;
    }
    metrics.images == metrics.list_items
}

/// Decide whether conditional cleaning removes `node`.
#[must_use]
pub fn should_remove_node(node: &NodeRef, ctx: &PruneContext<'_>) -> bool {
    let data_tables = ctx.data_tables;
    if dom::is_tag(node, "table") && data_tables.contains(&node.id) {
        return false;
    }
    if dom::has_ancestor_tag(node, "table", 0, |t| data_tables.contains(&t.id))
        || dom::has_ancestor_tag(node, "code", 0, |_| true)
    {
        return false;
    }
    if dom::elements_by_tags(node, &["table"]).iter().any(|t| data_tables.contains(&t.id)) {
        return false;
    }

    let metrics = NodeMetrics::compute(node, ctx);
    if metrics.weight < 0.0 {
        tracing::trace!(tag = %dom::tag_name(node), weight = metrics.weight, "negative class weight");
        return true;
    }
    if metrics.placeholder_text {
        return true;
    }
    if metrics.allowed_embed || metrics.is_preserved(ctx) {
        return false;
    }

    let Some(reason) = metrics.removal_reason(ctx) else {
        return false;
    };
    if metrics.is_list && is_image_gallery(node, &metrics) {
        return false;
    }
    tracing::trace!(tag = %dom::tag_name(node), reason, "conditionally removing node");
    true
}

//! Per-attempt extraction state.
//!
//! `Flags` select which heuristics run; `Candidates` holds content scores
//! keyed by node identity. Scores replace the
//! `readability.contentScore` expando of the browser algorithm with an
//! insertion-ordered map, so ties resolve the same way on every run.

use std::collections::HashMap;

use bitflags::bitflags;
use dom_query::NodeId;

bitflags! {
    /// Heuristics enabled for one extraction attempt.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// Remove nodes whose class/id look like boilerplate.
        const STRIP_UNLIKELYS = 0b001;
        /// Add class/id weights to candidate scores.
        const WEIGHT_CLASSES = 0b010;
        /// Run conditional cleaning on forms, tables, lists and divs.
        const CLEAN_CONDITIONALLY = 0b100;
    }
}

impl Flags {
    /// Flags cleared one per retry, in order.
    pub const RELAXATION_ORDER: [Flags; 3] =
        [Flags::STRIP_UNLIKELYS, Flags::WEIGHT_CLASSES, Flags::CLEAN_CONDITIONALLY];
}

impl Default for Flags {
    fn default() -> Self {
        Self::all()
    }
}

/// A scored candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInfo {
    /// Candidate node.
    pub id: NodeId,
    /// Accumulated content score.
    pub score: f64,
}

/// Candidate scores in first-seen order.
#[derive(Debug, Default)]
pub struct Candidates {
    entries: Vec<NodeInfo>,
    index: HashMap<NodeId, usize>,
}

impl Candidates {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` has been scored.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Score of `id`, if scored.
    #[must_use]
    pub fn score(&self, id: NodeId) -> Option<f64> {
        self.index.get(&id).map(|&i| self.entries[i].score)
    }

    /// Record `id` with `score` unless it is already present.
    /// Returns whether it was inserted.
    pub fn initialize(&mut self, id: NodeId, score: f64) -> bool {
        if self.contains(id) {
            return false;
        }
        self.index.insert(id, self.entries.len());
        self.entries.push(NodeInfo { id, score });
        true
    }

    /// Add `delta` to the score of `id`. No-op if `id` is not present.
    pub fn add(&mut self, id: NodeId, delta: f64) {
        if let Some(&i) = self.index.get(&id) {
            self.entries[i].score += delta;
        }
    }

    /// Overwrite the score of `id`. No-op if `id` is not present.
    pub fn set(&mut self, id: NodeId, score: f64) {
        if let Some(&i) = self.index.get(&id) {
            self.entries[i].score = score;
        }
    }

    /// Candidates in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeInfo> {
        self.entries.iter()
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was scored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn ids(doc: &Document, css: &str) -> Vec<NodeId> {
        doc.select(css).nodes().iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_flags_default_is_all() {
        let flags = Flags::default();
        assert!(flags.contains(Flags::STRIP_UNLIKELYS));
        assert!(flags.contains(Flags::WEIGHT_CLASSES));
        assert!(flags.contains(Flags::CLEAN_CONDITIONALLY));
    }

    #[test]
    fn test_relaxation_clears_in_order() {
        let mut flags = Flags::default();
        for flag in Flags::RELAXATION_ORDER {
            flags.remove(flag);
        }
        assert!(flags.is_empty());
    }

    #[test]
    fn test_candidates_keep_insertion_order() {
        let doc = Document::from("<div><p>a</p><p>b</p><p>c</p></div>");
        let p = ids(&doc, "p");
        let mut candidates = Candidates::new();
        assert!(candidates.initialize(p[2], 1.0));
        assert!(candidates.initialize(p[0], 2.0));
        assert!(!candidates.initialize(p[2], 9.0));
        candidates.add(p[2], 0.5);
        candidates.add(p[1], 100.0);

        let order: Vec<_> = candidates.iter().map(|c| (c.id, c.score)).collect();
        assert_eq!(order, vec![(p[2], 1.5), (p[0], 2.0)]);
        assert!(candidates.score(p[1]).is_none());
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_set_overwrites_score() {
        let doc = Document::from("<p>a</p>");
        let p = ids(&doc, "p");
        let mut candidates = Candidates::new();
        candidates.initialize(p[0], 10.0);
        candidates.set(p[0], 4.0);
        assert_eq!(candidates.score(p[0]), Some(4.0));
    }
}

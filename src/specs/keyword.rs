// src/specs/keyword.rs
//! Keyword-anchored fallback pass.
//!
//! Used for captions the layout pass could not read, typically because the
//! digits settled outside the layout window. Finds every node whose text
//! mentions the caption, then looks inside its parent, grandparent and
//! great-grandparent in turn. Within a container every digit fragment counts
//! (no geometric window), ghosts are collapsed with the tighter keyword
//! distance, and the first container level that assembles a valid number
//! wins.
//!
//! Zero handling is per counter (`StatKind::fallback_policy`): a whole
//! container reading `0` followers is far more likely a mid-roll capture
//! than a real value.
use crate::config::options::Thresholds;
use crate::core::{assemble, classify, dedup};
use crate::snapshot::{NodeId, Position, Snapshot};
use crate::stats::StatKind;

use super::{Attempts, ExtractionStrategy, Outcome, Resolution};

pub struct KeywordPass {
    thresholds: Thresholds,
}

impl KeywordPass {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Nodes mentioning the caption, in reading order. Twins (same spot,
    /// same text) are ordered by where their containers sit, never by id.
    fn anchors(&self, snap: &Snapshot, kind: StatKind) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = snap
            .elements()
            .filter(|(_, el)| el.trimmed().contains(kind.label()))
            .map(|(id, _)| id)
            .collect();
        ids.sort_by_cached_key(|&id| {
            let el = snap.element(id);
            let chain: Vec<Position> = snap
                .ancestors(id)
                .take(self.thresholds.max_ancestor_depth)
                .map(|a| snap.element(a).position)
                .collect();
            (el.position, el.text.clone(), chain)
        });
        ids
    }

    fn resolve_one(&self, snap: &Snapshot, kind: StatKind) -> Outcome {
        let mut tries = Attempts::default();
        let policy = kind.fallback_policy();

        for anchor in self.anchors(snap, kind) {
            tries.label();
            for depth in 1..=self.thresholds.max_ancestor_depth {
                let Some(container) = snap.ancestor(anchor, depth) else { break };

                let frags = classify::digit_fragments(snap, snap.descendants(container));
                if frags.is_empty() {
                    continue;
                }
                tries.digits();

                let kept = dedup::dedup(frags, self.thresholds.keyword_dup_distance);
                match assemble::assemble(&kept, policy) {
                    Ok(number) => {
                        logd!("Keyword: {kind} via node {anchor} depth {depth} -> {}", number.text);
                        return Outcome::Found(number);
                    }
                    Err(rejected) => {
                        logd!("Keyword: {kind} depth {depth} rejected {:?} ({})", rejected.text, rejected.reason);
                        tries.reject(rejected);
                    }
                }
            }
        }

        tries.into_outcome()
    }
}

impl Default for KeywordPass {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl ExtractionStrategy for KeywordPass {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn resolve(&self, snap: &Snapshot, wanted: &[StatKind]) -> Vec<Resolution> {
        wanted
            .iter()
            .map(|&kind| Resolution { kind, outcome: self.resolve_one(snap, kind) })
            .collect()
    }
}

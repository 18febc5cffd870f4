// src/specs/layout.rs
//! Whole-page layout pass.
//!
//! The widget renders every counter as a row of independently positioned
//! digit nodes directly above its caption. This pass classifies the snapshot
//! once and, per caption, keeps only the digits inside the window above it.
//!
//! Zero is a legitimate reading here (`AllowZero`): a fresh account really
//! can follow nobody.
use crate::config::options::Thresholds;
use crate::core::{assemble, associate, classify, dedup};
use crate::snapshot::Snapshot;
use crate::stats::{StatKind, ValidationPolicy};

use super::{Attempts, ExtractionStrategy, Outcome, Resolution};

pub struct LayoutPass {
    thresholds: Thresholds,
}

impl LayoutPass {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl Default for LayoutPass {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

impl ExtractionStrategy for LayoutPass {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn resolve(&self, snap: &Snapshot, wanted: &[StatKind]) -> Vec<Resolution> {
        let classified = classify::classify(snap);
        let t = &self.thresholds;

        wanted
            .iter()
            .map(|&kind| {
                let mut tries = Attempts::default();

                // Repeated captions are all anchors; first one that reads wins.
                for anchor in classified.anchors_for(kind) {
                    tries.label();
                    let cluster = associate::candidates(anchor.position, &classified.digits, t);
                    if cluster.is_empty() {
                        logd!("Layout: {kind}@{} has no digits in window", anchor.position);
                        continue;
                    }
                    let kept = dedup::dedup(cluster, t.layout_dup_distance);
                    match assemble::assemble(&kept, ValidationPolicy::AllowZero) {
                        Ok(number) => {
                            let parts: Vec<&str> = kept.iter().map(|f| f.text).collect();
                            logd!("Layout: {kind}: {parts:?} -> {}", number.text);
                            return Resolution { kind, outcome: Outcome::Found(number) };
                        }
                        Err(rejected) => {
                            logd!("Layout: {kind}@{} rejected {:?} ({})",
                                anchor.position, rejected.text, rejected.reason);
                            tries.reject(rejected);
                        }
                    }
                }

                Resolution { kind, outcome: tries.into_outcome() }
            })
            .collect()
    }
}

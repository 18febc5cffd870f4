// src/specs/mod.rs
//! # Extraction “specs” module
//!
//! Each spec here is one way of reading the counter widget out of a captured
//! [`Snapshot`]. They all answer the same question ("what number sits with
//! this caption?") from different evidence, and the orchestrator in
//! `extract` tries them in a fixed order.
//!
//! ## What lives here
//! - **`layout`**: whole-page geometric pass. Classifies every node once,
//!   pairs each caption with the digits in the window above it, collapses
//!   animation ghosts and assembles the number.
//! - **`keyword`**: scoped fallback. Finds caption text anywhere, walks up
//!   to a few enclosing containers and reads the digits inside each one.
//!
//! ## What does **not** live here
//! - **Capturing** pages or waiting for animations to settle (`provider`,
//!   `scrape`).
//! - **Merging** per-pass results and deciding what is still unresolved
//!   (`extract`).
//!
//! ## Conventions & invariants
//! - Pure: a spec only reads the snapshot; no IO, no clocks.
//! - Deterministic: candidates are sorted before anything order-sensitive
//!   happens, so permuting the snapshot never changes a result.
//! - A failed caption never aborts the pass; it is reported as a
//!   [`Outcome`] and the next caption is tried.
pub mod keyword;
pub mod layout;

pub use keyword::KeywordPass;
pub use layout::LayoutPass;

use crate::core::assemble::{Number, Rejected};
use crate::snapshot::Snapshot;
use crate::stats::StatKind;

/// How one counter fared in one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Found(Number),
    /// The caption never appeared.
    NoLabel,
    /// Caption present, but no digit fragments where they should be.
    NoCandidates,
    /// Digits were found and assembled, but every assembly failed validation.
    Rejected(Vec<Rejected>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub kind: StatKind,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn found(&self) -> Option<&Number> {
        match &self.outcome {
            Outcome::Found(n) => Some(n),
            _ => None,
        }
    }
}

/// One way of reading counters out of a snapshot.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;

    /// Resolve every counter in `wanted`, one `Resolution` each, same order.
    fn resolve(&self, snap: &Snapshot, wanted: &[StatKind]) -> Vec<Resolution>;
}

/// Tracks the best failure seen while trying several anchors for one counter.
#[derive(Default)]
pub(crate) struct Attempts {
    saw_label: bool,
    saw_digits: bool,
    rejected: Vec<Rejected>,
}

impl Attempts {
    pub(crate) fn label(&mut self) {
        self.saw_label = true;
    }

    pub(crate) fn digits(&mut self) {
        self.saw_digits = true;
    }

    pub(crate) fn reject(&mut self, r: Rejected) {
        self.saw_digits = true;
        self.rejected.push(r);
    }

    pub(crate) fn into_outcome(self) -> Outcome {
        if !self.rejected.is_empty() {
            Outcome::Rejected(self.rejected)
        } else if self.saw_label || self.saw_digits {
            Outcome::NoCandidates
        } else {
            Outcome::NoLabel
        }
    }
}

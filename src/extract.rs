// src/extract.rs
//! Orchestrates the extraction passes over one snapshot.
//!
//! ```text
//! LayoutPass (always) → FallbackPass (only unresolved counters) → Done
//! ```
//!
//! Nothing here fails: a counter that no pass can read ends up as
//! `StatValue::NotFound` and the reasons are collected as [`Issue`]s.
//! Whether a partial result is worth a fresh capture is the caller's call.
use thiserror::Error;

use crate::config::options::ExtractOptions;
use crate::core::assemble::RejectReason;
use crate::core::classify;
use crate::snapshot::Snapshot;
use crate::specs::{ExtractionStrategy, KeywordPass, LayoutPass, Outcome};
use crate::stats::{ExtractionResult, StatKind, StatValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    LayoutPass,
    FallbackPass,
    Done,
}

/// Why a counter (or the whole snapshot) came back empty-handed.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Issue {
    #[error("snapshot has no captions or digit fragments")]
    SnapshotEmpty,

    #[error("{0}: no readable digits after all passes")]
    LabelUnresolved(StatKind),

    #[error("{kind}: {pass} pass assembled {text:?} but it failed validation ({reason})")]
    AssemblyRejected {
        kind: StatKind,
        pass: &'static str,
        text: String,
        reason: RejectReason,
    },
}

/// Result plus diagnostics for one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub result: ExtractionResult,
    /// Which pass produced each resolved counter.
    pub resolved_by: Vec<(StatKind, &'static str)>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn pass_for(&self, kind: StatKind) -> Option<&'static str> {
        self.resolved_by.iter().find(|(k, _)| *k == kind).map(|(_, p)| *p)
    }
}

/// Layout pass, then the keyword fallback for whatever is left.
pub struct Extractor {
    layout: LayoutPass,
    fallback: Option<KeywordPass>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractOptions::default())
    }
}

impl Extractor {
    pub fn new(opts: &ExtractOptions) -> Self {
        Self {
            layout: LayoutPass::new(opts.thresholds),
            fallback: (!opts.layout_only).then(|| KeywordPass::new(opts.thresholds)),
        }
    }

    fn pass(&self, phase: Phase) -> Option<&dyn ExtractionStrategy> {
        match phase {
            Phase::LayoutPass => Some(&self.layout),
            Phase::FallbackPass => self.fallback.as_ref().map(|k| k as &dyn ExtractionStrategy),
            Phase::Done => None,
        }
    }

    pub fn extract(&self, snap: &Snapshot) -> ExtractionResult {
        self.extract_with_report(snap).result
    }

    pub fn extract_with_report(&self, snap: &Snapshot) -> Report {
        let mut report = Report::default();

        if classify::classify(snap).is_empty() {
            logd!("Extract: nothing classifiable in {} nodes", snap.len());
            report.issues.push(Issue::SnapshotEmpty);
            report.issues.extend(StatKind::ALL.into_iter().map(Issue::LabelUnresolved));
            return report;
        }

        let mut phase = Phase::LayoutPass;
        while phase != Phase::Done {
            let wanted = report.result.unresolved();
            if wanted.is_empty() {
                break;
            }
            if let Some(pass) = self.pass(phase) {
                logd!("Extract: {:?} ({}) for {:?}", phase, pass.name(), wanted);
                for res in pass.resolve(snap, &wanted) {
                    match res.outcome {
                        Outcome::Found(number) => {
                            report.result.set(res.kind, StatValue::Found(number.text));
                            report.resolved_by.push((res.kind, pass.name()));
                        }
                        Outcome::Rejected(rejections) => {
                            report.issues.extend(rejections.into_iter().map(|r| Issue::AssemblyRejected {
                                kind: res.kind,
                                pass: pass.name(),
                                text: r.text,
                                reason: r.reason,
                            }));
                        }
                        Outcome::NoLabel | Outcome::NoCandidates => {}
                    }
                }
            }
            phase = match phase {
                Phase::LayoutPass => Phase::FallbackPass,
                Phase::FallbackPass | Phase::Done => Phase::Done,
            };
        }

        for kind in report.result.unresolved() {
            report.issues.push(Issue::LabelUnresolved(kind));
        }
        report
    }
}

/// Read all four counters out of `snap` with default thresholds.
pub fn extract(snap: &Snapshot) -> ExtractionResult {
    Extractor::default().extract(snap)
}

/// Same as [`extract`], with diagnostics.
pub fn extract_with_report(snap: &Snapshot) -> Report {
    Extractor::default().extract_with_report(snap)
}

// src/core/classify.rs
use std::sync::OnceLock;

use regex::Regex;

use crate::snapshot::{NodeId, Position, Snapshot};
use crate::stats::StatKind;

// A lone digit, a lone separator, or a digit glued to its separator.
// Anything longer is a whole number that should not appear on this widget.
const DIGIT_FRAGMENT: &str = r"^[0-9,]{1,2}$";

fn digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DIGIT_FRAGMENT).expect("valid regex"))
}

pub fn is_digit_fragment(text: &str) -> bool {
    digit_re().is_match(text)
}

/// A caption naming one of the counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub id: NodeId,
    pub kind: StatKind,
    pub position: Position,
}

/// One rendered digit (or separator) with its trimmed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub id: NodeId,
    pub text: &'a str,
    pub position: Position,
}

#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub labels: Vec<Anchor>,
    pub digits: Vec<Fragment<'a>>,
}

impl Classified<'_> {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.digits.is_empty()
    }

    /// Anchors for one counter in reading order.
    pub fn anchors_for(&self, kind: StatKind) -> Vec<Anchor> {
        let mut out: Vec<Anchor> = self.labels.iter().filter(|a| a.kind == kind).copied().collect();
        out.sort_by_key(|a| a.position);
        out
    }
}

/// Split a snapshot into captions and digit fragments; everything else is dropped.
pub fn classify(snap: &Snapshot) -> Classified<'_> {
    let mut out = Classified::default();

    for (id, el) in snap.elements() {
        let text = el.trimmed();
        if text.is_empty() {
            continue;
        }
        if is_digit_fragment(text) {
            out.digits.push(Fragment { id, text, position: el.position });
        } else if let Some(kind) = StatKind::from_label(text) {
            out.labels.push(Anchor { id, kind, position: el.position });
        }
    }

    logd!("Classify: {} digit fragments, {} labels", out.digits.len(), out.labels.len());
    out
}

/// Digit fragments among the given nodes (grammar only, no geometry).
pub fn digit_fragments<I>(snap: &Snapshot, ids: I) -> Vec<Fragment<'_>>
where
    I: IntoIterator<Item = NodeId>,
{
    ids.into_iter()
        .filter_map(|id| {
            let el = snap.element(id);
            let text = el.trimmed();
            is_digit_fragment(text).then_some(Fragment { id, text, position: el.position })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Element;

    #[test]
    fn digit_grammar() {
        for ok in ["0", "7", ",", "1,", ",9", "12", ",,"] {
            assert!(is_digit_fragment(ok), "{ok:?}");
        }
        for bad in ["", "123", "1.2", "a", "1 ", "１", "-1", "1,2"] {
            assert!(!is_digit_fragment(bad), "{bad:?}");
        }
    }

    #[test]
    fn partitions_and_discards() {
        let snap = Snapshot::from(vec![
            Element::new("  Followers ", 500, 100),
            Element::new(" 4 ", 400, 90),
            Element::new("likes", 500, 300),
            Element::new("12,850", 400, 90),
            Element::new("   ", 1, 1),
            Element::new("Videos", 500, 700),
        ]);
        let c = classify(&snap);
        assert_eq!(c.digits.len(), 1);
        assert_eq!(c.digits[0].text, "4");
        let kinds: Vec<StatKind> = c.labels.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![StatKind::Followers, StatKind::Videos]);
    }

    #[test]
    fn anchors_sorted_by_reading_order() {
        let snap = Snapshot::from(vec![
            Element::new("Likes", 900, 10),
            Element::new("Likes", 300, 50),
        ]);
        let c = classify(&snap);
        let rows: Vec<i32> = c.anchors_for(StatKind::Likes).iter().map(|a| a.position.row).collect();
        assert_eq!(rows, vec![300, 900]);
        assert!(c.anchors_for(StatKind::Videos).is_empty());
    }
}

// src/core/dedup.rs
//
// Counting animations leave ghost copies of a digit a few units away from
// where it settles. Collapse them greedily in reading order: the first copy
// seen wins.
use crate::core::Fragment;
use crate::snapshot::Position;

/// True when both axis gaps are under `distance`.
pub fn is_near(a: Position, b: Position, distance: u32) -> bool {
    a.row.abs_diff(b.row) < distance && a.col.abs_diff(b.col) < distance
}

/// A ghost sits barely offset from a kept fragment and either repeats its
/// glyph or is knocked off its row (a mid-roll digit). Settled neighbours of
/// one counter share a row and may sit closer than the ghost distance.
pub fn is_ghost(kept: &Fragment<'_>, f: &Fragment<'_>, distance: u32) -> bool {
    is_near(kept.position, f.position, distance)
        && (kept.text == f.text || kept.position.row != f.position.row)
}

/// Sort by reading order and drop every ghost of an already kept fragment.
/// Ties on position are broken by text, so input order never matters.
pub fn dedup<'a>(mut frags: Vec<Fragment<'a>>, distance: u32) -> Vec<Fragment<'a>> {
    frags.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.text.cmp(b.text)));

    let mut kept: Vec<Fragment<'a>> = Vec::with_capacity(frags.len());
    for f in frags {
        if kept.iter().any(|k| is_ghost(k, &f, distance)) {
            logd!("Dedup: drop {:?}@{} as ghost", f.text, f.position);
            continue;
        }
        kept.push(f);
    }
    kept
}

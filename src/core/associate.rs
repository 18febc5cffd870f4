// src/core/associate.rs
//
// Which digits belong to a caption. The widget draws each counter directly
// above its caption, so a digit qualifies when it sits at or above the label
// row (within the vertical window) and close enough horizontally.
use crate::config::options::Thresholds;
use crate::core::Fragment;
use crate::snapshot::Position;

pub fn is_candidate(label: Position, digit: Position, t: &Thresholds) -> bool {
    let above = i64::from(label.row) - i64::from(digit.row);
    let across = (i64::from(label.col) - i64::from(digit.col)).abs();
    (0..=i64::from(t.max_rows_above)).contains(&above) && across <= i64::from(t.max_col_offset)
}

/// Candidates for one caption. Other captions' claims are ignored: a fragment
/// inside two windows is a candidate for both.
pub fn candidates<'a>(label: Position, digits: &[Fragment<'a>], t: &Thresholds) -> Vec<Fragment<'a>> {
    digits.iter().filter(|d| is_candidate(label, d.position, t)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn window_edges_inclusive() {
        let t = Thresholds::default();
        let label = p(500, 100);
        assert!(is_candidate(label, p(400, 300), &t)); // 100 up, 200 right
        assert!(is_candidate(label, p(400, -100), &t)); // 100 up, 200 left
        assert!(is_candidate(label, p(500, 100), &t)); // same spot
        assert!(!is_candidate(label, p(399, 100), &t)); // 101 up
        assert!(!is_candidate(label, p(450, 301), &t)); // 201 right
        assert!(!is_candidate(label, p(450, -101), &t)); // 201 left
        assert!(!is_candidate(label, p(501, 100), &t)); // below the caption
    }

    #[test]
    fn no_overflow_at_extremes() {
        let t = Thresholds::default();
        assert!(!is_candidate(p(i32::MAX, i32::MAX), p(i32::MIN, i32::MIN), &t));
        assert!(!is_candidate(p(i32::MIN, 0), p(i32::MAX, 0), &t));
    }

    #[test]
    fn shared_fragment_is_candidate_for_both() {
        let t = Thresholds::default();
        let digits = [Fragment { id: 0, text: "3", position: p(450, 200) }];
        assert_eq!(candidates(p(500, 100), &digits, &t).len(), 1);
        assert_eq!(candidates(p(500, 300), &digits, &t).len(), 1);
    }
}

// src/core/assemble.rs
use std::fmt;

use crate::core::Fragment;
use crate::stats::ValidationPolicy;

/// A validated reading: the text as rendered plus its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Number {
    pub text: String,
    pub value: u64,
}

/// Assembled text that did not validate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejected {
    pub text: String,
    pub reason: RejectReason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    NotNumeric,
    Overflow,
    Policy(ValidationPolicy),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Empty => f.write_str("no digits"),
            RejectReason::NotNumeric => f.write_str("not a number"),
            RejectReason::Overflow => f.write_str("too large"),
            RejectReason::Policy(p) => write!(f, "refused by {p:?}"),
        }
    }
}

/// Collapse comma runs and trim commas at both ends: `",,18,,"` → `"18"`.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_comma = false;
    for ch in raw.chars() {
        if ch == ',' {
            if !prev_comma {
                out.push(ch);
            }
            prev_comma = true;
        } else {
            out.push(ch);
            prev_comma = false;
        }
    }
    s!(out.trim_matches(','))
}

/// Validate normalized text as a non-negative integer under `policy`.
pub fn validate(text: String, policy: ValidationPolicy) -> Result<Number, Rejected> {
    let digits: String = text.chars().filter(|c| *c != ',').collect();

    let reason = if digits.is_empty() {
        RejectReason::Empty
    } else if !digits.bytes().all(|b| b.is_ascii_digit()) {
        RejectReason::NotNumeric
    } else {
        match digits.parse::<u64>() {
            Ok(value) if policy.accepts(value) => return Ok(Number { text, value }),
            Ok(_) => RejectReason::Policy(policy),
            Err(_) => RejectReason::Overflow,
        }
    };
    Err(Rejected { text, reason })
}

/// Concatenate fragments (already in reading order), normalize, validate.
pub fn assemble(frags: &[Fragment<'_>], policy: ValidationPolicy) -> Result<Number, Rejected> {
    let raw: String = frags.iter().map(|f| f.text).collect();
    validate(normalize(&raw), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Position;

    fn frags(texts: &[&'static str]) -> Vec<Fragment<'static>> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Fragment { id: i, text: *t, position: Position::new(0, i as i32 * 10) })
            .collect()
    }

    #[test]
    fn normalize_commas() {
        assert_eq!(normalize(",,18,,"), "18");
        assert_eq!(normalize("1,,234,,,567"), "1,234,567");
        assert_eq!(normalize(",,,"), "");
        assert_eq!(normalize("42"), "42");
    }

    #[test]
    fn keeps_separators_as_rendered() {
        let n = assemble(&frags(&["1", "2", ",", "8", "5", "0"]), ValidationPolicy::AllowZero).unwrap();
        assert_eq!(n, Number { text: s!("12,850"), value: 12_850 });

        // Odd grouping is not reformatted
        let n = assemble(&frags(&["1,", "28", ",5"]), ValidationPolicy::AllowZero).unwrap();
        assert_eq!(n.text, "1,28,5");
    }

    #[test]
    fn rejects() {
        let r = assemble(&frags(&[",", ","]), ValidationPolicy::AllowZero).unwrap_err();
        assert_eq!(r.reason, RejectReason::Empty);

        let r = assemble(&frags(&["0"]), ValidationPolicy::RequirePositive).unwrap_err();
        assert_eq!(r.reason, RejectReason::Policy(ValidationPolicy::RequirePositive));
        assert_eq!(r.text, "0");

        let r = validate(s!("99999999999999999999999"), ValidationPolicy::AllowZero).unwrap_err();
        assert_eq!(r.reason, RejectReason::Overflow);

        let r = validate(s!("+5"), ValidationPolicy::AllowZero).unwrap_err();
        assert_eq!(r.reason, RejectReason::NotNumeric);
    }

    #[test]
    fn zero_allowed_under_allow_zero() {
        let n = assemble(&frags(&["0"]), ValidationPolicy::AllowZero).unwrap();
        assert_eq!(n.value, 0);
    }
}

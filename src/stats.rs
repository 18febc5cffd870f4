// src/stats.rs
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::consts::NOT_FOUND;

/// The four counters the widget shows, in canonical output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatKind {
    Followers,
    Likes,
    Following,
    Videos,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Followers,
        StatKind::Likes,
        StatKind::Following,
        StatKind::Videos,
    ];

    /// Caption text exactly as rendered under the counter.
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Followers => "Followers",
            StatKind::Likes => "Likes",
            StatKind::Following => "Following",
            StatKind::Videos => "Videos",
        }
    }

    /// Output key (lower-cased label).
    pub fn key(self) -> &'static str {
        match self {
            StatKind::Followers => "followers",
            StatKind::Likes => "likes",
            StatKind::Following => "following",
            StatKind::Videos => "videos",
        }
    }

    /// Exact, case-sensitive caption match.
    pub fn from_label(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == text)
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Zero handling in the keyword-anchored pass. A zero follower or like
    /// count there almost always means the digits were read mid-animation.
    pub fn fallback_policy(self) -> ValidationPolicy {
        match self {
            StatKind::Followers | StatKind::Likes => ValidationPolicy::RequirePositive,
            StatKind::Following | StatKind::Videos => ValidationPolicy::AllowZero,
        }
    }

    pub fn plausibility(self, value: &StatValue) -> Plausibility {
        let Some(text) = value.as_found() else { return Plausibility::Missing };
        let Ok(n) = text.replace(',', "").parse::<u64>() else { return Plausibility::Invalid };
        let ok = match self {
            StatKind::Followers => n > 1000,
            StatKind::Likes => n > 100,
            StatKind::Following | StatKind::Videos => n <= 10_000,
        };
        if ok { Plausibility::LooksGood } else { Plausibility::CheckThis }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// When an assembled number counts as a real reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// `>= 0`
    AllowZero,
    /// `> 0`
    RequirePositive,
}

impl ValidationPolicy {
    pub fn accepts(self, n: u64) -> bool {
        match self {
            ValidationPolicy::AllowZero => true,
            ValidationPolicy::RequirePositive => n > 0,
        }
    }
}

/// One counter's reading: the digits as rendered (commas kept) or the sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatValue {
    Found(String),
    #[default]
    NotFound,
}

impl StatValue {
    pub fn as_found(&self) -> Option<&str> {
        match self {
            StatValue::Found(s) => Some(s),
            StatValue::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, StatValue::Found(_))
    }

    pub fn as_str(&self) -> &str {
        self.as_found().unwrap_or(NOT_FOUND)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// All four counters. Every key is always present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExtractionResult {
    values: [StatValue; 4],
}

impl ExtractionResult {
    pub fn get(&self, kind: StatKind) -> &StatValue {
        &self.values[kind.index()]
    }

    pub fn set(&mut self, kind: StatKind, value: StatValue) {
        self.values[kind.index()] = value;
    }

    pub fn is_resolved(&self, kind: StatKind) -> bool {
        self.get(kind).is_found()
    }

    pub fn unresolved(&self) -> Vec<StatKind> {
        StatKind::ALL.into_iter().filter(|k| !self.is_resolved(*k)).collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_found()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.resolved_count() == StatKind::ALL.len()
    }

    /// `(key, text)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, &StatValue)> {
        StatKind::ALL.into_iter().zip(self.values.iter())
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(StatKind::ALL.len()))?;
        for (kind, value) in self.iter() {
            map.serialize_entry(kind.key(), value)?;
        }
        map.end()
    }
}

/// Sanity read of a finished value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plausibility {
    LooksGood,
    CheckThis,
    Invalid,
    Missing,
}

impl fmt::Display for Plausibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Plausibility::LooksGood => "looks good",
            Plausibility::CheckThis => "check this",
            Plausibility::Invalid => "invalid format",
            Plausibility::Missing => "missing",
        })
    }
}

/// One user's row: the username followed by the four counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub username: String,
    pub stats: ExtractionResult,
}

impl Record {
    pub const HEADERS: [&'static str; 5] = ["username", "followers", "likes", "following", "videos"];

    pub fn headers() -> Vec<String> {
        Self::HEADERS.iter().map(|h| s!(*h)).collect()
    }

    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(Self::HEADERS.len());
        row.push(self.username.clone());
        row.extend(self.stats.iter().map(|(_, v)| s!(v.as_str())));
        row
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Self::HEADERS.len()))?;
        map.serialize_entry("username", &self.username)?;
        for (kind, value) in self.stats.iter() {
            map.serialize_entry(kind.key(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(StatKind::from_label("Likes"), Some(StatKind::Likes));
        assert_eq!(StatKind::from_label("likes"), None);
        assert_eq!(StatKind::from_label("Following"), Some(StatKind::Following));
    }

    #[test]
    fn default_result_is_total_and_unresolved() {
        let r = ExtractionResult::default();
        assert_eq!(r.iter().count(), 4);
        assert_eq!(r.unresolved(), StatKind::ALL.to_vec());
        let json = serde_json::to_value(&r).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for k in ["followers", "likes", "following", "videos"] {
            assert_eq!(obj[k], "Not found");
        }
    }

    #[test]
    fn policies() {
        assert!(ValidationPolicy::AllowZero.accepts(0));
        assert!(!ValidationPolicy::RequirePositive.accepts(0));
        assert!(ValidationPolicy::RequirePositive.accepts(1));
        assert_eq!(StatKind::Likes.fallback_policy(), ValidationPolicy::RequirePositive);
        assert_eq!(StatKind::Videos.fallback_policy(), ValidationPolicy::AllowZero);
    }

    #[test]
    fn plausibility_per_kind() {
        let v = |s: &str| StatValue::Found(s!(s));
        assert_eq!(StatKind::Followers.plausibility(&v("12,850")), Plausibility::LooksGood);
        assert_eq!(StatKind::Followers.plausibility(&v("900")), Plausibility::CheckThis);
        assert_eq!(StatKind::Likes.plausibility(&v("3,424")), Plausibility::LooksGood);
        assert_eq!(StatKind::Following.plausibility(&v("13")), Plausibility::LooksGood);
        assert_eq!(StatKind::Videos.plausibility(&v("10,001")), Plausibility::CheckThis);
        assert_eq!(StatKind::Videos.plausibility(&v("1x")), Plausibility::Invalid);
        assert_eq!(StatKind::Videos.plausibility(&StatValue::NotFound), Plausibility::Missing);
    }

    #[test]
    fn record_row_order() {
        let mut stats = ExtractionResult::default();
        stats.set(StatKind::Likes, StatValue::Found(s!("3,424")));
        let rec = Record { username: s!("someone"), stats };
        assert_eq!(rec.to_row(), vec!["someone", "Not found", "3,424", "Not found", "Not found"]);
    }
}

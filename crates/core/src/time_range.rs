//! # Time ranges
//!
//! A slot specification is a comma-separated list of `HH:MM-HH:MM` items.
//! Each item becomes a half-open [`TimeRange`]: touching boundaries do not
//! overlap, so `09:00-10:00` and `10:00-11:00` can both be booked.
//!
//! Times are compared as text. That ordering matches clock ordering only for
//! zero-padded 24-hour values, which is the format clients send.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        overlaps(self, other)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Parses a slot specification into its ranges.
///
/// Items that do not split into exactly two parts on `-` are dropped without
/// an error, so `"bad-format"` still yields a (meaningless) range while
/// `"0900"` and `"09:00-10:00-11:00"` yield nothing. Input order and
/// duplicates are kept.
pub fn parse_slots(spec: &str) -> Vec<TimeRange> {
    spec.split(',')
        .map(str::trim)
        .filter_map(|item| {
            let mut parts = item.split('-');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(start), Some(end), None) => Some(TimeRange::new(start, end)),
                _ => None,
            }
        })
        .collect()
}

/// Half-open interval test on the textual times.
pub fn overlaps(a: &TimeRange, b: &TimeRange) -> bool {
    !(a.end <= b.start || a.start >= b.end)
}

/// Returns the first `(candidate, existing)` pair that overlaps.
pub fn find_conflict<'a>(
    candidates: &'a [TimeRange],
    existing: &'a [TimeRange],
) -> Option<(&'a TimeRange, &'a TimeRange)> {
    candidates.iter().find_map(|candidate| {
        existing
            .iter()
            .find(|taken| overlaps(candidate, taken))
            .map(|taken| (candidate, taken))
    })
}

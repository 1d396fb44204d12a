use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive calendar range. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which ledger records a computation looks at.
///
/// `AllTime` is a real policy, not an empty range: every sale, expense and
/// yield is included regardless of its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFilter {
    #[default]
    AllTime,
    Between(DateRange),
}

impl DateFilter {
    /// Builds a filter from two optional bounds. A missing bound on either side
    /// means no filtering at all.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => DateFilter::Between(DateRange::new(start, end)),
            _ => DateFilter::AllTime,
        }
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            DateFilter::AllTime => true,
            DateFilter::Between(range) => range.contains(date),
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFilter::AllTime => f.write_str("all time"),
            DateFilter::Between(range) => write!(f, "{} to {}", range.start, range.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let filter = DateFilter::from_bounds(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));
        assert!(filter.includes(date(2024, 1, 1)));
        assert!(filter.includes(date(2024, 1, 31)));
        assert!(!filter.includes(date(2023, 12, 31)));
        assert!(!filter.includes(date(2024, 2, 1)));
    }

    #[test]
    fn a_missing_bound_means_all_time() {
        assert_eq!(DateFilter::from_bounds(Some(date(2024, 1, 1)), None), DateFilter::AllTime);
        assert_eq!(DateFilter::from_bounds(None, Some(date(2024, 1, 1))), DateFilter::AllTime);
        assert!(DateFilter::AllTime.includes(date(1970, 1, 1)));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let filter = DateFilter::from_bounds(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
        assert!(!filter.includes(date(2024, 1, 15)));
    }
}

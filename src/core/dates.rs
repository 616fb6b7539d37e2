use super::error::SplitError;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::{max, min};
use std::fmt;

/// An inclusive range of days. A missing `end` means the range runs on forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from an inclusive end, failing if `start` is after `end`.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, SplitError> {
        match end {
            Some(end) if start > end => Err(SplitError::InvalidRange { start, end }),
            _ => Ok(DateRange { start, end }),
        }
    }

    /// Create a range from an exclusive end, normalized to the inclusive day before it.
    ///
    /// Errors report the normalized inclusive end, so a zero-length range
    /// starting on the 1st reads as ending on the day before.
    pub fn with_end_exclusive(start: NaiveDate, end_exclusive: NaiveDate) -> Result<Self, SplitError> {
        match end_exclusive.pred_opt() {
            Some(end) => DateRange::new(start, Some(end)),
            None => Err(SplitError::InvalidRange {
                start,
                end: end_exclusive,
            }),
        }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: Some(day),
        }
    }

    pub fn unbounded(start: NaiveDate) -> Self {
        DateRange { start, end: None }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Move the end later. `None` makes the range open ended.
    pub(super) fn extend_to(&mut self, end: Option<NaiveDate>) {
        self.end = match (self.end, end) {
            (Some(current), Some(end)) => Some(current.max(end)),
            _ => None,
        };
    }

    /// Number of days covered, counting both ends.
    pub fn duration_days(&self) -> Result<i64, SplitError> {
        match self.end {
            Some(end) => Ok((end - self.start).num_days() + 1),
            None => Err(SplitError::UnboundedRange { start: self.start }),
        }
    }

    /// The days covered by both ranges, if any.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = max(self.start, other.start);
        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(min(a, b)),
            (Some(a), None) | (None, Some(a)) => Some(a),
            (None, None) => None,
        };
        match end {
            Some(end) if end < start => None,
            _ => Some(DateRange { start, end }),
        }
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day >= self.start && self.end.is_none_or(|end| day <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) if end == self.start => write!(f, "{}", self.start),
            Some(end) => write!(f, "{} to {}", self.start, end),
            None => write!(f, "{} onwards", self.start),
        }
    }
}

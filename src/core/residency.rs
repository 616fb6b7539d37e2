use super::dates::DateRange;
use super::error::SplitError;
use super::house::House;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Per-person residencies, merged so that no day is counted twice.
#[derive(Debug, Clone, Default)]
pub struct ResidencyLedger {
    spans: HashMap<String, Vec<DateRange>>,
}

impl ResidencyLedger {
    pub fn new(house: &House) -> Self {
        let spans = house
            .people
            .iter()
            .map(|person| (person.name.clone(), merge_ranges(&person.residencies)))
            .collect();
        ResidencyLedger { spans }
    }

    /// Merged, sorted, non-overlapping residencies for a person.
    pub fn spans(&self, name: &str) -> &[DateRange] {
        self.spans.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days within `range` on which the person was resident.
    pub fn resident_days(&self, name: &str, range: &DateRange) -> Result<i64, SplitError> {
        self.spans(name)
            .iter()
            .filter_map(|span| span.intersect(range))
            .map(|overlap| overlap.duration_days())
            .sum()
    }

    /// Fraction of `range` (0 to 1) during which the person was resident.
    ///
    /// Fails for an unbounded `range`. Names not in the house are never resident.
    pub fn residency_fraction(&self, name: &str, range: &DateRange) -> Result<Decimal, SplitError> {
        let total = range.duration_days()?;
        let resident = self.resident_days(name, range)?;
        Ok(Decimal::from(resident) / Decimal::from(total))
    }

    pub fn is_resident_on(&self, name: &str, day: chrono::NaiveDate) -> bool {
        self.spans(name).iter().any(|span| span.contains_day(day))
    }
}

/// Union of ranges as a sorted list of disjoint ranges. Adjacent ranges are joined.
fn merge_ranges(ranges: &[DateRange]) -> Vec<DateRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| r.start());

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        let Some(last) = merged.last_mut() else {
            merged.push(range);
            continue;
        };
        match last.end() {
            // open ended: swallows everything after it
            None => {}
            Some(end) if end.succ_opt().is_none_or(|next| range.start() <= next) => {
                last.extend_to(range.end().map(|other| end.max(other)));
            }
            Some(_) => merged.push(range),
        }
    }
    merged
}

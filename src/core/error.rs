use chrono::NaiveDate;

/// Errors raised while building the house or splitting the ledger.
///
/// Every variant is fatal: a ledger with one bad item produces no report.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("date range starting {start} has no end, so it has no duration")]
    UnboundedRange { start: NaiveDate },
    #[error("date range starting {start} has both 'end' and 'end_exclusive'")]
    AmbiguousRangeEnd { start: NaiveDate },
    #[error("{expense}: only {eligible} eligible people, house needs at least {required}")]
    InsufficientResidents {
        expense: String,
        eligible: usize,
        required: usize,
    },
    #[error("{expense}: unknown person '{name}'")]
    UnknownPerson { expense: String, name: String },
    #[error("{expense}: nobody was resident during {range}")]
    NoEligiblePeople { expense: String, range: String },
    #[error("bill '{description}' has neither 'for_dates' nor 'on_date'")]
    MissingBillDates { description: String },
    #[error("duplicate person in house: {0}")]
    DuplicatePerson(String),
    #[error("min_people must be at least 1, got {0}")]
    InvalidMinPeople(i64),
    #[error("{expense}: amount is too large to split")]
    AmountOverflow { expense: String },
    #[error("{context}: {source}")]
    Within {
        context: String,
        #[source]
        source: Box<SplitError>,
    },
}

impl SplitError {
    /// Attach where the error happened, e.g. the person or bill being read.
    pub fn within(self, context: impl Into<String>) -> Self {
        SplitError::Within {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with any location context stripped.
    #[cfg(test)]
    pub fn root(&self) -> &SplitError {
        match self {
            SplitError::Within { source, .. } => source.root(),
            other => other,
        }
    }
}

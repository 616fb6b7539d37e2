//! The YAML input document: a house definition and its ledger.

use super::dates::DateRange;
use super::error::SplitError;
use super::house::{Bill, Expense, House, Payment, Person, SharedCost};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Input root
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub house: HouseInput,
    /// Each item is a single-key map, e.g. `- bill: {...}`
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    #[schemars(with = "Vec<LedgerItem>")]
    pub ledger: Vec<LedgerItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HouseInput {
    pub name: String,
    /// Minimum number of people any cost may be split between
    pub min_people: i64,
    pub people: Vec<PersonInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PersonInput {
    /// Unique within the house
    pub name: String,
    #[serde(default)]
    pub residencies: Vec<DateRangeInput>,
}

/// Date range with an inclusive `end`, an exclusive `end_exclusive`, or
/// neither for an open-ended range.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DateRangeInput {
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_exclusive: Option<NaiveDate>,
}

impl DateRangeInput {
    pub fn to_range(&self) -> Result<DateRange, SplitError> {
        match (self.end, self.end_exclusive) {
            (Some(_), Some(_)) => Err(SplitError::AmbiguousRangeEnd { start: self.start }),
            (Some(end), None) => DateRange::new(self.start, Some(end)),
            (None, Some(end_exclusive)) => DateRange::with_end_exclusive(self.start, end_exclusive),
            (None, None) => Ok(DateRange::unbounded(self.start)),
        }
    }
}

/// A single ledger entry, keyed by its kind.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LedgerItem {
    Bill(BillInput),
    SharedCost(SharedCostInput),
    Payment(PaymentInput),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct BillInput {
    pub description: String,
    pub paid_by: String,
    /// Period the bill covers
    #[serde(default)]
    pub for_dates: Option<DateRangeInput>,
    /// Day the bill was paid; the covered period when `for_dates` is absent
    #[serde(default)]
    pub on_date: Option<NaiveDate>,
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SharedCostInput {
    pub description: String,
    pub paid_by: String,
    pub on_date: NaiveDate,
    /// Defaults to everyone resident on `on_date`
    #[serde(default)]
    pub shared_amongst: Option<Vec<String>>,
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PaymentInput {
    pub payer: String,
    pub to: String,
    pub on_date: NaiveDate,
    #[schemars(with = "f64")]
    pub amount: Decimal,
}

impl Document {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    pub fn from_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Build the validated house.
    pub fn load_house(&self) -> Result<House, SplitError> {
        let people = self
            .house
            .people
            .iter()
            .map(|p| {
                let residencies = p
                    .residencies
                    .iter()
                    .map(DateRangeInput::to_range)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| e.within(format!("person '{}' residency", p.name)))?;
                Ok::<_, SplitError>(Person {
                    name: p.name.clone(),
                    residencies,
                })
            })
            .collect::<Result<Vec<_>, SplitError>>()?;
        House::new(self.house.name.clone(), self.house.min_people, people)
    }

    /// Build the ledger in input order.
    pub fn load_ledger(&self) -> Result<Vec<Expense>, SplitError> {
        self.ledger.iter().map(LedgerItem::to_expense).collect()
    }
}

impl LedgerItem {
    pub fn to_expense(&self) -> Result<Expense, SplitError> {
        let expense = match self {
            LedgerItem::Bill(bill) => {
                let for_dates = match (&bill.for_dates, bill.on_date) {
                    (Some(range), _) => range
                        .to_range()
                        .map_err(|e| e.within(format!("bill '{}'", bill.description)))?,
                    (None, Some(day)) => DateRange::single_day(day),
                    (None, None) => {
                        return Err(SplitError::MissingBillDates {
                            description: bill.description.clone(),
                        })
                    }
                };
                Expense::Bill(Bill {
                    description: bill.description.clone(),
                    paid_by: bill.paid_by.clone(),
                    for_dates,
                    paid_on: bill.on_date,
                    amount: bill.amount,
                })
            }
            LedgerItem::SharedCost(cost) => Expense::SharedCost(SharedCost {
                description: cost.description.clone(),
                paid_by: cost.paid_by.clone(),
                on_date: cost.on_date,
                // an empty list means everyone, as if it were omitted
                shared_amongst: cost.shared_amongst.clone().filter(|names| !names.is_empty()),
                amount: cost.amount,
            }),
            LedgerItem::Payment(payment) => Expense::Payment(Payment {
                payer: payment.payer.clone(),
                to: payment.to.clone(),
                on_date: payment.on_date,
                amount: payment.amount,
            }),
        };
        Ok(expense)
    }
}

/// Stable sort by each item's date, keeping input order for same-day items.
pub fn sort_by_date(ledger: &mut [Expense]) {
    ledger.sort_by_key(Expense::date);
}

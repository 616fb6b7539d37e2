use super::dates::DateRange;
use super::error::SplitError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

/// Someone who lived in the house for one or more stretches of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub name: String,
    pub residencies: Vec<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct House {
    pub name: String,
    /// Fewest people any expense may be split between
    pub min_people: usize,
    pub people: Vec<Person>,
}

impl House {
    pub fn new(name: String, min_people: i64, people: Vec<Person>) -> Result<Self, SplitError> {
        let min_people = usize::try_from(min_people)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(SplitError::InvalidMinPeople(min_people))?;

        let mut seen = HashSet::new();
        for person in &people {
            if !seen.insert(person.name.as_str()) {
                return Err(SplitError::DuplicatePerson(person.name.clone()));
            }
        }

        Ok(House {
            name,
            min_people,
            people,
        })
    }

    pub fn person(&self, name: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.name == name)
    }

    /// Look up a person referenced by an expense.
    pub fn require_person(&self, name: &str, expense: &Expense) -> Result<&Person, SplitError> {
        self.person(name).ok_or_else(|| SplitError::UnknownPerson {
            expense: expense.label(),
            name: name.to_string(),
        })
    }
}

/// A cost split by how long each person lived in the house during `for_dates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub description: String,
    pub paid_by: String,
    pub for_dates: DateRange,
    /// Day the bill was paid, if known
    pub paid_on: Option<NaiveDate>,
    pub amount: Decimal,
}

/// A one-off cost split evenly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedCost {
    pub description: String,
    pub paid_by: String,
    pub on_date: NaiveDate,
    /// Explicit sharers; `None` means everyone resident on `on_date`
    pub shared_amongst: Option<Vec<String>>,
    pub amount: Decimal,
}

/// Money handed directly from one person to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub payer: String,
    pub to: String,
    pub on_date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expense {
    Bill(Bill),
    SharedCost(SharedCost),
    Payment(Payment),
}

impl Expense {
    pub fn amount(&self) -> Decimal {
        match self {
            Expense::Bill(bill) => bill.amount,
            Expense::SharedCost(cost) => cost.amount,
            Expense::Payment(payment) => payment.amount,
        }
    }

    /// Date the item is filed under when ordering the ledger.
    pub fn date(&self) -> NaiveDate {
        match self {
            Expense::Bill(bill) => bill.paid_on.unwrap_or(bill.for_dates.start()),
            Expense::SharedCost(cost) => cost.on_date,
            Expense::Payment(payment) => payment.on_date,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expense::Bill(_) => "Bill",
            Expense::SharedCost(_) => "Shared Cost",
            Expense::Payment(_) => "Payment",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Expense::Bill(bill) => bill.description.clone(),
            Expense::SharedCost(cost) => cost.description.clone(),
            Expense::Payment(payment) => format!("{} to {}", payment.payer, payment.to),
        }
    }

    /// Short human-readable reference used in error messages.
    pub fn label(&self) -> String {
        match self {
            Expense::Bill(bill) => format!("bill '{}' for {}", bill.description, bill.for_dates),
            Expense::SharedCost(cost) => {
                format!("shared cost '{}' on {}", cost.description, cost.on_date)
            }
            Expense::Payment(payment) => format!(
                "payment from {} to {} on {}",
                payment.payer, payment.to, payment.on_date
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn person(name: &str) -> Person {
        Person {
            name: name.to_string(),
            residencies: vec![DateRange::unbounded(date("2014-01-01"))],
        }
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = House::new("Flat".to_string(), 1, vec![person("Bob"), person("Bob")]);
        assert_eq!(result, Err(SplitError::DuplicatePerson("Bob".to_string())));
    }

    #[test]
    fn min_people_must_be_positive() {
        assert_eq!(
            House::new("Flat".to_string(), 0, vec![person("Bob")]),
            Err(SplitError::InvalidMinPeople(0))
        );
        assert_eq!(
            House::new("Flat".to_string(), -2, vec![person("Bob")]),
            Err(SplitError::InvalidMinPeople(-2))
        );
    }

    #[test]
    fn unknown_person_carries_expense_context() {
        let house = House::new("Flat".to_string(), 1, vec![person("Bob")]).unwrap();
        let payment = Expense::Payment(Payment {
            payer: "Bob".to_string(),
            to: "Carol".to_string(),
            on_date: date("2014-02-01"),
            amount: dec!(10),
        });

        let err = house.require_person("Carol", &payment).unwrap_err();
        assert_eq!(
            err.to_string(),
            "payment from Bob to Carol on 2014-02-01: unknown person 'Carol'"
        );
    }

    #[test]
    fn bill_date_falls_back_to_range_start() {
        let bill = Bill {
            description: "Water".to_string(),
            paid_by: "Bob".to_string(),
            for_dates: DateRange::new(date("2014-01-01"), Some(date("2014-03-31"))).unwrap(),
            paid_on: None,
            amount: dec!(90),
        };
        assert_eq!(Expense::Bill(bill.clone()).date(), date("2014-01-01"));

        let paid = Bill {
            paid_on: Some(date("2014-04-10")),
            ..bill
        };
        assert_eq!(Expense::Bill(paid).date(), date("2014-04-10"));
    }
}

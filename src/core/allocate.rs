//! Splitting a single ledger item into per-person dues.
//!
//! Dues are positive when a person owes the house and negative when the house
//! owes them. The dues of any one item always sum to exactly zero.

use super::dates::DateRange;
use super::error::SplitError;
use super::house::{Bill, Expense, House, Payment, SharedCost};
use super::residency::ResidencyLedger;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// Signed amount per person name.
pub type Dues = BTreeMap<String, Decimal>;

/// Decimal places of the smallest currency unit.
const CURRENCY_DP: u32 = 2;

/// Compute what each person owes for one ledger item.
pub fn dues_for_expense(
    expense: &Expense,
    house: &House,
    residency: &ResidencyLedger,
) -> Result<Dues, SplitError> {
    match expense {
        Expense::Bill(bill) => dues_for_bill(bill, expense, house, residency),
        Expense::SharedCost(cost) => dues_for_shared_cost(cost, expense, house, residency),
        Expense::Payment(payment) => dues_for_payment(payment, expense, house),
    }
}

fn dues_for_bill(
    bill: &Bill,
    expense: &Expense,
    house: &House,
    residency: &ResidencyLedger,
) -> Result<Dues, SplitError> {
    house.require_person(&bill.paid_by, expense)?;
    let range = &bill.for_dates;
    let total_days = range.duration_days().map_err(|e| e.within(expense.label()))?;

    // Every fraction shares the denominator `total_days`, so weighting by
    // resident days gives the same normalized split without truncation.
    let mut weights = Vec::new();
    for person in &house.people {
        let fraction = residency
            .residency_fraction(&person.name, range)
            .map_err(|e| e.within(expense.label()))?;
        if fraction.is_zero() {
            continue;
        }
        let days = residency
            .resident_days(&person.name, range)
            .map_err(|e| e.within(expense.label()))?;
        log::debug!(
            "{}: {} resident {} of {} days ({})",
            expense.label(),
            person.name,
            days,
            total_days,
            fraction.round_dp(4)
        );
        weights.push((person.name.as_str(), Decimal::from(days)));
    }

    check_eligible(expense, house, range, weights.len())?;
    split_dues(expense, &bill.paid_by, bill.amount, &weights)
}

fn dues_for_shared_cost(
    cost: &SharedCost,
    expense: &Expense,
    house: &House,
    residency: &ResidencyLedger,
) -> Result<Dues, SplitError> {
    house.require_person(&cost.paid_by, expense)?;

    let sharers: Vec<&str> = match &cost.shared_amongst {
        Some(names) => {
            let mut sharers: Vec<&str> = Vec::with_capacity(names.len());
            for name in names {
                let person = house.require_person(name, expense)?;
                if !sharers.contains(&person.name.as_str()) {
                    sharers.push(person.name.as_str());
                }
            }
            sharers
        }
        None => house
            .people
            .iter()
            .filter(|p| residency.is_resident_on(&p.name, cost.on_date))
            .map(|p| p.name.as_str())
            .collect(),
    };

    check_eligible(
        expense,
        house,
        &DateRange::single_day(cost.on_date),
        sharers.len(),
    )?;
    let weights: Vec<(&str, Decimal)> = sharers.into_iter().map(|name| (name, Decimal::ONE)).collect();
    split_dues(expense, &cost.paid_by, cost.amount, &weights)
}

fn dues_for_payment(payment: &Payment, expense: &Expense, house: &House) -> Result<Dues, SplitError> {
    house.require_person(&payment.payer, expense)?;
    house.require_person(&payment.to, expense)?;

    let mut dues = Dues::new();
    *dues.entry(payment.payer.clone()).or_insert(Decimal::ZERO) -= payment.amount;
    *dues.entry(payment.to.clone()).or_insert(Decimal::ZERO) += payment.amount;
    Ok(dues)
}

fn check_eligible(
    expense: &Expense,
    house: &House,
    range: &DateRange,
    eligible: usize,
) -> Result<(), SplitError> {
    if eligible == 0 {
        return Err(SplitError::NoEligiblePeople {
            expense: expense.label(),
            range: range.to_string(),
        });
    }
    if eligible < house.min_people {
        return Err(SplitError::InsufficientResidents {
            expense: expense.label(),
            eligible,
            required: house.min_people,
        });
    }
    Ok(())
}

fn split_dues(
    expense: &Expense,
    paid_by: &str,
    amount: Decimal,
    weights: &[(&str, Decimal)],
) -> Result<Dues, SplitError> {
    split_weighted(amount, weights, paid_by)
        .and_then(|shares| dues_from_shares(paid_by, amount, shares))
        .ok_or_else(|| SplitError::AmountOverflow {
            expense: expense.label(),
        })
}

/// Split `amount` in proportion to `weights`, rounding each share half-up to
/// the currency unit.
///
/// Rounding residue goes to `paid_by` when they are one of the sharers,
/// otherwise to the sharer with the largest share (earliest on ties), so the
/// shares always add up to `amount`. `weights` must be non-empty with a
/// positive total. Returns `None` if `amount * weight` does not fit in a
/// `Decimal`.
pub fn split_weighted(
    amount: Decimal,
    weights: &[(&str, Decimal)],
    paid_by: &str,
) -> Option<Vec<(String, Decimal)>> {
    let total = weights
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, w)| acc.checked_add(*w))?;
    let mut shares = weights
        .iter()
        .map(|(name, weight)| {
            let mut share = amount
                .checked_mul(*weight)?
                .checked_div(total)?
                .round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero);
            share.rescale(CURRENCY_DP);
            Some((name.to_string(), share))
        })
        .collect::<Option<Vec<_>>>()?;

    let allocated = shares
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, share)| acc.checked_add(*share))?;
    let residue = amount.checked_sub(allocated)?;
    if !residue.is_zero() {
        let index = shares
            .iter()
            .position(|(name, _)| name == paid_by)
            .or_else(|| largest_share(&shares));
        if let Some(index) = index {
            log::debug!("assigning rounding residue {} to {}", residue, shares[index].0);
            shares[index].1 = shares[index].1.checked_add(residue)?;
        }
    }
    Some(shares)
}

fn largest_share(shares: &[(String, Decimal)]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, (_, share)) in shares.iter().enumerate() {
        if best.is_none_or(|b| share.abs() > shares[b].1.abs()) {
            best = Some(i);
        }
    }
    best
}

fn dues_from_shares(paid_by: &str, amount: Decimal, shares: Vec<(String, Decimal)>) -> Option<Dues> {
    let mut dues = Dues::new();
    dues.insert(paid_by.to_string(), -amount);
    for (name, share) in shares {
        let due = dues.entry(name).or_insert(Decimal::ZERO);
        *due = due.checked_add(share)?;
    }
    Some(dues)
}

use super::allocate::{dues_for_expense, Dues};
use super::error::SplitError;
use super::house::{Expense, House};
use super::residency::ResidencyLedger;
use rust_decimal::Decimal;
use serde::Serialize;

/// Running net dues per person across the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    totals: Dues,
}

impl BalanceSheet {
    /// Start everyone in the house at zero.
    pub fn for_house(house: &House) -> Self {
        let totals = house
            .people
            .iter()
            .map(|p| (p.name.clone(), Decimal::ZERO))
            .collect();
        BalanceSheet { totals }
    }

    /// Add one item's dues, failing if a balance no longer fits in a `Decimal`.
    pub fn apply(&mut self, expense: &Expense, dues: &Dues) -> Result<(), SplitError> {
        for (name, amount) in dues {
            let total = self.totals.entry(name.clone()).or_insert(Decimal::ZERO);
            *total = total
                .checked_add(*amount)
                .ok_or_else(|| SplitError::AmountOverflow {
                    expense: expense.label(),
                })?;
        }
        Ok(())
    }

    /// Sum over everyone; zero for any consistent ledger.
    pub fn total(&self) -> Option<Decimal> {
        self.totals
            .values()
            .try_fold(Decimal::ZERO, |acc, total| acc.checked_add(*total))
    }

    pub fn totals(&self) -> &Dues {
        &self.totals
    }
}

/// One ledger item with what it cost each person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerLine {
    pub expense: Expense,
    pub dues: Dues,
    /// Balances after this item
    pub running_total: Dues,
}

/// Final balances plus the per-item breakdown, in ledger order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub house: String,
    pub balances: Dues,
    pub lines: Vec<LedgerLine>,
}

/// Split every ledger item and accumulate the results.
///
/// Any error aborts the whole computation.
pub fn compute(house: &House, ledger: &[Expense]) -> Result<SplitReport, SplitError> {
    let residency = ResidencyLedger::new(house);
    let mut sheet = BalanceSheet::for_house(house);
    let mut lines = Vec::with_capacity(ledger.len());

    for expense in ledger {
        let dues = dues_for_expense(expense, house, &residency)?;
        log::debug!("{} {}: {:?}", expense.kind(), expense.label(), dues);
        sheet.apply(expense, &dues)?;
        lines.push(LedgerLine {
            expense: expense.clone(),
            dues,
            running_total: sheet.totals().clone(),
        });
    }

    log::info!(
        "Split {} ledger items between {} people",
        lines.len(),
        house.people.len()
    );
    debug_assert_eq!(sheet.total(), Some(Decimal::ZERO), "balances do not sum to zero");

    Ok(SplitReport {
        house: house.name.clone(),
        balances: sheet.totals().clone(),
        lines,
    })
}

//! Report command - per-item dues and final balances for a house

use crate::cmd::read_document;
use crate::core::{compute, sort_by_date, Dues, SplitReport};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::{io, path::PathBuf};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// YAML file describing the house and its ledger ("-" for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Order ledger items by date instead of input order
    #[arg(long)]
    sort_by_date: bool,

    /// Only show dues for this person
    #[arg(short, long)]
    person: Option<String>,

    /// Output as JSON instead of formatted tables
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output as CSV, one row per item and person
    #[arg(long)]
    csv: bool,
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let document = read_document(&self.file)?;
        let house = document.load_house()?;
        let mut ledger = document.load_ledger()?;
        if self.sort_by_date {
            sort_by_date(&mut ledger);
        }

        if let Some(name) = &self.person {
            if house.person(name).is_none() {
                anyhow::bail!("unknown person: {}", name);
            }
        }

        let report = compute(&house, &ledger)?;
        let report = match &self.person {
            Some(name) => only_person(report, name),
            None => report,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        } else if self.csv {
            write_csv(&due_rows(&report))
        } else {
            print_tables(&report);
            Ok(())
        }
    }
}

/// Row for the per-item dues table and CSV output
#[derive(Debug, Clone, Tabled, Serialize)]
struct DueRow {
    #[tabled(rename = "#")]
    item: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Person")]
    person: String,
    #[tabled(rename = "Dues")]
    dues: String,
    /// Person's balance after this item
    #[tabled(rename = "Running Total")]
    running_total: String,
}

#[derive(Debug, Clone, Tabled)]
struct BalanceRow {
    #[tabled(rename = "Person")]
    person: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn due_rows(report: &SplitReport) -> Vec<DueRow> {
    report
        .lines
        .iter()
        .enumerate()
        .flat_map(|(i, line)| {
            line.dues
                .iter()
                .filter(|(_, dues)| !dues.is_zero())
                .map(move |(person, dues)| DueRow {
                    item: i + 1,
                    date: line.expense.date().format("%Y-%m-%d").to_string(),
                    kind: line.expense.kind().to_string(),
                    description: line.expense.description(),
                    amount: format_money(line.expense.amount()),
                    person: person.clone(),
                    dues: format_money(*dues),
                    running_total: format_money(
                        line.running_total.get(person).copied().unwrap_or_default(),
                    ),
                })
        })
        .collect()
}

fn balance_rows(balances: &Dues) -> Vec<BalanceRow> {
    balances
        .iter()
        .map(|(person, balance)| BalanceRow {
            person: person.clone(),
            balance: format_money(*balance),
            status: balance_status(*balance).to_string(),
        })
        .collect()
}

fn print_tables(report: &SplitReport) {
    println!();
    println!("HOUSE: {}", report.house);
    println!();

    let rows = due_rows(report);
    if rows.is_empty() {
        println!("No ledger items found");
    } else {
        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(4..5)).with(Alignment::right()))
            .with(Modify::new(Columns::new(6..8)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    println!();
    println!("BALANCES");
    let table = Table::new(balance_rows(&report.balances))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..2)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

fn write_csv(rows: &[DueRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Restrict a report to one person's dues and balance.
fn only_person(report: SplitReport, name: &str) -> SplitReport {
    let keep = |dues: &Dues| -> Dues {
        dues.iter()
            .filter(|(person, _)| person.as_str() == name)
            .map(|(person, amount)| (person.clone(), *amount))
            .collect()
    };
    SplitReport {
        balances: keep(&report.balances),
        lines: report
            .lines
            .into_iter()
            .filter(|line| line.dues.contains_key(name))
            .map(|mut line| {
                line.dues = keep(&line.dues);
                line.running_total = keep(&line.running_total);
                line
            })
            .collect(),
        house: report.house,
    }
}

fn balance_status(balance: Decimal) -> &'static str {
    if balance.is_sign_positive() && !balance.is_zero() {
        "owes"
    } else if balance.is_sign_negative() && !balance.is_zero() {
        "is owed"
    } else {
        "settled"
    }
}

fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

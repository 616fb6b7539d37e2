//! Validate command - check a house document without printing the full report

use crate::cmd::read_document;
use crate::core::{compute, Document, SplitError};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// YAML file describing the house and its ledger ("-" for stdin)
    #[arg(short, long)]
    file: PathBuf,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    house: String,
    people: usize,
    ledger_items: usize,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let document = read_document(&self.file)?;
        let result = check(&document);

        let output = ValidationOutput {
            house: document.house.name.clone(),
            people: document.house.people.len(),
            ledger_items: document.ledger.len(),
            valid: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&output);
        }

        // Exit with code 1 if the ledger cannot be split
        if !output.valid {
            std::process::exit(1);
        }
        Ok(())
    }
}

fn check(document: &Document) -> Result<(), SplitError> {
    let house = document.load_house()?;
    let ledger = document.load_ledger()?;
    compute(&house, &ledger)?;
    Ok(())
}

fn print_text(output: &ValidationOutput) {
    println!();
    println!(
        "VALIDATION RESULTS ({}, {} people, {} ledger items)",
        output.house, output.people, output.ledger_items
    );
    println!();

    match &output.error {
        None => println!("\u{2713} No issues found."),
        Some(error) => {
            println!("\u{26A0} Ledger cannot be split:");
            println!("     {}", error);
        }
    }
}

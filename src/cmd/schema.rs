//! Schema command - print the expected input format

use crate::core::Document;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the YAML input document
    JsonSchema,
    /// Annotated example document
    Example,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(Document);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Example => print!("{}", EXAMPLE_DOCUMENT),
        }
        Ok(())
    }
}

const EXAMPLE_DOCUMENT: &str = r#"house:
  name: Example House
  min_people: 2
  people:
    - name: Alice
      residencies:
        - start: 2014-01-01              # no end: still living here
    - name: Bob
      residencies:
        - start: 2014-01-01
          end: 2014-03-31                # inclusive
        - start: 2014-06-01
          end_exclusive: 2014-07-01      # exclusive
ledger:
  - bill:                                # split by days resident
      description: Electricity
      paid_by: Alice
      for_dates: { start: 2014-01-01, end: 2014-01-31 }
      on_date: 2014-02-03
      amount: 100.00
  - shared_cost:                         # split evenly
      description: Dinner
      paid_by: Bob
      on_date: 2014-01-10
      shared_amongst: [Alice, Bob]       # omit for everyone resident that day
      amount: 51.00
  - payment:
      payer: Bob
      to: Alice
      on_date: 2014-02-10
      amount: 20.00
"#;

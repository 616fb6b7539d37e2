use clap::{Parser, Subcommand};

mod cmd;
mod core;

/// Split household bills fairly between the people who lived there
#[derive(Parser, Debug)]
#[command(name = "splitbills", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split the ledger and show what everyone owes
    Report(cmd::report::ReportCommand),
    /// Check that a house document can be split
    Validate(cmd::validate::ValidateCommand),
    /// Print the input document format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report(report) => report.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}

pub mod report;
pub mod schema;
pub mod validate;

use crate::core::Document;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read the house document (YAML) from a file, or stdin with "-"
pub fn read_document(path: &Path) -> anyhow::Result<Document> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<Document> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);
    let document = Document::from_reader(reader)
        .with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "Read house '{}' with {} ledger items",
        document.house.name,
        document.ledger.len()
    );
    Ok(document)
}

fn read_from_stdin() -> anyhow::Result<Document> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;

    if buffer.trim().is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let document = Document::from_str(&buffer).context("parsing stdin")?;
    Ok(document)
}

//! E2E tests for the report, validate and schema commands

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Test that the report shows every item and the final balances
#[test]
fn report_tables() {
    let output = run(&["report", "-f", "tests/data/house.yaml"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("Elm Street"));
    assert!(stdout.contains("Internet"));
    assert!(stdout.contains("Groceries"));
    assert!(stdout.contains("Carol to Alice"));
    assert!(stdout.contains("Running Total"));
    assert!(stdout.contains("BALANCES"));
    assert!(stdout.contains("-11.46"));
    assert!(stdout.contains("is owed"));
}

/// Test JSON output balances: residency-weighted bill, even split, payment
#[test]
fn report_json_balances() {
    let output = run(&["report", "-f", "tests/data/house.yaml", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report output is JSON");

    assert_eq!(json["house"], "Elm Street");
    assert_eq!(json["balances"]["Alice"], "-11.46");
    assert_eq!(json["balances"]["Bob"], "11.46");
    assert_eq!(json["balances"]["Carol"], "0.00");

    let lines = json["lines"].as_array().expect("lines array");
    assert_eq!(lines.len(), 3);
    // Internet: 31 + 31 + 16 resident days
    assert_eq!(lines[0]["dues"]["Bob"], "36.96");
    assert_eq!(lines[0]["dues"]["Carol"], "19.08");
    assert_eq!(lines[1]["dues"]["Alice"], "25.50");
    assert_eq!(lines[2]["expense"]["type"], "payment");
}

/// Test that sorting by date reorders the ledger but not the balances
#[test]
fn report_sorted_by_date() {
    let output = run(&["report", "-f", "tests/data/house.yaml", "--json", "--sort-by-date"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("report output is JSON");
    let lines = json["lines"].as_array().expect("lines array");
    assert_eq!(lines[0]["expense"]["type"], "shared_cost");
    assert_eq!(lines[1]["expense"]["type"], "bill");
    assert_eq!(json["balances"]["Bob"], "11.46");
}

/// Test CSV output has one row per item and person
#[test]
fn report_csv() {
    let output = run(&["report", "-f", "tests/data/house.yaml", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.starts_with("item,date,kind,description,amount,person,dues,running_total"));
    // 3 bill rows, 2 shared cost rows, 2 payment rows
    assert_eq!(stdout.lines().count(), 1 + 3 + 2 + 2);
}

/// Test filtering to a single person
#[test]
fn report_person_filter() {
    let output = run(&["report", "-f", "tests/data/house.yaml", "--csv", "--person", "Carol"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("Carol"));
    assert!(!stdout.contains("Bob,"));

    let output = run(&["report", "-f", "tests/data/house.yaml", "--person", "Mallory"]);
    assert!(!output.status.success());
}

/// Test that an under-rented period fails the whole report
#[test]
fn report_fails_when_under_rented() {
    let output = run(&["report", "-f", "tests/data/under_rented.yaml"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("only 1 eligible people"));
}

#[test]
fn validate_ok() {
    let output = run(&["validate", "-f", "tests/data/house.yaml"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("No issues found"));
}

#[test]
fn validate_reports_error() {
    let output = run(&["validate", "-f", "tests/data/under_rented.yaml", "--json"]);
    assert!(!output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("validate output is JSON");
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().unwrap().contains("bill 'Water'"));
}

#[test]
fn schema_describes_document() {
    let output = run(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"title\": \"Document\""));
    assert!(stdout.contains("min_people"));
    assert!(stdout.contains("shared_amongst"));
}

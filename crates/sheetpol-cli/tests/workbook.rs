//! Workbook file tests
//!
//! Run the whole pipeline against a real `.xlsx` file checked in under
//! `tests/fixtures`, where ports and row markers are numeric cells.

use std::path::PathBuf;

use sheetpol_cli::pipeline::{run, ConvertOptions};
use sheetpol_cli::reader::{TabularSource, WorkbookReader};
use sheetpol_common::yaml::parse_documents;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_workbook_reads_first_sheet_as_text() {
    let grid = WorkbookReader::new(fixture("payments.xlsx"))
        .read_grid()
        .unwrap();

    assert_eq!(grid.row_count(), 7);
    assert_eq!(grid.cell(0, 0), "Network access for team payments");
    assert_eq!(grid.cell(1, 0), "namespace: payments");
    assert_eq!(grid.cell(2, 0), "1");
    assert_eq!(grid.cell(2, 4), "");
    assert_eq!(grid.cell(3, 5), "53");
    assert_eq!(grid.cell(5, 4), "Registry.Example.COM");
}

/// Story: an operator points the tool at their workbook and finds one YAML
/// file per namespace next to the chosen output directory.
#[test]
fn test_run_converts_workbook_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = ConvertOptions {
        output_dir: dir.path().to_path_buf(),
        ..ConvertOptions::default()
    };

    let path = run(&fixture("payments.xlsx"), &options).unwrap();

    assert_eq!(path, dir.path().join("payments.yaml"));
    let yaml = std::fs::read_to_string(&path).unwrap();
    let docs = parse_documents(&yaml).unwrap();
    let names: Vec<_> = docs
        .iter()
        .map(|d| d["metadata"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["payments-default", "payments-api", "payments-worker"]
    );

    // numeric port cells render as plain port numbers
    let api = &docs[1]["spec"];
    assert_eq!(
        api["ingress"][0]["toPorts"][0]["ports"][0]["port"].as_str(),
        Some("8080")
    );
    assert_eq!(
        api["egress"][1]["toFQDNs"][0]["matchName"].as_str(),
        Some("registry.example.com")
    );
    assert!(api["egress"][0]["toPorts"][0]["ports"][0]
        .get("protocol")
        .is_none());

    let worker = &docs[2]["spec"]["egress"][0];
    assert_eq!(
        worker["toCIDRSet"][0]["cidr"].as_str(),
        Some("10.20.0.0/16")
    );
    assert_eq!(
        worker["toPorts"][0]["ports"][0]["port"].as_str(),
        Some("514")
    );
}

#[test]
fn test_run_reports_missing_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let options = ConvertOptions {
        output_dir: dir.path().to_path_buf(),
        ..ConvertOptions::default()
    };

    let err = run(&fixture("absent.xlsx"), &options).unwrap_err();

    assert_eq!(err.exit_status(), 1);
    assert!(err.to_string().contains("absent.xlsx"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

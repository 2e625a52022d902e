#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn fields(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

// ── coerce_value ──────────────────────────────────────────────

#[test]
fn test_coerce_value_basic() {
    assert_eq!(coerce_value("100.50"), dec!(100.50));
    assert_eq!(coerce_value("42"), dec!(42));
}

#[test]
fn test_coerce_value_with_currency() {
    assert_eq!(coerce_value("$1,234.56"), dec!(1234.56));
}

#[test]
fn test_coerce_value_scientific() {
    assert_eq!(coerce_value("1e3"), dec!(1000));
}

#[test]
fn test_coerce_value_empty_is_zero() {
    assert_eq!(coerce_value(""), Decimal::ZERO);
    assert_eq!(coerce_value("   "), Decimal::ZERO);
}

#[test]
fn test_coerce_value_invalid_is_zero() {
    assert_eq!(coerce_value("not_a_number"), Decimal::ZERO);
}

// ── parse_row ─────────────────────────────────────────────────

#[test]
fn test_parse_row_income() {
    let row = parse_row(&fields(&["Salary", "income", "5000", "Job"])).unwrap();
    assert_eq!(row.title, "Salary");
    assert_eq!(row.kind, TransactionType::Income);
    assert_eq!(row.value, dec!(5000));
    assert_eq!(row.category, "Job");
    assert_eq!(row.signed_value(), dec!(5000));
}

#[test]
fn test_parse_row_outcome_signed_negative() {
    let row = parse_row(&fields(&["Rent", "outcome", "1200", "Housing"])).unwrap();
    assert_eq!(row.signed_value(), dec!(-1200));
}

#[test]
fn test_parse_row_unknown_type_dropped() {
    assert!(parse_row(&fields(&["Move", "transfer", "10", "Bank"])).is_none());
    assert!(parse_row(&fields(&["Move", "Income", "10", "Bank"])).is_none());
    assert!(parse_row(&fields(&["Move", "", "10", "Bank"])).is_none());
}

#[test]
fn test_parse_row_short_record() {
    assert!(parse_row(&fields(&["Only title"])).is_none());
    let row = parse_row(&fields(&["Tip", "income"])).unwrap();
    assert_eq!(row.value, Decimal::ZERO);
    assert_eq!(row.category, "");
}

// ── CsvImporter::load ─────────────────────────────────────────

#[test]
fn test_load_skips_header() {
    let csv = "title,type,value,category\nSalary,income,5000,Job\nRent,outcome,1200,Housing\n";
    let file = make_csv_file(csv);
    let rows = CsvImporter::load(file.path()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].title, "Salary");
    assert_eq!(rows[1].title, "Rent");
}

#[test]
fn test_load_header_is_skipped_even_if_it_looks_like_data() {
    let csv = "Loan,income,100,Bank\nSalary,income,5000,Job\n";
    let file = make_csv_file(csv);
    let rows = CsvImporter::load(file.path()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Salary");
}

#[test]
fn test_load_trims_fields() {
    let csv = "title, type, value, category\n  Loan , income ,  1500 ,  Others  \n";
    let file = make_csv_file(csv);
    let rows = CsvImporter::load(file.path()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Loan");
    assert_eq!(rows[0].kind, TransactionType::Income);
    assert_eq!(rows[0].value, dec!(1500));
    assert_eq!(rows[0].category, "Others");
}

#[test]
fn test_load_drops_unknown_types_keeps_order() {
    let csv = "title,type,value,category\n\
               A,income,1,X\n\
               B,transfer,2,X\n\
               C,outcome,3,Y\n\
               D,refund,4,Z\n";
    let file = make_csv_file(csv);
    let rows = CsvImporter::load(file.path()).unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[test]
fn test_load_quoted_fields() {
    let csv = "title,type,value,category\n\"Coffee, large\",outcome,4.50,\"Food, Drinks\"\n";
    let file = make_csv_file(csv);
    let rows = CsvImporter::load(file.path()).unwrap();
    assert_eq!(rows[0].title, "Coffee, large");
    assert_eq!(rows[0].category, "Food, Drinks");
}

#[test]
fn test_load_header_only() {
    let file = make_csv_file("title,type,value,category\n");
    assert!(CsvImporter::load(file.path()).unwrap().is_empty());
}

#[test]
fn test_load_empty_file() {
    let file = make_csv_file("");
    assert!(CsvImporter::load(file.path()).unwrap().is_empty());
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvImporter::load(&dir.path().join("nope.csv")).unwrap_err();
    assert!(!err.is_user_facing());
}

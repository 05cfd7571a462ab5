use folioscan_core::TransactionKind;
use folioscan_ingest::{ParseOptions, PlainTextSource, StatementParser};
use rust_decimal::Decimal;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("cams_statement.txt")
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Full statement: headers, footers, page markers and stamp-duty rows mixed in.
#[test]
fn test_parse_fixture_statement() {
    let parser = StatementParser::new(ParseOptions::default()).unwrap();
    let parsed = parser
        .parse_source(&PlainTextSource::new(fixture_path()))
        .expect("fixture should be readable");

    assert!(parsed.issues.is_empty(), "unexpected issues: {:?}", parsed.issues);
    assert_eq!(parsed.records.len(), 6);

    let first = &parsed.records[0];
    assert_eq!(first.instrument_name, "Aditya Birla Sun Life Liquid Fund - Growth-Direct Plan");
    assert_eq!(first.instrument_id, "INF209K01VA3");
    assert_eq!(first.account_id, "1039837274");
    assert_eq!(first.date, "26-Apr-2020");
    assert_eq!(first.amount, dec("360000.00"));
    assert_eq!(first.units, dec("1122.052"));

    let redemption = &parsed.records[2];
    assert_eq!(redemption.transaction_kind, TransactionKind::Sell);
    assert_eq!(redemption.amount, dec("50000.00"));
    assert_eq!(redemption.units, dec("150.123"));
    assert_eq!(redemption.balance_units, dec("1575.806"));

    let uti: Vec<_> = parsed
        .records
        .iter()
        .filter(|r| r.instrument_id == "INF789FC12T1")
        .collect();
    assert_eq!(uti.len(), 2);
    assert!(uti.iter().all(|r| r.account_id == "599321413667 / 0"));
    assert_eq!(uti[1].balance_units, dec("86737.464"));

    let segregated = parsed.records.last().unwrap();
    assert_eq!(segregated.instrument_id, "INF090I01SG1");
    assert_eq!(
        segregated.instrument_name,
        "Franklin India Low Duration Fund - Segregated Portfolio 1 - Direct"
    );
    assert_eq!(segregated.account_id, "599321413667 / 0");
    assert_eq!(segregated.transaction_kind, TransactionKind::Buy);
    assert_eq!(segregated.amount, Decimal::ZERO);
    assert_eq!(segregated.nav, Decimal::ZERO);
    assert_eq!(segregated.units, dec("1245.733"));
}

#[test]
fn test_records_follow_document_order() {
    let parser = StatementParser::new(ParseOptions::default()).unwrap();
    let text = std::fs::read_to_string(fixture_path()).unwrap();
    let records = parser.parse_text(&text).into_records();

    let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(
        dates,
        vec![
            "26-Apr-2020",
            "21-Mar-2021",
            "21-Mar-2021",
            "19-Oct-2022",
            "26-Jun-2023",
            "24-Jan-2020",
        ]
    );
}

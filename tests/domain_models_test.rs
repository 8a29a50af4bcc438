use std::collections::HashMap;

use pocket_ledger::models::*;
use pocket_ledger::utils::{parse_amount, parse_record_id, validate_recent_limit};
use time::UtcOffset;
use time::macros::datetime;

#[test]
fn serde_record_defaults_missing_description() {
    let json = r#"{"id":3,"date":"2024-02-16T10:00:00+08:00","amount":15.5,"category":"Food"}"#;
    let record: Record = serde_json::from_str(json).unwrap();
    assert_eq!(record.id, 3);
    assert_eq!(record.amount, 15.5);
    assert_eq!(record.category, "Food");
    assert_eq!(record.description, "");
    assert!(record.timestamp().is_some());
}

#[test]
fn record_timestamp_requires_offset() {
    let mut record = Record {
        id: 1,
        date: "2024-02-16T10:00:00.123456".to_string(),
        amount: 1.0,
        category: "Food".to_string(),
        description: String::new(),
    };
    assert!(record.timestamp().is_none());

    record.date = "2024-02-16 10:00:00".to_string();
    assert!(record.timestamp().is_none());

    record.date = "2024-02-16T10:00:00.123456Z".to_string();
    assert!(record.timestamp().is_some());
}

#[test]
fn serde_document_without_counter_gets_one() {
    let json = r#"{"records":[{"id":4,"date":"x","amount":1.0,"category":"Food","description":""}]}"#;
    let stored: StoredLedger = serde_json::from_str(json).unwrap();
    let document = stored.into_document(UtcOffset::UTC);
    assert_eq!(document.next_id, 5);
}

#[test]
fn serde_empty_legacy_array() {
    let stored: StoredLedger = serde_json::from_str("[]").unwrap();
    let document = stored.into_document(UtcOffset::UTC);
    assert_eq!(document, LedgerDocument::default());
    assert_eq!(document.next_id, 1);
}

#[test]
fn legacy_local_dates_are_pinned_to_the_offset() {
    let json = r#"[
        {"id": 1, "date": "2024-05-01T10:00:00.123456", "amount": 1.0, "category": "Food"},
        {"id": 2, "date": "2024-05-01T10:00:00", "amount": 1.0, "category": "Food"},
        {"id": 3, "date": "2024-05-01T10:00:00Z", "amount": 1.0, "category": "Food"},
        {"id": 4, "date": "yesterday", "amount": 1.0, "category": "Food"}
    ]"#;
    let stored: StoredLedger = serde_json::from_str(json).unwrap();
    let offset = UtcOffset::from_hms(8, 0, 0).unwrap();
    let document = stored.into_document(offset);

    let stamps: Vec<_> = document.records.iter().map(Record::timestamp).collect();
    assert_eq!(
        stamps,
        vec![
            Some(datetime!(2024-05-01 10:00:00.123456 +8)),
            Some(datetime!(2024-05-01 10:00:00 +8)),
            Some(datetime!(2024-05-01 10:00:00 UTC)),
            None,
        ]
    );
    assert_eq!(document.records[3].date, "yesterday");
}

#[test]
fn current_layout_dates_are_left_alone() {
    let json = r#"{"next_id": 2, "records": [
        {"id": 1, "date": "2024-05-01T10:00:00", "amount": 1.0, "category": "Food", "description": ""}
    ]}"#;
    let stored: StoredLedger = serde_json::from_str(json).unwrap();
    let document = stored.into_document(UtcOffset::UTC);
    assert_eq!(document.records[0].date, "2024-05-01T10:00:00");
}

#[test]
fn period_from_name() {
    assert_eq!(Period::from_name("day"), Period::Day);
    assert_eq!(Period::from_name(" Week "), Period::Week);
    assert_eq!(Period::from_name("MONTH"), Period::Month);
    assert_eq!(Period::from_name("year"), Period::Year);
    assert_eq!(Period::from_name("all"), Period::All);
    assert_eq!(Period::from_name("fortnight"), Period::All);
    assert_eq!(Period::Month.as_str(), "month");
}

#[test]
fn serde_period_lowercase() {
    assert_eq!(serde_json::to_string(&Period::Year).unwrap(), r#""year""#);
    let period: Period = serde_json::from_str(r#""week""#).unwrap();
    assert_eq!(period, Period::Week);
}

#[test]
fn summary_categories_by_amount_orders_descending() {
    let summary = Summary {
        total: 60.0,
        count: 4,
        by_category: HashMap::from([
            ("Food".to_string(), 20.0),
            ("Rent".to_string(), 30.0),
            ("Fuel".to_string(), 5.0),
            ("Dining".to_string(), 5.0),
        ]),
    };

    assert_eq!(
        summary.categories_by_amount(),
        vec![("Rent", 30.0), ("Food", 20.0), ("Dining", 5.0), ("Fuel", 5.0)]
    );
    assert!(!summary.is_empty());
    assert!(Summary::default().is_empty());
}

#[test]
fn parse_amount_accepts_chat_input() {
    assert_eq!(parse_amount("15.50").unwrap(), 15.5);
    assert_eq!(parse_amount(" 100 ").unwrap(), 100.0);
    assert_eq!(parse_amount("$7").unwrap(), 7.0);

    for bad in ["abc", "", "-5", "0", "inf", "NaN"] {
        let err = parse_amount(bad).unwrap_err();
        assert!(err.is_validation(), "input {:?}", bad);
    }
}

#[test]
fn parse_record_id_accepts_plain_and_hash() {
    assert_eq!(parse_record_id("5").unwrap(), 5);
    assert_eq!(parse_record_id("#12").unwrap(), 12);
    assert!(parse_record_id("0").is_err());
    assert!(parse_record_id("-3").is_err());
    assert!(parse_record_id("five").is_err());
}

#[test]
fn recent_limit_defaults_and_caps() {
    assert_eq!(validate_recent_limit(0), 10);
    assert_eq!(validate_recent_limit(3), 3);
    assert_eq!(validate_recent_limit(10_000), 100);
}

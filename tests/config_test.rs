use std::collections::HashMap;
use std::path::PathBuf;

use pocket_ledger::config::{Config, parse_utc_offset};
use time::UtcOffset;

fn config_from(pairs: &[(&str, &str)]) -> Result<Config, String> {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn test_defaults_with_only_token() {
    let config = config_from(&[("BOT_TOKEN", "123:abc")]).expect("config");

    assert_eq!(config.bot_token, "123:abc");
    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert_eq!(config.storage.preferred, PathBuf::from("/data"));
    assert_eq!(config.storage.fallback, PathBuf::from("."));
    assert_eq!(config.admin_chat_id, None);
    assert_eq!(config.utc_offset, None);
}

#[test]
fn test_missing_token_is_an_error() {
    let err = config_from(&[("PORT", "9000")]).unwrap_err();
    assert!(err.contains("BOT_TOKEN"));

    let err = config_from(&[("BOT_TOKEN", "  ")]).unwrap_err();
    assert!(err.contains("BOT_TOKEN"));
}

#[test]
fn test_telegram_token_alias_is_accepted() {
    let config = config_from(&[("TELEGRAM_BOT_TOKEN", "456:def")]).expect("config");
    assert_eq!(config.bot_token, "456:def");
}

#[test]
fn test_overrides_are_applied() {
    let config = config_from(&[
        ("BOT_TOKEN", "t"),
        ("HOST", "127.0.0.1"),
        ("PORT", "3000"),
        ("DATA_DIR", "/mnt/volume"),
        ("FALLBACK_DATA_DIR", "ledgers"),
        ("ADMIN_ID", "-100123"),
        ("LEDGER_UTC_OFFSET", "+08:00"),
    ])
    .expect("config");

    assert_eq!(config.bind_address(), "127.0.0.1:3000");
    assert_eq!(config.storage.preferred, PathBuf::from("/mnt/volume"));
    assert_eq!(config.storage.fallback, PathBuf::from("ledgers"));
    assert_eq!(config.admin_chat_id, Some(-100123));
    assert_eq!(config.offset(), UtcOffset::from_hms(8, 0, 0).unwrap());
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = config_from(&[("BOT_TOKEN", "t"), ("PORT", "eighty")]).unwrap_err();
    assert!(err.contains("PORT"));

    let err = config_from(&[("BOT_TOKEN", "t"), ("ADMIN_ID", "me")]).unwrap_err();
    assert!(err.contains("ADMIN_ID"));

    let err = config_from(&[("BOT_TOKEN", "t"), ("LEDGER_UTC_OFFSET", "8")]).unwrap_err();
    assert!(err.contains("LEDGER_UTC_OFFSET"));
}

#[test]
fn test_parse_utc_offset_forms() {
    assert_eq!(parse_utc_offset("UTC"), Ok(UtcOffset::UTC));
    assert_eq!(parse_utc_offset("z"), Ok(UtcOffset::UTC));
    assert_eq!(
        parse_utc_offset("-05:00"),
        Ok(UtcOffset::from_hms(-5, 0, 0).unwrap())
    );
}

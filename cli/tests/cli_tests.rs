use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tokenlock_cli::{
    days_between_signed, describe, parse_expiry, parse_issuer, parse_issuers, parse_signing_key,
    parse_verifying_key,
};
use tokenlock_license::{Expiry, License, LicenseTerms};

const SEED_HEX: &str = "0101010101010101010101010101010101010101010101010101010101010101";

// ── Keys ─────────────────────────────────────────────────────────

#[test]
fn signing_key_roundtrips_through_hex() {
    let key = parse_signing_key(SEED_HEX).unwrap();
    assert_eq!(hex::encode(key.to_bytes()), SEED_HEX);
}

#[test]
fn verifying_key_parses() {
    let key = parse_signing_key(SEED_HEX).unwrap();
    let pk_hex = hex::encode(key.verifying_key().to_bytes());
    assert_eq!(parse_verifying_key(&pk_hex).unwrap(), key.verifying_key());
}

#[test]
fn short_key_rejected() {
    assert!(parse_signing_key("abcd").is_err());
    assert!(parse_verifying_key("not hex").is_err());
}

#[test]
fn issuer_entries() {
    let key = parse_signing_key(SEED_HEX).unwrap();
    let entry = format!("alex={}", hex::encode(key.verifying_key().to_bytes()));

    let (id, pk) = parse_issuer(&entry).unwrap();
    assert_eq!(id, "alex");
    assert_eq!(pk, key.verifying_key());

    let registry = parse_issuers(&[entry]).unwrap();
    assert!(registry.contains_key("alex"));

    assert!(parse_issuer("alex").is_err());
    assert!(parse_issuer("=abcd").is_err());
}

// ── Dates ────────────────────────────────────────────────────────

#[test]
fn expiry_from_plain_date() {
    let expected = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    assert_eq!(parse_expiry("2025-09-01").unwrap(), Expiry::at(expected));
}

#[test]
fn expiry_from_rfc3339() {
    let expected = Utc.with_ymd_and_hms(2025, 8, 31, 22, 0, 0).unwrap();
    assert_eq!(parse_expiry("2025-09-01T00:00:00+02:00").unwrap(), Expiry::at(expected));
}

#[test]
fn expiry_rejects_garbage() {
    assert!(parse_expiry("Sep 2025").is_err());
}

#[test]
fn days_between_has_sign() {
    let now = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
    assert_eq!(days_between_signed(now, Expiry::at(now + Duration::days(3))), "+3");
    assert_eq!(days_between_signed(now, Expiry::at(now - Duration::days(2))), "-2");
    assert_eq!(days_between_signed(now, Expiry::at(now)), "+0");
    assert_eq!(days_between_signed(now, Expiry::Lifelong), "lifelong");
}

#[test]
fn describe_lists_fields() {
    let now = Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap();
    let license = License::from(LicenseTerms::new("alex", "l852qb", now + Duration::days(31)));
    let text = describe(&license, now);
    assert!(text.contains("License Issuer: alex"));
    assert!(text.contains("License Machine ID: l852qb"));
    assert!(text.contains("[+31 days between]"));
}

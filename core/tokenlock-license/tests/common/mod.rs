//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use ed25519_dalek::{SigningKey, VerifyingKey};

pub const ISSUER_ID: &str = "alex";
pub const MACHINE_ID: &str = "l852qb";

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (SigningKey, VerifyingKey) {
    keypair_from_seed(1)
}

/// Returns a second, unrelated key pair.
pub fn other_keypair() -> (SigningKey, VerifyingKey) {
    keypair_from_seed(101)
}

fn keypair_from_seed(start: u8) -> (SigningKey, VerifyingKey) {
    let mut seed = [0u8; 32];
    for (i, b) in seed.iter_mut().enumerate() {
        *b = start.wrapping_add(i as u8);
    }
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key)
}

/// 2025-09-01T00:00:00Z
pub fn sep_2025() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()
}

pub fn yesterday() -> DateTime<Utc> {
    Utc::now() - Duration::days(1)
}

pub fn next_year() -> DateTime<Utc> {
    Utc::now() + Duration::days(365)
}

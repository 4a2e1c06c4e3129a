//! Argument parsing and formatting helpers for the `tokenlock` binary.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use ed25519_dalek::{SigningKey, VerifyingKey};
use tokenlock_drm::IssuerRegistry;
use tokenlock_license::{Expiry, License};

/// Parses a 32-byte Ed25519 private key seed given as 64 hex digits.
pub fn parse_signing_key(text: &str) -> Result<SigningKey> {
    let bytes: [u8; 32] = decode_key(text).context("invalid private key")?;
    Ok(SigningKey::from_bytes(&bytes))
}

/// Parses a 32-byte Ed25519 public key given as 64 hex digits.
pub fn parse_verifying_key(text: &str) -> Result<VerifyingKey> {
    let bytes: [u8; 32] = decode_key(text).context("invalid public key")?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| anyhow!("invalid public key: {e}"))
}

fn decode_key(text: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(text.trim())?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow!("expected 32 bytes, got {}", b.len()))
}

/// Parses an `ID=PUBLIC_KEY` issuer registry entry.
pub fn parse_issuer(entry: &str) -> Result<(String, VerifyingKey)> {
    let Some((id, key)) = entry.split_once('=') else {
        bail!("issuer must be given as ID=PUBLIC_KEY, got {entry:?}");
    };
    if id.is_empty() {
        bail!("issuer id must not be empty");
    }
    Ok((id.to_string(), parse_verifying_key(key)?))
}

/// Builds an issuer registry from `ID=PUBLIC_KEY` entries.
pub fn parse_issuers(entries: &[String]) -> Result<IssuerRegistry> {
    entries.iter().map(|e| parse_issuer(e)).collect()
}

/// Parses an expiry date: RFC 3339, or `YYYY-MM-DD` at midnight UTC.
pub fn parse_expiry(text: &str) -> Result<Expiry> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Ok(Expiry::at(t.with_timezone(&Utc)));
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("unrecognized date {text:?}"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid date {text:?}"))?;
    Ok(Expiry::at(midnight.and_utc()))
}

/// Whole days from `now` until `expiry`, rounded, with an explicit sign.
pub fn days_between_signed(now: DateTime<Utc>, expiry: Expiry) -> String {
    let Some(until) = expiry.as_datetime() else {
        return "lifelong".to_string();
    };
    let secs = (until - now).num_seconds() as f64;
    let days = (secs / 86_400.0).round() as i64;
    if days >= 0 {
        format!("+{days}")
    } else {
        format!("{days}")
    }
}

/// Renders the license fields for display.
pub fn describe(license: &License, now: DateTime<Utc>) -> String {
    format!(
        "License Issuer: {}\nLicense Machine ID: {}\nLicense Valid Until: {} [{} days between]",
        license.issuer_id(),
        license.machine_id(),
        license.valid_until(),
        days_between_signed(now, license.valid_until()),
    )
}

//! Machine-bound license tokens.
//!
//! This crate handles:
//! - Encoding a license into its canonical dash-delimited hex text
//! - Signing the SHA-256 digest of that text with an issuer Ed25519 key
//! - Decoding raw and signed license text back into a [`License`]
//! - Signature and expiry validation
//! - Deriving a short machine id from the host identity
//!
//! # License Format
//!
//! Raw licenses are formatted as `hex(issuer)-hex(machine)-hex(valid_until)`,
//! where `valid_until` is Unix seconds written as minimal lowercase hex.
//! Signed licenses append `-hex(signature)`.
//!
//! Only ASCII issuer and machine ids are supported. Other text may encode
//! but is not guaranteed to survive decoding.

mod error;
mod expiry;
mod license;
mod machine;
mod wire;

pub use ed25519_dalek::{SigningKey, VerifyingKey};
pub use error::{LicenseError, LicenseResult};
pub use expiry::{Expiry, LIFELONG_UNIX_SECS};
pub use license::{License, LicenseTerms};
pub use machine::{current_machine_id, machine_id_from};

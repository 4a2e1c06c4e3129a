//! The license entity: construction, wire encoding, signing and validation.
//!
//! The message that gets signed is the SHA-256 digest of the raw license
//! text, not the text itself.

use crate::error::{LicenseError, LicenseResult};
use crate::expiry::Expiry;
use crate::machine::current_machine_id;
use crate::wire;
use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{debug, warn};

/// What a license grants: who issued it, which machine it binds, and until when.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LicenseTerms {
    issuer_id: String,
    machine_id: String,
    valid_until: Expiry,
}

impl LicenseTerms {
    /// Creates license terms from explicit values.
    pub fn new(
        issuer_id: impl Into<String>,
        machine_id: impl Into<String>,
        valid_until: impl Into<Expiry>,
    ) -> Self {
        let valid_until = match valid_until.into() {
            Expiry::At(t) => Expiry::at(t),
            lifelong => lifelong,
        };
        Self {
            issuer_id: issuer_id.into(),
            machine_id: machine_id.into(),
            valid_until,
        }
    }

    /// Returns the issuer id.
    #[must_use]
    pub fn issuer_id(&self) -> &str {
        &self.issuer_id
    }

    /// Returns the bound machine id.
    #[must_use]
    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    /// Returns the expiry.
    #[must_use]
    pub fn valid_until(&self) -> Expiry {
        self.valid_until
    }

    fn raw_license(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            wire::encode_text(&self.issuer_id),
            wire::encode_text(&self.machine_id),
            wire::encode_secs(self.valid_until.unix_secs()),
            sep = wire::SEPARATOR,
        )
    }

    fn decode(parts: &[&str]) -> LicenseResult<Self> {
        Ok(Self {
            issuer_id: wire::decode_text(parts[0])?,
            machine_id: wire::decode_text(parts[1])?,
            valid_until: Expiry::from_unix_secs(wire::decode_secs(parts[2])?)?,
        })
    }
}

/// A license, either unsigned (raw) or signed by its issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum License {
    /// Terms only; renders as the 3-segment raw form.
    Unsigned(LicenseTerms),
    /// Terms plus the issuer signature over their raw-form digest.
    Signed {
        terms: LicenseTerms,
        signature: Vec<u8>,
    },
}

impl License {
    /// Creates a license, filling in defaults for omitted parameters.
    ///
    /// The machine id defaults to [`current_machine_id`] and the expiry to
    /// [`Expiry::Lifelong`].
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MachineIdUnavailable`] if the machine id is
    /// omitted and cannot be derived from the host.
    pub fn create(
        issuer_id: impl Into<String>,
        machine_id: Option<String>,
        valid_until: Option<Expiry>,
        signature: Option<Vec<u8>>,
    ) -> LicenseResult<Self> {
        let machine_id = match machine_id {
            Some(id) => id,
            None => current_machine_id()?,
        };
        let terms = LicenseTerms::new(issuer_id, machine_id, valid_until.unwrap_or_default());
        Ok(match signature {
            Some(signature) => Self::Signed { terms, signature },
            None => Self::Unsigned(terms),
        })
    }

    /// Returns the license terms.
    #[must_use]
    pub fn terms(&self) -> &LicenseTerms {
        match self {
            Self::Unsigned(terms) | Self::Signed { terms, .. } => terms,
        }
    }

    /// Returns the issuer id.
    #[must_use]
    pub fn issuer_id(&self) -> &str {
        self.terms().issuer_id()
    }

    /// Returns the bound machine id.
    #[must_use]
    pub fn machine_id(&self) -> &str {
        self.terms().machine_id()
    }

    /// Returns the expiry.
    #[must_use]
    pub fn valid_until(&self) -> Expiry {
        self.terms().valid_until()
    }

    /// Returns the signature bytes, if signed.
    #[must_use]
    pub fn signature(&self) -> Option<&[u8]> {
        match self {
            Self::Unsigned(_) => None,
            Self::Signed { signature, .. } => Some(signature),
        }
    }

    /// Returns true if the license carries a signature.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed { .. })
    }

    /// Renders the raw form: `hex(issuer)-hex(machine)-hex(valid_until)`.
    #[must_use]
    pub fn raw_license(&self) -> String {
        self.terms().raw_license()
    }

    /// SHA-256 over the ASCII bytes of [`Self::raw_license`].
    #[must_use]
    pub fn raw_license_hash(&self) -> [u8; 32] {
        let digest = Sha256::digest(self.raw_license().as_bytes());
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&digest);
        hash
    }

    /// Renders the signed form: raw form followed by `-hex(signature)`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::UnsignedLicense`] if there is no signature.
    pub fn signed_license(&self) -> LicenseResult<String> {
        match self.signature() {
            Some(signature) => Ok(format!(
                "{}{}{}",
                self.raw_license(),
                wire::SEPARATOR,
                hex::encode(signature)
            )),
            None => Err(LicenseError::UnsignedLicense),
        }
    }

    /// Signs the license with an issuer private key.
    ///
    /// Any existing signature is replaced.
    #[must_use]
    pub fn sign(self, issuer_key: &SigningKey) -> Self {
        let signature = issuer_key.sign(&self.raw_license_hash()).to_bytes().to_vec();
        debug!(issuer = %self.issuer_id(), "signed license");
        let terms = match self {
            Self::Unsigned(terms) | Self::Signed { terms, .. } => terms,
        };
        Self::Signed { terms, signature }
    }

    /// Checks the signature against an issuer public key, ignoring expiry.
    ///
    /// A signature that is not well formed for the key type is reported as
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::UnsignedLicense`] if there is no signature.
    pub fn validate_signature(&self, issuer_key: &VerifyingKey) -> LicenseResult<bool> {
        let bytes = self.signature().ok_or(LicenseError::UnsignedLicense)?;
        let Ok(signature) = Signature::from_slice(bytes) else {
            warn!(issuer = %self.issuer_id(), len = bytes.len(), "malformed license signature");
            return Ok(false);
        };
        let valid = issuer_key
            .verify(&self.raw_license_hash(), &signature)
            .is_ok();
        if !valid {
            warn!(issuer = %self.issuer_id(), "license signature rejected");
        }
        Ok(valid)
    }

    /// Validates signature (when a key is given) and expiry against the current time.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::MissingPublicKey`] for a signed license with
    /// no key, and [`LicenseError::UnsignedLicense`] for an unsigned license
    /// with a key.
    pub fn validate(&self, issuer_key: Option<&VerifyingKey>) -> LicenseResult<bool> {
        self.validate_at(issuer_key, Utc::now())
    }

    /// Same as [`Self::validate`] with an explicit notion of "now".
    pub fn validate_at(
        &self,
        issuer_key: Option<&VerifyingKey>,
        now: DateTime<Utc>,
    ) -> LicenseResult<bool> {
        match issuer_key {
            None if self.is_signed() => return Err(LicenseError::MissingPublicKey),
            Some(key) => {
                if !self.validate_signature(key)? {
                    return Ok(false);
                }
            }
            None => {}
        }
        Ok(self.valid_until().is_valid_at(now))
    }

    /// Restores an unsigned license from its 3-segment raw form.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidLicenseString`] on a segment count
    /// mismatch, or a decode error for a malformed segment.
    pub fn from_raw_license(text: &str) -> LicenseResult<Self> {
        let parts = wire::split(text, wire::RAW_SEGMENTS)?;
        Ok(Self::Unsigned(LicenseTerms::decode(&parts)?))
    }

    /// Restores a signed license from its 4-segment signed form.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidLicenseString`] on a segment count
    /// mismatch, or a decode error for a malformed segment.
    pub fn from_signed_license(text: &str) -> LicenseResult<Self> {
        let parts = wire::split(text, wire::SIGNED_SEGMENTS)?;
        Ok(Self::Signed {
            terms: LicenseTerms::decode(&parts)?,
            signature: wire::decode_bytes(parts[3])?,
        })
    }
}

impl From<LicenseTerms> for License {
    fn from(terms: LicenseTerms) -> Self {
        Self::Unsigned(terms)
    }
}

/// Renders the signed form when signed, the raw form otherwise.
impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signed_license() {
            Ok(signed) => f.write_str(&signed),
            Err(_) => f.write_str(&self.raw_license()),
        }
    }
}

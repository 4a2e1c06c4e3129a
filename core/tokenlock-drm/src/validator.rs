//! License validation against a trusted issuer registry.

use std::collections::HashMap;
use tokenlock_license::{License, LicenseResult, VerifyingKey};
use tracing::{debug, warn};

/// Maps issuer ids to their trusted public keys.
pub type IssuerRegistry = HashMap<String, VerifyingKey>;

/// Decides whether a license is valid.
pub trait LicenseValidator: Send + Sync {
    /// Returns whether the license is valid.
    ///
    /// Genuine validity questions (unknown issuer, bad signature, expired)
    /// are `Ok(false)`. Caller misuse surfaces as an error.
    fn validate(&self, license: &License) -> LicenseResult<bool>;
}

/// Validates licenses purely against a local issuer registry, with no network access.
#[derive(Debug, Clone, Default)]
pub struct OfflineValidator {
    issuers: IssuerRegistry,
}

impl OfflineValidator {
    /// Creates a validator trusting the given issuers.
    pub fn new(issuers: IssuerRegistry) -> Self {
        Self { issuers }
    }

    /// Returns the trusted issuers.
    pub fn issuers(&self) -> &IssuerRegistry {
        &self.issuers
    }
}

impl LicenseValidator for OfflineValidator {
    fn validate(&self, license: &License) -> LicenseResult<bool> {
        let Some(key) = self.issuers.get(license.issuer_id()) else {
            warn!(issuer = %license.issuer_id(), "unknown license issuer");
            return Ok(false);
        };
        let valid = license.validate(Some(key))?;
        debug!(issuer = %license.issuer_id(), valid, "validated license offline");
        Ok(valid)
    }
}

//! The DRM controller: one storage chain, one validator, at most one license.

use crate::error::{DrmError, DrmResult};
use crate::storage::{ChainedStorage, LicenseStorage};
use crate::validator::{IssuerRegistry, LicenseValidator, OfflineValidator};
use tokenlock_license::{License, LicenseError};
use tracing::{debug, info};

/// A license or its signed text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseInput {
    License(License),
    SignedText(String),
}

impl From<License> for LicenseInput {
    fn from(license: License) -> Self {
        Self::License(license)
    }
}

impl From<&str> for LicenseInput {
    fn from(text: &str) -> Self {
        Self::SignedText(text.to_string())
    }
}

impl From<String> for LicenseInput {
    fn from(text: String) -> Self {
        Self::SignedText(text)
    }
}

/// Coordinates license storage, validation and the currently held license.
///
/// The current license is replaced wholesale by set and load operations.
/// Not safe for concurrent use; callers serialize access.
pub struct Drm {
    storage: ChainedStorage,
    validator: Box<dyn LicenseValidator>,
    license: Option<License>,
}

impl Drm {
    /// Creates a controller from its parts.
    pub fn new(
        storage: ChainedStorage,
        validator: Box<dyn LicenseValidator>,
        license: Option<License>,
    ) -> Self {
        Self {
            storage,
            validator,
            license,
        }
    }

    /// Creates a controller with offline validation.
    ///
    /// An empty `storages` list selects the default env-then-file chain.
    ///
    /// # Errors
    ///
    /// Returns [`DrmError::EmptyIssuerRegistry`] if `issuers` is empty.
    pub fn create(
        issuers: IssuerRegistry,
        storages: Vec<Box<dyn LicenseStorage>>,
        license: Option<License>,
    ) -> DrmResult<Self> {
        if issuers.is_empty() {
            return Err(DrmError::EmptyIssuerRegistry);
        }
        Ok(Self::new(
            ChainedStorage::create(storages),
            Box::new(OfflineValidator::new(issuers)),
            license,
        ))
    }

    /// Returns the storage chain.
    pub fn storage(&self) -> &ChainedStorage {
        &self.storage
    }

    /// Returns the validator.
    pub fn validator(&self) -> &dyn LicenseValidator {
        self.validator.as_ref()
    }

    /// Returns the current license, if any.
    pub fn license(&self) -> Option<&License> {
        self.license.as_ref()
    }

    /// Returns true if a license is set.
    pub fn has_license(&self) -> bool {
        self.license.is_some()
    }

    /// Sets the current license. Text is decoded as a signed license.
    ///
    /// # Errors
    ///
    /// Returns a decode error if signed text is malformed; the current
    /// license is left unchanged in that case.
    pub fn set_license(&mut self, license: impl Into<LicenseInput>) -> DrmResult<&mut Self> {
        let license = match license.into() {
            LicenseInput::License(license) => license,
            LicenseInput::SignedText(text) => License::from_signed_license(&text)?,
        };
        debug!(issuer = %license.issuer_id(), "license set");
        self.license = Some(license);
        Ok(self)
    }

    /// Loads the current license from the storage chain.
    ///
    /// `names[i]` optionally overrides the name backend `i` looks under.
    pub async fn load_license(&mut self, names: &[Option<&str>]) -> DrmResult<&mut Self> {
        let license = self.storage.load(names).await?;
        info!(issuer = %license.issuer_id(), machine = %license.machine_id(), "license loaded");
        self.license = Some(license);
        Ok(self)
    }

    /// Persists the current license to every backend.
    ///
    /// # Errors
    ///
    /// Returns [`DrmError::NoLicense`] if no license is set,
    /// [`LicenseError::UnsignedLicense`] if it is unsigned, and
    /// [`DrmError::PersistingLicense`] if any backend failed to store it.
    pub async fn store_license(&mut self) -> DrmResult<&mut Self> {
        let license = self.license.as_ref().ok_or(DrmError::NoLicense)?;
        if !license.is_signed() {
            return Err(LicenseError::UnsignedLicense.into());
        }
        if !self.storage.store(license).await {
            return Err(DrmError::PersistingLicense);
        }
        info!(issuer = %license.issuer_id(), "license stored");
        Ok(self)
    }

    /// Sets the given license, then persists it.
    pub async fn store_license_from(
        &mut self,
        license: impl Into<LicenseInput>,
    ) -> DrmResult<&mut Self> {
        self.set_license(license)?;
        self.store_license().await
    }

    /// Validates the current license.
    ///
    /// # Errors
    ///
    /// Returns [`DrmError::NoLicense`] if no license is set, or any misuse
    /// error raised by the validator.
    pub fn validate_license(&self) -> DrmResult<bool> {
        let license = self.license.as_ref().ok_or(DrmError::NoLicense)?;
        Ok(self.validator.validate(license)?)
    }

    /// Sets the given license, then validates it.
    pub fn validate_license_from(&mut self, license: impl Into<LicenseInput>) -> DrmResult<bool> {
        self.set_license(license)?;
        self.validate_license()
    }
}

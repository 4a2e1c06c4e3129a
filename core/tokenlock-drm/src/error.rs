//! Error types for the DRM layer.

use thiserror::Error;
use tokenlock_license::LicenseError;

/// Result type for DRM operations.
pub type DrmResult<T> = Result<T, DrmError>;

/// Errors that can occur while loading, storing or validating licenses.
#[derive(Debug, Error)]
pub enum DrmError {
    /// Decode or signature misuse error from the license itself.
    #[error(transparent)]
    License(#[from] LicenseError),

    /// Every storage backend in the chain reported no license.
    #[error("unable to load license from any of: {}", backends.join(", "))]
    NotFound { backends: Vec<String> },

    /// At least one storage backend failed to persist the license.
    #[error("unable to persist license to every storage backend")]
    PersistingLicense,

    /// No license loaded and none supplied.
    #[error("no license loaded")]
    NoLicense,

    /// The issuer registry has no entries, so nothing could ever validate.
    #[error("issuer registry must not be empty")]
    EmptyIssuerRegistry,

    /// Unexpected storage failure while loading.
    #[error("storage error: {0}")]
    Storage(String),
}

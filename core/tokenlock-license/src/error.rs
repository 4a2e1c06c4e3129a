//! Error types for the license entity.

use thiserror::Error;

/// License-specific errors.
///
/// These describe caller misuse or malformed input. A license that is
/// merely expired or carries a bad signature is reported as `false` by the
/// validation routines, never as one of these.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The license text has the wrong number of dash-separated segments.
    #[error("invalid license string: expected {expected} components, parsed {actual}")]
    InvalidLicenseString { expected: usize, actual: usize },

    /// The operation needs a signature and the license has none.
    #[error("license is unsigned and cannot be verified against a public key")]
    UnsignedLicense,

    /// A signed license was validated without an issuer public key.
    #[error("missing public key to verify the signed license")]
    MissingPublicKey,

    /// A segment is not valid hexadecimal.
    #[error("invalid hex segment: {0}")]
    InvalidHex(String),

    /// A text segment decoded to bytes that are not valid UTF-8.
    #[error("invalid text encoding: {0}")]
    InvalidEncoding(String),

    /// The expiry segment is outside the representable range.
    #[error("invalid expiry timestamp: {0}")]
    InvalidTimestamp(String),

    /// The host machine identity could not be determined.
    #[error("machine id unavailable: {0}")]
    MachineIdUnavailable(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

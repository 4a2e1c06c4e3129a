//! License persistence and offline validation.
//!
//! This crate handles:
//! - Loading and storing signed licenses through a prioritized chain of
//!   storage backends (environment variable first, then a file)
//! - Validating licenses offline against a trusted issuer registry
//! - The [`Drm`] controller that ties both together around one license
//!
//! Nothing here talks to the network.

mod config;
mod drm;
mod error;
mod storage;
mod validator;

pub use config::{StorageConfig, LICENSE_ENV_VAR, LICENSE_FILE_NAME};
pub use drm::{Drm, LicenseInput};
pub use error::{DrmError, DrmResult};
pub use storage::{
    ChainedStorage, EnvStorage, FileStorage, LicenseStorage, LoadOutcome, StorageKind,
};
pub use validator::{IssuerRegistry, LicenseValidator, OfflineValidator};

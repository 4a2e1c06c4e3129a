//! Ordered fallback chain of storage backends.

use super::{EnvStorage, FileStorage, LicenseStorage, LoadOutcome, StorageKind};
use crate::config::StorageConfig;
use crate::error::{DrmError, DrmResult};
use tokenlock_license::License;
use tracing::{debug, warn};

/// Composes storage backends in a fixed order.
///
/// Loading returns the first license found; storing writes to every
/// backend. Stores are best effort: a failing backend does not stop the
/// others, and backends already written are not rolled back.
pub struct ChainedStorage {
    storages: Vec<Box<dyn LicenseStorage>>,
}

impl ChainedStorage {
    /// Creates a chain from `storages`, or the default env-then-file chain
    /// if `storages` is empty.
    pub fn create(storages: Vec<Box<dyn LicenseStorage>>) -> Self {
        if storages.is_empty() {
            return Self::from_config(&StorageConfig::default());
        }
        Self { storages }
    }

    /// Creates the env-then-file chain described by `config`.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            storages: vec![
                Box::new(EnvStorage::from_config(config)),
                Box::new(FileStorage::from_config(config)),
            ],
        }
    }

    /// Returns the backends in chain order.
    pub fn storages(&self) -> &[Box<dyn LicenseStorage>] {
        &self.storages
    }

    /// Returns the first backend of the given kind.
    pub fn storage(&self, kind: StorageKind) -> Option<&dyn LicenseStorage> {
        self.storages
            .iter()
            .find(|s| s.kind() == kind)
            .map(|s| &**s)
    }

    /// Loads the first available license.
    ///
    /// `names[i]`, if present, overrides the name backend `i` looks under.
    /// Only "not found" moves on to the next backend; any other failure
    /// aborts the chain.
    pub async fn load(&mut self, names: &[Option<&str>]) -> DrmResult<License> {
        for (i, storage) in self.storages.iter_mut().enumerate() {
            let name = names.get(i).copied().flatten();
            match storage.load(name).await? {
                LoadOutcome::Found(license) => {
                    debug!(backend = %storage.kind(), "license found");
                    return Ok(license);
                }
                LoadOutcome::NotFound { details } => {
                    debug!(backend = %storage.kind(), "{details}");
                }
            }
        }

        Err(DrmError::NotFound {
            backends: self.storages.iter().map(|s| s.kind().to_string()).collect(),
        })
    }

    /// Stores the license in every backend. Returns true only if all succeeded.
    pub async fn store(&self, license: &License) -> bool {
        let mut result = true;
        for storage in &self.storages {
            if !storage.store(license).await {
                warn!(backend = %storage.kind(), location = %storage.location(), "license store failed");
                result = false;
            }
        }
        result
    }
}

impl Default for ChainedStorage {
    fn default() -> Self {
        Self::create(Vec::new())
    }
}

//! Environment variable storage.

use super::{LicenseStorage, LoadOutcome, StorageKind};
use crate::config::{StorageConfig, LICENSE_ENV_VAR};
use crate::error::{DrmError, DrmResult};
use async_trait::async_trait;
use std::env::{self, VarError};
use tokenlock_license::License;
use tracing::{debug, warn};

/// Keeps the signed license in a process environment variable.
///
/// Variable names are upper-cased. Writes mutate the process environment,
/// so no other thread may read or write the environment concurrently.
#[derive(Debug, Clone)]
pub struct EnvStorage {
    var: String,
}

impl EnvStorage {
    /// Creates a backend using the default variable name.
    pub fn new() -> Self {
        Self::with_var(LICENSE_ENV_VAR)
    }

    /// Creates a backend using a custom variable name.
    pub fn with_var(var: &str) -> Self {
        Self {
            var: var.to_uppercase(),
        }
    }

    /// Creates a backend from a storage config.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::with_var(&config.env_var)
    }

    /// Returns the variable name in use.
    pub fn var(&self) -> &str {
        &self.var
    }

    fn is_writable_name(&self) -> bool {
        !self.var.is_empty() && !self.var.contains(['=', '\0'])
    }
}

impl Default for EnvStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LicenseStorage for EnvStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Env
    }

    fn location(&self) -> String {
        self.var.clone()
    }

    async fn load(&mut self, name: Option<&str>) -> DrmResult<LoadOutcome> {
        if let Some(name) = name {
            self.var = name.to_uppercase();
        }
        if !self.is_writable_name() {
            return Ok(LoadOutcome::NotFound {
                details: format!("invalid environment variable name {:?}", self.var),
            });
        }

        match env::var(&self.var) {
            Ok(text) => {
                debug!(var = %self.var, "loaded license from environment");
                Ok(LoadOutcome::Found(License::from_signed_license(&text)?))
            }
            Err(VarError::NotPresent) => Ok(LoadOutcome::NotFound {
                details: format!("no such environment variable \"{}\"", self.var),
            }),
            Err(VarError::NotUnicode(_)) => Err(DrmError::Storage(format!(
                "environment variable \"{}\" is not valid unicode",
                self.var
            ))),
        }
    }

    async fn store(&self, license: &License) -> bool {
        let signed = match license.signed_license() {
            Ok(signed) => signed,
            Err(e) => {
                warn!(var = %self.var, "refusing to store license: {e}");
                return false;
            }
        };
        if !self.is_writable_name() {
            warn!(var = %self.var, "invalid environment variable name");
            return false;
        }

        // SAFETY: the environment is only touched from the thread driving
        // this backend; callers serialize access per the storage contract.
        unsafe { env::set_var(&self.var, signed) };
        debug!(var = %self.var, "stored license in environment");
        true
    }
}

//! File storage.

use super::{LicenseStorage, LoadOutcome, StorageKind};
use crate::config::{StorageConfig, LICENSE_FILE_NAME};
use crate::error::{DrmError, DrmResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokenlock_license::License;
use tokio::fs;
use tracing::{debug, warn};

/// Keeps the signed license in a file.
///
/// The file name is resolved against `base_dir`, or against the current
/// working directory when no base directory is configured.
#[derive(Debug, Clone)]
pub struct FileStorage {
    file_name: String,
    base_dir: Option<PathBuf>,
}

impl FileStorage {
    /// Creates a backend using the default file name in the working directory.
    pub fn new() -> Self {
        Self {
            file_name: LICENSE_FILE_NAME.to_string(),
            base_dir: None,
        }
    }

    /// Creates a backend using `file_name` inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>, file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            base_dir: Some(dir.into()),
        }
    }

    /// Creates a backend from a storage config.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            file_name: config.file_name.clone(),
            base_dir: config.base_dir.clone(),
        }
    }

    /// Returns the resolved license file path.
    pub fn file_path(&self) -> PathBuf {
        let base = self
            .base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        base.join(&self.file_name)
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LicenseStorage for FileStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::File
    }

    fn location(&self) -> String {
        self.file_path().to_string_lossy().to_string()
    }

    async fn load(&mut self, name: Option<&str>) -> DrmResult<LoadOutcome> {
        if let Some(name) = name {
            self.file_name = name.to_string();
        }
        let path = self.file_path();

        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(LoadOutcome::NotFound {
                    details: format!("no such file \"{}\"", path.display()),
                });
            }
            Err(e) => {
                return Err(DrmError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        debug!(path = %path.display(), "loaded license from file");
        Ok(LoadOutcome::Found(License::from_signed_license(text.trim())?))
    }

    async fn store(&self, license: &License) -> bool {
        let path = self.file_path();
        let signed = match license.signed_license() {
            Ok(signed) => signed,
            Err(e) => {
                warn!(path = %path.display(), "refusing to store license: {e}");
                return false;
            }
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent).await {
                warn!(path = %path.display(), "failed to create license directory: {e}");
                return false;
            }
        }

        match fs::write(&path, signed).await {
            Ok(()) => {
                debug!(path = %path.display(), "stored license in file");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), "failed to write license file: {e}");
                false
            }
        }
    }
}

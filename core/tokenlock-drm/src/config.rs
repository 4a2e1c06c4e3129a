//! Storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default environment variable holding the signed license.
pub const LICENSE_ENV_VAR: &str = "LICENSE_KEY";

/// Default license file name.
pub const LICENSE_FILE_NAME: &str = "license.key";

/// Where the built-in storage backends look for a license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Environment variable name (upper-cased on use).
    pub env_var: String,
    /// License file name, relative to `base_dir`.
    pub file_name: String,
    /// Directory the license file lives in.
    /// `None` means the current working directory at the time of each call.
    pub base_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            env_var: LICENSE_ENV_VAR.to_string(),
            file_name: LICENSE_FILE_NAME.to_string(),
            base_dir: None,
        }
    }
}

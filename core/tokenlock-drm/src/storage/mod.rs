//! License storage backends.
//!
//! A backend loads and stores the signed text form of a license under a
//! name. The built-in backends are the process environment and a file in
//! the working directory; [`ChainedStorage`] composes them in order.

mod chained;
mod env;
mod file;

pub use chained::ChainedStorage;
pub use env::EnvStorage;
pub use file::FileStorage;

use crate::error::DrmResult;
use async_trait::async_trait;
use std::fmt;
use tokenlock_license::License;

/// Identifies the kind of a storage backend inside a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Process environment variable.
    Env,
    /// File on disk.
    File,
    /// Any other backend, named by its implementor.
    Custom(&'static str),
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => f.write_str("env"),
            Self::File => f.write_str("file"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// Result of asking a backend for its license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The medium held a license.
    Found(License),
    /// The medium has no entry under the resolved name.
    NotFound {
        /// Human-readable description of what was looked for.
        details: String,
    },
}

/// A medium that can hold one signed license under a name.
#[async_trait]
pub trait LicenseStorage: Send + Sync {
    /// Returns the kind of this backend.
    fn kind(&self) -> StorageKind;

    /// Returns where this backend currently reads and writes
    /// (e.g. the environment variable name or the absolute file path).
    fn location(&self) -> String;

    /// Loads the license, optionally overriding the name to look under.
    ///
    /// An override becomes this backend's name for later calls.
    /// A missing entry is [`LoadOutcome::NotFound`]; stored text that does
    /// not decode as a signed license is an error.
    async fn load(&mut self, name: Option<&str>) -> DrmResult<LoadOutcome>;

    /// Stores the license's signed text. Returns false if the write failed.
    async fn store(&self, license: &License) -> bool;
}

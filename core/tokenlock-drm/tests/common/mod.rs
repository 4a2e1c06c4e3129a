//! Shared test helpers for DRM tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ed25519_dalek::{SigningKey, VerifyingKey};
use std::sync::{Arc, Mutex};
use tokenlock_drm::{DrmError, DrmResult, IssuerRegistry, LicenseStorage, LoadOutcome, StorageKind};
use tokenlock_license::{Expiry, License};

pub const ISSUER_ID: &str = "cucer";
pub const MACHINE_ID: &str = "l852qb";

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (SigningKey, VerifyingKey) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing_key = SigningKey::from_bytes(&seed);
    let verifying_key = signing_key.verifying_key();
    (signing_key, verifying_key)
}

pub fn issuers() -> IssuerRegistry {
    let (_, pk) = test_keypair();
    IssuerRegistry::from([(ISSUER_ID.to_string(), pk)])
}

/// A lifelong license signed by the test issuer.
pub fn signed_license() -> License {
    let (sk, _) = test_keypair();
    License::create(ISSUER_ID, Some(MACHINE_ID.to_string()), Some(Expiry::Lifelong), None)
        .unwrap()
        .sign(&sk)
}

pub fn signed_text() -> String {
    signed_license().signed_license().unwrap()
}

/// A backend that never has a license and never stores one.
///
/// Loading under the name `"explode"` fails with a storage error instead.
pub struct BrokenStorage;

#[async_trait]
impl LicenseStorage for BrokenStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Custom("broken")
    }

    fn location(&self) -> String {
        "nowhere".to_string()
    }

    async fn load(&mut self, name: Option<&str>) -> DrmResult<LoadOutcome> {
        if name == Some("explode") {
            return Err(DrmError::Storage("random failure".to_string()));
        }
        Ok(LoadOutcome::NotFound {
            details: "license will never exist".to_string(),
        })
    }

    async fn store(&self, _license: &License) -> bool {
        false
    }
}

/// An in-memory backend whose contents stay observable after boxing.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    pub slot: Arc<Mutex<Option<String>>>,
    pub loads: Arc<Mutex<usize>>,
}

impl MemoryStorage {
    pub fn holding(text: &str) -> Self {
        let storage = Self::default();
        *storage.slot.lock().unwrap() = Some(text.to_string());
        storage
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        *self.loads.lock().unwrap()
    }
}

#[async_trait]
impl LicenseStorage for MemoryStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Custom("memory")
    }

    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn load(&mut self, _name: Option<&str>) -> DrmResult<LoadOutcome> {
        *self.loads.lock().unwrap() += 1;
        match self.contents() {
            Some(text) => Ok(LoadOutcome::Found(License::from_signed_license(&text)?)),
            None => Ok(LoadOutcome::NotFound {
                details: "empty slot".to_string(),
            }),
        }
    }

    async fn store(&self, license: &License) -> bool {
        match license.signed_license() {
            Ok(text) => {
                *self.slot.lock().unwrap() = Some(text);
                true
            }
            Err(_) => false,
        }
    }
}

/// Sets an environment variable for the duration of a `#[serial]` test.
pub fn set_env(var: &str, value: &str) {
    // SAFETY: env-touching tests run under #[serial].
    unsafe { std::env::set_var(var, value) };
}

pub fn remove_env(var: &str) {
    // SAFETY: env-touching tests run under #[serial].
    unsafe { std::env::remove_var(var) };
}

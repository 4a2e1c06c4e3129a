//! Machine identity for license binding.
//!
//! Reads a stable host identifier and reduces it to a short, deterministic,
//! non-reversible id suitable for embedding in a license.

use crate::error::{LicenseError, LicenseResult};
use sha2::{Digest, Sha256};
use tracing::debug;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Returns the short machine id of the current host.
///
/// # Errors
///
/// Returns [`LicenseError::MachineIdUnavailable`] if neither a platform
/// machine id nor a host name can be read.
pub fn current_machine_id() -> LicenseResult<String> {
    let identity = read_machine_identity()
        .or_else(read_hostname)
        .ok_or_else(|| {
            LicenseError::MachineIdUnavailable("no platform machine id or host name".to_string())
        })?;
    let id = machine_id_from(&identity);
    debug!(machine_id = %id, "derived machine id");
    Ok(id)
}

/// Derives the short machine id for an arbitrary host identity string.
///
/// The first four bytes of the SHA-256 digest, read big-endian and written
/// in lowercase base 36.
#[must_use]
pub fn machine_id_from(identity: &str) -> String {
    let digest = Sha256::digest(identity.trim().as_bytes());
    let mut n = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    if n == 0 {
        return "0".to_string();
    }

    let mut out = Vec::with_capacity(7);
    while n > 0 {
        out.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn read_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.trim().is_empty())
}

/// Gets the platform machine id, if the platform exposes one.
fn read_machine_identity() -> Option<String> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

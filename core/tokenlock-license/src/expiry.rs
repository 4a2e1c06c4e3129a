//! License expiry.

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel Unix timestamp (seconds) for licenses that never expire.
///
/// This is the largest instant the wire format has ever carried
/// (8.64e15 milliseconds), written on the wire as `7dba8218000`.
pub const LIFELONG_UNIX_SECS: u64 = 8_640_000_000_000;

/// When a license stops being valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expiry {
    /// Never expires.
    #[default]
    Lifelong,
    /// Expires at the given instant (whole seconds).
    At(DateTime<Utc>),
}

impl Expiry {
    /// Creates an expiry at `instant`, truncated to whole seconds.
    ///
    /// Instants before the Unix epoch are clamped to the epoch, since the
    /// wire format only carries unsigned seconds.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        let secs = instant.timestamp().max(0);
        Self::At(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Restores an expiry from Unix seconds.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidTimestamp`] if `secs` is neither the
    /// lifelong sentinel nor a representable instant.
    pub fn from_unix_secs(secs: u64) -> LicenseResult<Self> {
        if secs == LIFELONG_UNIX_SECS {
            return Ok(Self::Lifelong);
        }
        i64::try_from(secs)
            .ok()
            .filter(|s| (*s as u64) < LIFELONG_UNIX_SECS)
            .and_then(|s| DateTime::from_timestamp(s, 0))
            .map(Self::At)
            .ok_or_else(|| LicenseError::InvalidTimestamp(format!("{secs} is out of range")))
    }

    /// Returns the Unix seconds carried on the wire.
    #[must_use]
    pub fn unix_secs(&self) -> u64 {
        match self {
            Self::Lifelong => LIFELONG_UNIX_SECS,
            Self::At(t) => t.timestamp().max(0) as u64,
        }
    }

    /// Returns the expiry instant, or None for lifelong licenses.
    #[must_use]
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Lifelong => None,
            Self::At(t) => Some(*t),
        }
    }

    /// Returns true if the license is still valid at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Lifelong => true,
            Self::At(t) => *t > now,
        }
    }
}

impl From<DateTime<Utc>> for Expiry {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::at(instant)
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lifelong => f.write_str("lifelong"),
            Self::At(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

//! Semantic version of the running service and the provider that hands it out.
//!
//! On the wire a [`Version`] is always the single-field object
//! `{"version": "MAJOR.MINOR.PATCH"}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::errors::{ServiceError, ServiceResult};

/// A `major.minor.patch` triple. Defaults to `0.0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "VersionPayload", into = "VersionPayload")]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ServiceError;

    fn from_str(input: &str) -> ServiceResult<Self> {
        let trimmed = input.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let parts: Vec<&str> = bare.split('.').collect();
        if parts.len() != 3 {
            return Err(ServiceError::version(
                input,
                format!("expected MAJOR.MINOR.PATCH, found {} component(s)", parts.len()),
            ));
        }

        // plain decimal digits, no sign, no leading zero except "0" itself
        let component = |name: &str, raw: &str| -> ServiceResult<u64> {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ServiceError::version(
                    input,
                    format!("{name} '{raw}' is not a decimal number"),
                ));
            }
            if raw.len() > 1 && raw.starts_with('0') {
                return Err(ServiceError::version(
                    input,
                    format!("{name} '{raw}' has a leading zero"),
                ));
            }
            raw.parse::<u64>()
                .map_err(|e| ServiceError::version(input, format!("{name} '{raw}': {e}")))
        };

        Ok(Self {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }
}

/// JSON body served by `GET /version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionPayload {
    /// Semantic version of the running service.
    #[schema(example = "0.0.0")]
    pub version: String,
}

impl From<Version> for VersionPayload {
    fn from(v: Version) -> Self {
        Self {
            version: v.to_string(),
        }
    }
}

impl TryFrom<VersionPayload> for Version {
    type Error = ServiceError;

    fn try_from(payload: VersionPayload) -> ServiceResult<Self> {
        payload.version.parse()
    }
}

/// Hands out the statically configured version of this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionProvider {
    version: Version,
}

impl VersionProvider {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    /// Never fails and has no side effects.
    pub fn get_version(&self) -> Version {
        self.version
    }
}

//! The version of the running process, resolved once at startup

use std::fmt;

use tracing::debug;

use crate::config::{UNDEFINED_VERSION, VERSION_OVERRIDE_ENV};
use crate::version::error::MalformedVersion;
use crate::version::identifier::{VersionIdentifier, parse_version};

/// Version embedded by the build pipeline through `LINKERD_VERSION`
pub const BUILD_VERSION: &str = match option_env!("LINKERD_VERSION") {
    Some(version) => version,
    None => UNDEFINED_VERSION,
};

/// Immutable running version, created at process entry and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningVersion(String);

impl RunningVersion {
    /// Resolves the running version from the build-time value and the
    /// process environment. Call this once, before any check runs.
    pub fn detect() -> Self {
        if BUILD_VERSION != UNDEFINED_VERSION {
            return Self::resolve(BUILD_VERSION, None);
        }
        Self::resolve(BUILD_VERSION, std::env::var(VERSION_OVERRIDE_ENV).ok())
    }

    /// The override applies only while the build value is the sentinel and
    /// the override is non-empty.
    pub fn resolve(build_version: &str, override_version: Option<String>) -> Self {
        match override_version {
            Some(version) if build_version == UNDEFINED_VERSION && !version.is_empty() => {
                debug!("Using {} as running version", VERSION_OVERRIDE_ENV);
                Self(version)
            }
            _ => Self(build_version.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self) -> Result<VersionIdentifier, MalformedVersion> {
        parse_version(&self.0)
    }
}

impl From<&str> for RunningVersion {
    fn from(version: &str) -> Self {
        Self(version.to_string())
    }
}

impl fmt::Display for RunningVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

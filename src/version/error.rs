use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::version::identifier::VersionIdentifier;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported version format: {0}")]
pub struct MalformedVersion(pub String);

/// Failure of the call that retrieves version data, passed through as-is.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Two versions that are known to differ.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
    #[error("mismatched channels: running {actual} but retrieved {expected}")]
    Channel {
        actual: VersionIdentifier,
        expected: VersionIdentifier,
    },

    #[error("is running version {actual} but the latest {channel} version is {expected}")]
    Revision {
        channel: String,
        actual: String,
        expected: String,
    },
}

/// Which side of a comparison could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Actual,
    Expected,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Actual => f.write_str("actual"),
            Side::Expected => f.write_str("expected"),
        }
    }
}

/// The versions differ but one of them is not a `<channel>-<revision>` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse {side} version: {source}")]
pub struct DiagnosisError {
    pub side: Side,
    pub source: MalformedVersion,
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error(transparent)]
    Malformed(#[from] MalformedVersion),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unexpected versioncheck response: {0}")]
    UnexpectedResponse(reqwest::StatusCode),

    #[error("failed to decode versioncheck response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unsupported version channel: {0}")]
    UnsupportedChannel(String),

    #[error(transparent)]
    Mismatch(#[from] Mismatch),

    #[error(transparent)]
    Diagnosis(#[from] DiagnosisError),
}

impl From<Result<Mismatch, DiagnosisError>> for VersionError {
    fn from(diagnosis: Result<Mismatch, DiagnosisError>) -> Self {
        match diagnosis {
            Ok(mismatch) => VersionError::Mismatch(mismatch),
            Err(err) => VersionError::Diagnosis(err),
        }
    }
}

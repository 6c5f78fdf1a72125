//! Validation of the local (client) version

use crate::version::diagnosis::diagnose_mismatch;
use crate::version::error::VersionError;
use crate::version::running::RunningVersion;

/// Checks that the running version is byte-identical to `expected`.
pub fn check_client_version(running: &RunningVersion, expected: &str) -> Result<(), VersionError> {
    if running.as_str() != expected {
        return Err(diagnose_mismatch(running.as_str(), expected).into());
    }

    Ok(())
}

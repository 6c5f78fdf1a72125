//! Classification of two version strings that are known to differ

use crate::version::error::{DiagnosisError, Mismatch, Side};
use crate::version::identifier::parse_version;

/// Explains why `actual` differs from `expected`.
///
/// The outer error means one side could not be parsed at all, which callers
/// must keep apart from a genuine mismatch.
pub fn diagnose_mismatch(actual: &str, expected: &str) -> Result<Mismatch, DiagnosisError> {
    let actual = parse_version(actual).map_err(|source| DiagnosisError {
        side: Side::Actual,
        source,
    })?;
    let expected = parse_version(expected).map_err(|source| DiagnosisError {
        side: Side::Expected,
        source,
    })?;

    if actual.channel != expected.channel {
        return Ok(Mismatch::Channel { actual, expected });
    }

    Ok(Mismatch::Revision {
        channel: actual.channel,
        actual: actual.revision,
        expected: expected.revision,
    })
}

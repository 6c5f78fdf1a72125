//! Wire codec for `<channel>-<revision>` version strings

use std::fmt;
use std::str::FromStr;

use crate::version::error::MalformedVersion;

/// Separator between channel and revision on the wire
pub const SEPARATOR: char = '-';

/// A version split into its release channel and build revision.
///
/// Only the first separator splits, so the revision may itself contain `-`
/// (e.g. `edge-2024-01-01`) while the channel never does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionIdentifier {
    pub channel: String,
    pub revision: String,
}

impl VersionIdentifier {
    pub fn new(channel: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            revision: revision.into(),
        }
    }
}

/// Parses a raw version string, splitting on the first separator only.
pub fn parse_version(raw: &str) -> Result<VersionIdentifier, MalformedVersion> {
    raw.split_once(SEPARATOR)
        .map(|(channel, revision)| VersionIdentifier::new(channel, revision))
        .ok_or_else(|| MalformedVersion(raw.to_string()))
}

impl FromStr for VersionIdentifier {
    type Err = MalformedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_version(s)
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.channel, SEPARATOR, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("edge-20.1.1", "edge", "20.1.1")]
    #[case("stable-2.9.0", "stable", "2.9.0")]
    #[case("edge-2024-01-01", "edge", "2024-01-01")]
    #[case("dev-abc123-dirty", "dev", "abc123-dirty")]
    fn parse_version_splits_on_first_separator(
        #[case] raw: &str,
        #[case] channel: &str,
        #[case] revision: &str,
    ) {
        let parsed = parse_version(raw).unwrap();

        assert_eq!(parsed, VersionIdentifier::new(channel, revision));
    }

    #[rstest]
    #[case("undefined")]
    #[case("")]
    #[case("2.9.0")]
    fn parse_version_without_separator_is_malformed(#[case] raw: &str) {
        let result = parse_version(raw);

        assert_eq!(result, Err(MalformedVersion(raw.to_string())));
    }

    #[test]
    fn parse_version_keeps_empty_parts() {
        assert_eq!(parse_version("-1.0").unwrap(), VersionIdentifier::new("", "1.0"));
        assert_eq!(parse_version("edge-").unwrap(), VersionIdentifier::new("edge", ""));
    }

    #[test]
    fn display_is_inverse_of_parse() {
        for id in [
            VersionIdentifier::new("edge", "21.1.1"),
            VersionIdentifier::new("stable", "2.9.0-rc1"),
            VersionIdentifier::new("git", "deadbeef"),
        ] {
            let formatted = id.to_string();

            assert_eq!(formatted.parse::<VersionIdentifier>().unwrap(), id);
        }
    }
}

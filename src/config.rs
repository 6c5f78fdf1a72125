use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

// =============================================================================
// Version resolution
// =============================================================================

/// Build-time version value meaning "not set at link time"
pub const UNDEFINED_VERSION: &str = "undefined";

/// Consulted only when the build-time version is [`UNDEFINED_VERSION`]
pub const VERSION_OVERRIDE_ENV: &str = "LINKERD_CONTAINER_VERSION_OVERRIDE";

// =============================================================================
// Network
// =============================================================================

/// Default base URL of the versioncheck service
pub const DEFAULT_VERSION_CHECK_URL: &str = "https://versioncheck.linkerd.io";

/// Default base URL of the control plane public API
pub const DEFAULT_API_URL: &str = "http://localhost:8085";

/// Timeout for the versioncheck request (5 seconds)
pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the server version call (5 seconds)
pub const SERVER_VERSION_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Logging
// =============================================================================

/// Environment variable holding the tracing filter directives
pub const LOG_FILTER_ENV: &str = "LINKERD_VERSION_LOG";

/// Filter used when [`LOG_FILTER_ENV`] is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for version checks, read from an optional JSON file
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    pub version_check_url: String,
    pub api_url: String,
    /// Anonymous installation identifier, sent for attribution only
    pub installation_id: String,
    /// Tag naming the caller, sent for attribution only
    pub source: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            version_check_url: DEFAULT_VERSION_CHECK_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            installation_id: "unknown".to_string(),
            source: "cli".to_string(),
        }
    }
}

impl CheckConfig {
    /// Loads the config file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<CheckConfig>(json!({
            "installationId": "1234-abcd"
        }))
        .unwrap();

        assert_eq!(
            result,
            CheckConfig {
                installation_id: "1234-abcd".to_string(),
                ..CheckConfig::default()
            }
        );
    }

    #[test]
    fn check_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<CheckConfig>(json!({
            "versionCheckUrl": "http://versioncheck.test",
            "apiUrl": "http://controller.test:8085",
            "installationId": "1234-abcd",
            "source": "install"
        }))
        .unwrap();

        assert_eq!(
            result,
            CheckConfig {
                version_check_url: "http://versioncheck.test".to_string(),
                api_url: "http://controller.test:8085".to_string(),
                installation_id: "1234-abcd".to_string(),
                source: "install".to_string(),
            }
        );
    }

    #[test]
    fn load_without_path_returns_defaults() {
        assert_eq!(CheckConfig::load(None).unwrap(), CheckConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let result = CheckConfig::load(Some(Path::new("/nonexistent/linkerd-version.json")));

        assert!(result.is_err());
    }
}

//! Latest-release lookup against the versioncheck feed

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{DEFAULT_VERSION_CHECK_URL, VERSION_CHECK_TIMEOUT};
use crate::version::error::{TransportError, VersionError};
use crate::version::running::RunningVersion;

/// Path of the channel → revision document
const VERSION_JSON_PATH: &str = "/version.json";

/// Client for the versioncheck service
pub struct VersionCheckClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl VersionCheckClient {
    /// Creates a new VersionCheckClient with a custom base URL
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, VERSION_CHECK_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("linkerd-version/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn default_endpoint() -> Result<Self, TransportError> {
        Self::new(DEFAULT_VERSION_CHECK_URL)
    }

    /// Returns the latest revision published for the running version's channel.
    ///
    /// `installation_id` and `source` are sent for attribution only. Whether
    /// the result is newer than the running revision is left to the caller.
    pub async fn get_latest_version(
        &self,
        running: &RunningVersion,
        installation_id: &str,
        source: &str,
    ) -> Result<String, VersionError> {
        let channel = running.parse()?.channel;
        let url = format!("{}{}", self.base_url, VERSION_JSON_PATH);
        debug!("Checking latest {} version at {}", channel, url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("version", running.as_str()),
                ("uuid", installation_id),
                ("source", source),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            warn!("versioncheck returned status {}: {}", status, url);
            // Drain so the connection goes back to the pool
            let _ = response.bytes().await;
            return Err(VersionError::UnexpectedResponse(status));
        }

        let body = response.bytes().await.map_err(TransportError::from)?;
        let mut latest: HashMap<String, String> = serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse versioncheck response: {}", e);
            VersionError::Decode(e)
        })?;

        latest
            .remove(&channel)
            .ok_or(VersionError::UnsupportedChannel(channel))
    }
}

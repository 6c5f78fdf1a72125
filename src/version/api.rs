//! Capability for retrieving the control plane's version

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::version::error::TransportError;

/// Path of the unary version call on the public API
const VERSION_PATH: &str = "/api/v1/Version";

/// Remote endpoint able to report its release version
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionApi: Send + Sync {
    /// Issues a single "get version" call with no payload.
    ///
    /// # Returns
    /// * `Ok(String)` - The peer's release version, e.g. `edge-21.1.1`
    /// * `Err(TransportError)` - If the call fails
    async fn fetch_version(&self) -> Result<String, TransportError>;
}

/// Response body of the version call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionInfo {
    release_version: String,
}

/// `VersionApi` backed by the control plane's HTTP public API
pub struct PublicApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PublicApiClient {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("linkerd-version/", env!("CARGO_PKG_VERSION")))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl VersionApi for PublicApiClient {
    async fn fetch_version(&self) -> Result<String, TransportError> {
        let url = format!("{}{}", self.base_url, VERSION_PATH);
        debug!("Fetching server version from {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("public API returned status {}: {}", status, url);
            return Err(TransportError::Status(status));
        }

        let info: VersionInfo = response.json().await.map_err(|e| {
            warn!("Failed to parse version response: {}", e);
            TransportError::InvalidResponse(e.to_string())
        })?;

        Ok(info.release_version)
    }
}

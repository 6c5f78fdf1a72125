//! Retrieval and validation of the control plane (server) version

use std::time::Duration;

use tracing::debug;

use crate::config::SERVER_VERSION_TIMEOUT;
use crate::version::api::VersionApi;
use crate::version::diagnosis::diagnose_mismatch;
use crate::version::error::{TransportError, VersionError};

/// Fetches the server version with the default 5 second deadline.
pub async fn get_server_version<A: VersionApi + ?Sized>(api: &A) -> Result<String, TransportError> {
    get_server_version_with_timeout(api, SERVER_VERSION_TIMEOUT).await
}

/// Issues exactly one version call; a call outliving `timeout` is dropped
/// and reported as [`TransportError::Timeout`]. No retries.
pub async fn get_server_version_with_timeout<A: VersionApi + ?Sized>(
    api: &A,
    timeout: Duration,
) -> Result<String, TransportError> {
    match tokio::time::timeout(timeout, api.fetch_version()).await {
        Ok(result) => result,
        Err(_) => {
            debug!("Server version call exceeded {:?}", timeout);
            Err(TransportError::Timeout(timeout))
        }
    }
}

/// Checks that the server reports exactly `expected`.
pub async fn check_server_version<A: VersionApi + ?Sized>(
    api: &A,
    expected: &str,
) -> Result<(), VersionError> {
    check_server_version_with_timeout(api, expected, SERVER_VERSION_TIMEOUT).await
}

pub async fn check_server_version_with_timeout<A: VersionApi + ?Sized>(
    api: &A,
    expected: &str,
    timeout: Duration,
) -> Result<(), VersionError> {
    let release_version = get_server_version_with_timeout(api, timeout).await?;

    if release_version != expected {
        return Err(diagnose_mismatch(&release_version, expected).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::api::MockVersionApi;
    use crate::version::error::Mismatch;
    use crate::version::identifier::VersionIdentifier;

    fn api_returning(version: &'static str) -> MockVersionApi {
        let mut api = MockVersionApi::new();
        api.expect_fetch_version()
            .times(1)
            .returning(move || Ok(version.to_string()));
        api
    }

    /// Never answers, like a peer that accepted the call and went silent
    struct StalledApi;

    #[async_trait::async_trait]
    impl VersionApi for StalledApi {
        async fn fetch_version(&self) -> Result<String, TransportError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn get_server_version_returns_reported_version() {
        let api = api_returning("edge-1.2.3");

        let result = get_server_version(&api).await.unwrap();

        assert_eq!(result, "edge-1.2.3");
    }

    #[tokio::test]
    async fn get_server_version_passes_transport_error_through() {
        let mut api = MockVersionApi::new();
        api.expect_fetch_version().times(1).returning(|| {
            Err(TransportError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ))
        });

        let result = get_server_version(&api).await;

        assert!(matches!(
            result,
            Err(TransportError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
        ));
    }

    #[tokio::test]
    async fn get_server_version_times_out() {
        let timeout = Duration::from_millis(20);

        let result = get_server_version_with_timeout(&StalledApi, timeout).await;

        assert!(matches!(result, Err(TransportError::Timeout(t)) if t == timeout));
    }

    #[tokio::test]
    async fn check_server_version_passes_on_match() {
        let api = api_returning("edge-1.2.3");

        assert!(check_server_version(&api, "edge-1.2.3").await.is_ok());
    }

    #[tokio::test]
    async fn check_server_version_reports_revision_mismatch() {
        let api = api_returning("edge-1.2.3");

        let result = check_server_version(&api, "edge-1.2.4").await;

        match result {
            Err(VersionError::Mismatch(mismatch)) => assert_eq!(
                mismatch,
                Mismatch::Revision {
                    channel: "edge".to_string(),
                    actual: "1.2.3".to_string(),
                    expected: "1.2.4".to_string(),
                }
            ),
            other => panic!("expected revision mismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn check_server_version_reports_channel_mismatch() {
        let api = api_returning("edge-1.2.3");

        let result = check_server_version(&api, "stable-1.2.3").await;

        match result {
            Err(VersionError::Mismatch(mismatch)) => assert_eq!(
                mismatch,
                Mismatch::Channel {
                    actual: VersionIdentifier::new("edge", "1.2.3"),
                    expected: VersionIdentifier::new("stable", "1.2.3"),
                }
            ),
            other => panic!("expected channel mismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn check_server_version_surfaces_timeout_as_transport_error() {
        let result =
            check_server_version_with_timeout(&StalledApi, "edge-1.2.3", Duration::from_millis(20))
                .await;

        assert!(matches!(
            result,
            Err(VersionError::Transport(TransportError::Timeout(_)))
        ));
    }
}

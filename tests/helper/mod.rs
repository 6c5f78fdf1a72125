//! Test doubles for the version API

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use linkerd_version::version::api::VersionApi;
use linkerd_version::version::error::TransportError;

/// Returns a fixed release version and counts calls
pub struct CannedApi {
    version: String,
    calls: AtomicUsize,
}

impl CannedApi {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionApi for CannedApi {
    async fn fetch_version(&self) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.version.clone())
    }
}

/// Accepts the call and never answers
pub struct StalledApi;

#[async_trait]
impl VersionApi for StalledApi {
    async fn fetch_version(&self) -> Result<String, TransportError> {
        std::future::pending().await
    }
}

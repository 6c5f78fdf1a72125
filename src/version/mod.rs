//! Version compatibility checks between the CLI and the control plane
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Running   │────▶│   Client /  │────▶│  Diagnosis  │
//! │  (resolve)  │     │   Server    │     │ (classify)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Latest    │     │     Api     │
//! │(versioncheck│     │ (RPC fetch) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`identifier`]: `<channel>-<revision>` codec
//! - [`running`]: the process's own version, resolved once at startup
//! - [`client`]: validation of the running version
//! - [`api`]: capability for fetching the control plane's version
//! - [`server`]: retrieval and validation of the control plane's version
//! - [`latest`]: latest revision lookup against the versioncheck feed
//! - [`diagnosis`]: classification of differing versions
//! - [`error`]: error taxonomy

pub mod api;
pub mod client;
pub mod diagnosis;
pub mod error;
pub mod identifier;
pub mod latest;
pub mod running;
pub mod server;

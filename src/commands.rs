//! `version` and `check` subcommands

use std::io::Write;

use tracing::info;

use crate::version::api::VersionApi;
use crate::version::client::check_client_version;
use crate::version::error::VersionError;
use crate::version::identifier::VersionIdentifier;
use crate::version::latest::VersionCheckClient;
use crate::version::running::RunningVersion;
use crate::version::server::{check_server_version, get_server_version};

const OK_MARK: &str = "√";
const ERR_MARK: &str = "×";

/// Printed in place of a server version that could not be fetched
pub const UNAVAILABLE: &str = "unavailable";

/// Where the version to compare against comes from
pub enum ExpectedVersion<'a> {
    Explicit(String),
    Latest {
        checker: &'a VersionCheckClient,
        installation_id: &'a str,
        source: &'a str,
    },
}

/// Prints the client version and, when an API is given, the server version.
pub async fn run_version<A, W>(
    out: &mut W,
    running: &RunningVersion,
    api: Option<&A>,
    short: bool,
) -> std::io::Result<()>
where
    A: VersionApi + ?Sized,
    W: Write,
{
    if short {
        writeln!(out, "{}", running)?;
    } else {
        writeln!(out, "Client version: {}", running)?;
    }

    let Some(api) = api else {
        return Ok(());
    };

    let server_version = match get_server_version(api).await {
        Ok(version) => version,
        Err(e) => {
            info!("Failed to get server version: {}", e);
            UNAVAILABLE.to_string()
        }
    };

    if short {
        writeln!(out, "{}", server_version)
    } else {
        writeln!(out, "Server version: {}", server_version)
    }
}

/// Runs the client and server checks, returning whether all of them passed.
pub async fn run_check<A, W>(
    out: &mut W,
    running: &RunningVersion,
    api: &A,
    expected: ExpectedVersion<'_>,
) -> std::io::Result<bool>
where
    A: VersionApi + ?Sized,
    W: Write,
{
    let expected = match expected {
        ExpectedVersion::Explicit(version) => version,
        ExpectedVersion::Latest {
            checker,
            installation_id,
            source,
        } => {
            let latest = resolve_latest(checker, running, installation_id, source).await;
            report(out, "can determine the latest version", &latest)?;
            let Ok(version) = latest else {
                return Ok(false);
            };
            version
        }
    };

    let client = check_client_version(running, &expected);
    let client_ok = report(out, "cli is up-to-date", &client)?;

    let server = check_server_version(api, &expected).await;
    let server_ok = report(out, "control plane is up-to-date", &server)?;

    Ok(client_ok && server_ok)
}

async fn resolve_latest(
    checker: &VersionCheckClient,
    running: &RunningVersion,
    installation_id: &str,
    source: &str,
) -> Result<String, VersionError> {
    let revision = checker
        .get_latest_version(running, installation_id, source)
        .await?;
    let channel = running.parse()?.channel;

    Ok(VersionIdentifier::new(channel, revision).to_string())
}

fn report<T, W: Write>(
    out: &mut W,
    description: &str,
    result: &Result<T, VersionError>,
) -> std::io::Result<bool> {
    match result {
        Ok(_) => {
            writeln!(out, "{} {}", OK_MARK, description)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{} {}", ERR_MARK, description)?;
            writeln!(out, "    {}", e)?;
            Ok(false)
        }
    }
}

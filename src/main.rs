use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use linkerd_version::commands::{ExpectedVersion, run_check, run_version};
use linkerd_version::config::CheckConfig;
use linkerd_version::logging::{LogFormat, init_logging};
use linkerd_version::version::api::PublicApiClient;
use linkerd_version::version::latest::VersionCheckClient;
use linkerd_version::version::running::RunningVersion;

#[derive(Parser)]
#[command(name = "linkerd-version")]
#[command(version, about = "Check CLI and control plane versions")]
struct Cli {
    /// JSON file with check settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the control plane public API
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the client and server versions
    Version {
        /// Print the client version only
        #[arg(long)]
        client: bool,

        /// Print bare version strings
        #[arg(long)]
        short: bool,
    },
    /// Check that the client and control plane run the expected version
    Check {
        /// Version to compare against instead of the latest release
        #[arg(long)]
        expected: Option<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_format)?;

    let running = RunningVersion::detect();
    let mut config = CheckConfig::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command, running, config))
}

async fn run(
    command: Command,
    running: RunningVersion,
    config: CheckConfig,
) -> anyhow::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::Version { client, short } => {
            let api = if client {
                None
            } else {
                Some(PublicApiClient::new(&config.api_url)?)
            };
            run_version(&mut stdout, &running, api.as_ref(), short).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { expected } => {
            let api = PublicApiClient::new(&config.api_url)?;
            let checker = VersionCheckClient::new(&config.version_check_url)?;
            let expected = match expected {
                Some(version) => ExpectedVersion::Explicit(version),
                None => ExpectedVersion::Latest {
                    checker: &checker,
                    installation_id: &config.installation_id,
                    source: &config.source,
                },
            };

            if run_check(&mut stdout, &running, &api, expected).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

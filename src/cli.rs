use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{load_config, ServiceConfig};
use crate::discovery::{parse_address, EnvDiscovery};

/// Top-level CLI interface for the version service
#[derive(Parser)]
#[command(
    name = "version_svc",
    version,
    about = "Minimal REST service exposing its semantic version"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API (/version, /healthz)
    Serve {
        /// Host/IP to bind, overrides the configured host
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write the OpenAPI schema to disk
    ExportOpenapi {
        /// Output file, defaults to the configured openapi_path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// GET /version on a running instance and compare with the configured version
    Smoke {
        /// Base URL of the instance; discovered from the environment when omitted
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the configured version as served by /version
    Version,
}

pub fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config().context("Failed to load config")?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            block_on(crate::web::serve(&config))
        }
        Commands::ExportOpenapi { output } => {
            let path = crate::openapi::export_configured(&config, output)?;
            println!("OpenAPI schema written to {}", path.display());
            Ok(())
        }
        Commands::Smoke { base_url } => {
            let report = block_on(smoke(&config, base_url))?;
            println!(
                "Smoke check passed: {} serves version {}",
                report.base_url, report.version
            );
            Ok(())
        }
        Commands::Version => {
            let version = config.version_provider()?.get_version();
            println!("{}", serde_json::to_string(&version)?);
            Ok(())
        }
    }
}

async fn smoke(
    config: &ServiceConfig,
    base_url: Option<String>,
) -> anyhow::Result<crate::smoke::SmokeReport> {
    let report = match base_url {
        Some(raw) => {
            let url = parse_address("--base-url", &raw)?;
            let expected = config.version_provider()?.get_version();
            crate::smoke::run_against(&url, expected).await?
        }
        None => {
            let discovery = EnvDiscovery::from_env(&config.identity()?);
            crate::smoke::run(config, &discovery).await?
        }
    };
    Ok(report)
}

fn block_on<F: std::future::Future<Output = anyhow::Result<T>>, T>(fut: F) -> anyhow::Result<T> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;
    rt.block_on(fut)
}

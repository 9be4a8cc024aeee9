//! Writes the service's OpenAPI schema to its configured path.
//!
//! Usage:
//!   cargo run --bin export-openapi -- [--output PATH]
//!
//! The output directory must exist; the file is overwritten.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use version_svc::{config::load_config, log_sink, openapi};

#[derive(Parser)]
#[command(name = "export-openapi")]
#[command(about = "Write the service's OpenAPI schema to disk")]
struct Args {
    /// Output file, defaults to the configured openapi_path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    log_sink::init();
    let args = Args::parse();

    let config = load_config().context("Failed to load config")?;
    let path = openapi::export_configured(&config, args.output)
        .context("Failed to export OpenAPI schema")?;
    println!("OpenAPI schema written to {}", path.display());
    Ok(())
}

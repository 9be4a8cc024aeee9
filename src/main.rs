use clap::Parser;
use version_svc::cli::{dispatch, Cli};

fn main() -> anyhow::Result<()> {
    version_svc::log_sink::init();
    dispatch(Cli::parse())
}
